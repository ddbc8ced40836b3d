//! Lateral auto-repeat for terminal environments.
//!
//! A held left/right key moves once on press, waits `delay_ms`, then repeats
//! every `repeat_ms`. Terminals that do not emit key release events are
//! covered by a timeout; the delay is never shorter than that timeout, so a
//! tap without a release event still moves exactly once.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{GameAction, LATERAL_DELAY_MS, LATERAL_REPEAT_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn from_code(code: KeyCode) -> Self {
        match handle_key_event(KeyEvent::from(code)) {
            Some(GameAction::MoveLeft) => HorizontalDirection::Left,
            Some(GameAction::MoveRight) => HorizontalDirection::Right,
            _ => HorizontalDirection::None,
        }
    }

    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks the held lateral direction and emits repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    last_key_time: Instant,
    delay_timer: u32,
    repeat_accumulator: u32,
    delay_ms: u32,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
}

// A single tap must not turn into a sustained hold when no release arrives.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(LATERAL_DELAY_MS, LATERAL_REPEAT_MS)
    }

    pub fn with_config(delay_ms: u32, repeat_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            last_key_time: Instant::now(),
            delay_timer: 0,
            repeat_accumulator: 0,
            delay_ms: delay_ms.max(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            repeat_ms: repeat_ms.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Override the release timeout. The initial delay is raised to match
    /// when it would otherwise be shorter.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self.delay_ms = self.delay_ms.max(timeout_ms);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Returns the immediate move for a fresh press; repeated presses of the
    /// held direction only refresh the release timeout.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = HorizontalDirection::from_code(code);
        if direction == HorizontalDirection::None {
            return None;
        }

        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }

        self.horizontal = direction;
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
        direction.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let direction = HorizontalDirection::from_code(code);
        if direction != HorizontalDirection::None && direction == self.horizontal {
            self.release();
        }
    }

    fn release(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
    }

    /// Advance by `elapsed_ms` and return any repeats that came due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.release();
        }

        let Some(action) = self.horizontal.action() else {
            return actions;
        };

        let prev_delay = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer < self.delay_ms {
            return actions;
        }

        // Only the time past the delay counts toward the first repeat.
        let excess = if prev_delay < self.delay_ms {
            self.delay_timer - self.delay_ms
        } else {
            elapsed_ms
        };
        self.repeat_accumulator += excess;
        while self.repeat_accumulator >= self.repeat_ms {
            let _ = actions.try_push(action);
            self.repeat_accumulator -= self.repeat_ms;
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
