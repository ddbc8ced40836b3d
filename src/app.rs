//! Screen state machine driving one session.
//!
//! `App` owns the engine, the lateral auto-repeat handler and the
//! leaderboard. The binary feeds it key events and frame ticks and asks it to
//! render; everything here is testable without a terminal.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use crate::config::AppConfig;
use crate::core::{GameSnapshot, GameState, LockEvent, RandomSelector, ShapeSelector};
use crate::input::{handle_key_event, is_lateral, should_quit, InputHandler};
use crate::scores::{Leaderboard, ScoreEntry, MAX_NAME_LEN};
use crate::term::{
    render_game_over, render_leaderboard, render_level_up, render_manual, render_menu,
    FrameBuffer, GameView, HudFlash, LeaderboardRow, Viewport, MENU_ITEMS,
};
use crate::types::GameAction;

/// How long HUD flashes stay up.
pub const FLASH_MS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu { selected: usize },
    Manual,
    Playing,
    /// Interlude after a level up; the engine is not ticked.
    LevelUp,
    /// `name` is `Some` while the player types a leaderboard name.
    GameOver { name: Option<String> },
    Leaderboard { highlight: Option<usize> },
}

#[derive(Debug, Clone, Copy, Default)]
struct FlashTimers {
    lines: Option<(u32, u32)>,
    bonus: Option<(u32, u32)>,
}

impl FlashTimers {
    fn show(&mut self, ev: &LockEvent, bonus: u32) {
        if ev.lines_cleared > 0 {
            self.lines = Some((ev.lines_cleared, FLASH_MS));
        }
        if ev.grid_cleared {
            self.bonus = Some((bonus, FLASH_MS));
        }
    }

    fn advance(&mut self, elapsed_ms: u32) {
        for slot in [&mut self.lines, &mut self.bonus] {
            if let Some((value, left)) = *slot {
                *slot = left.checked_sub(elapsed_ms).filter(|&l| l > 0).map(|l| (value, l));
            }
        }
    }

    fn hud(&self) -> HudFlash {
        HudFlash {
            lines_cleared: self.lines.map(|(v, _)| v),
            grid_clear_bonus: self.bonus.map(|(v, _)| v),
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct App<S: ShapeSelector = Box<dyn ShapeSelector>> {
    screen: Screen,
    game: GameState<S>,
    input: InputHandler,
    leaderboard: Leaderboard,
    /// Where the leaderboard is saved; `None` keeps it in memory only.
    scores_path: Option<PathBuf>,
    view: GameView,
    snapshot: GameSnapshot,
    flash: FlashTimers,
    quit: bool,
}

impl App<Box<dyn ShapeSelector>> {
    /// Build from environment config, loading the leaderboard from disk.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let selector: Box<dyn ShapeSelector> = match config.seed {
            Some(seed) => Box::new(RandomSelector::seeded(seed)),
            None => Box::new(RandomSelector::new()),
        };
        let game = GameState::with_selector(config.engine, selector);
        let leaderboard = Leaderboard::load(&config.scores_path)?;
        Ok(App::new(game, leaderboard, Some(config.scores_path.clone())))
    }
}

impl<S: ShapeSelector> App<S> {
    pub fn new(game: GameState<S>, leaderboard: Leaderboard, scores_path: Option<PathBuf>) -> Self {
        Self {
            screen: Screen::Menu { selected: 0 },
            game,
            input: InputHandler::new(),
            leaderboard,
            scores_path,
            view: GameView::default(),
            snapshot: GameSnapshot::default(),
            flash: FlashTimers::default(),
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn hud_flash(&self) -> HudFlash {
        self.flash.hud()
    }

    /// Start a fresh game and switch to the playing screen.
    pub fn start_game(&mut self) {
        self.game.reset();
        self.game.start();
        self.input.reset();
        self.flash.clear();
        self.screen = Screen::Playing;
        info!("game started");
        self.after_engine_step(self.game.level());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.screen.clone() {
            Screen::Menu { selected } => self.menu_key(key, selected),
            Screen::Manual => self.screen = Screen::Menu { selected: 1 },
            Screen::Playing => self.playing_key(key),
            Screen::LevelUp => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.input.reset();
                    self.screen = Screen::Playing;
                }
                _ if should_quit(key) => self.screen = Screen::Menu { selected: 0 },
                _ => {}
            },
            Screen::GameOver { name: Some(name) } => self.name_entry_key(key, name),
            Screen::GameOver { name: None } => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => self.start_game(),
                KeyCode::Enter => self.screen = Screen::Menu { selected: 0 },
                _ if should_quit(key) => self.screen = Screen::Menu { selected: 0 },
                _ => {}
            },
            Screen::Leaderboard { .. } => self.screen = Screen::Menu { selected: 2 },
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.input.handle_key_release(code);
    }

    fn menu_key(&mut self, key: KeyEvent, selected: usize) {
        let last = MENU_ITEMS.len() - 1;
        match key.code {
            KeyCode::Up => {
                self.screen = Screen::Menu {
                    selected: selected.saturating_sub(1),
                }
            }
            KeyCode::Down => {
                self.screen = Screen::Menu {
                    selected: (selected + 1).min(last),
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match selected {
                0 => self.start_game(),
                1 => self.screen = Screen::Manual,
                2 => self.screen = Screen::Leaderboard { highlight: None },
                _ => self.quit = true,
            },
            _ if should_quit(key) => self.quit = true,
            _ => {}
        }
    }

    fn playing_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.game.reset();
            self.screen = Screen::Menu { selected: 0 };
            return;
        }

        let Some(action) = handle_key_event(key) else {
            return;
        };

        let level_before = self.game.level();
        if is_lateral(action) {
            if let Some(action) = self.input.handle_key_press(key.code) {
                self.game.apply_action(action);
            }
        } else {
            if action == GameAction::Restart {
                self.input.reset();
                self.flash.clear();
            }
            self.game.apply_action(action);
        }
        self.after_engine_step(level_before);
    }

    fn name_entry_key(&mut self, key: KeyEvent, mut name: String) {
        match key.code {
            KeyCode::Enter => {
                let rank = self.submit_score(&name).unwrap_or_else(|e| {
                    warn!("could not save leaderboard: {e:#}");
                    None
                });
                self.screen = Screen::Leaderboard { highlight: rank };
            }
            KeyCode::Esc => self.screen = Screen::GameOver { name: None },
            KeyCode::Backspace => {
                name.pop();
                self.screen = Screen::GameOver { name: Some(name) };
            }
            KeyCode::Char(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => {
                name.push(c);
                self.screen = Screen::GameOver { name: Some(name) };
            }
            _ => {}
        }
    }

    /// Insert the finished run and persist the board. Returns the 0-based rank.
    fn submit_score(&mut self, name: &str) -> Result<Option<usize>> {
        let entry = ScoreEntry::new(name, self.game.lines_total());
        let rank = self.leaderboard.insert(entry);
        if let Some(rank) = rank {
            info!("leaderboard: {} placed #{}", name, rank + 1);
        }
        if let Some(path) = &self.scores_path {
            self.leaderboard.save(path)?;
        }
        Ok(rank)
    }

    /// Advance one frame. The engine only runs on the playing screen.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.flash.advance(elapsed_ms);
        if self.screen != Screen::Playing {
            return;
        }

        let level_before = self.game.level();
        for action in self.input.update(elapsed_ms) {
            self.game.apply_action(action);
        }
        self.game.tick(elapsed_ms);
        self.after_engine_step(level_before);
    }

    /// React to locks, level changes and game over after the engine ran.
    fn after_engine_step(&mut self, level_before: u32) {
        if let Some(ev) = self.game.take_last_event() {
            self.flash.show(&ev, self.game.config().grid_clear_bonus);
        }

        if self.game.game_over() {
            let lines = self.game.lines_total();
            let name = self
                .leaderboard
                .qualifies(lines)
                .then(String::new);
            info!("game over after {} lines", lines);
            self.screen = Screen::GameOver { name };
        } else if self.game.level() > level_before {
            self.input.reset();
            self.screen = Screen::LevelUp;
        }
    }

    /// Draw the current screen. The playing view reuses one snapshot buffer.
    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.screen {
            Screen::Menu { selected } => render_menu(fb, viewport, *selected),
            Screen::Manual => render_manual(fb, viewport),
            Screen::Playing => {
                self.game.snapshot_into(&mut self.snapshot);
                self.view
                    .render_into(&self.snapshot, self.flash.hud(), viewport, fb)
            }
            Screen::LevelUp => render_level_up(
                fb,
                viewport,
                self.game.level(),
                self.game.lines_needed(),
            ),
            Screen::GameOver { name } => render_game_over(
                fb,
                viewport,
                self.game.lines_total(),
                self.game.level(),
                name.as_deref(),
            ),
            Screen::Leaderboard { highlight } => {
                let rows: Vec<LeaderboardRow<'_>> = self
                    .leaderboard
                    .entries()
                    .iter()
                    .map(|e| LeaderboardRow {
                        name: &e.name,
                        lines: e.lines_cleared,
                    })
                    .collect();
                render_leaderboard(fb, viewport, &rows, *highlight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSelector;
    use crate::types::{EngineConfig, PieceKind, TICK_MS};

    fn app(kind: PieceKind) -> App<SequenceSelector> {
        let game = GameState::with_selector(EngineConfig::default(), SequenceSelector::repeat(kind));
        App::new(game, Leaderboard::new(), None)
    }

    fn press(app: &mut App<SequenceSelector>, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn run_until<F: Fn(&App<SequenceSelector>) -> bool>(app: &mut App<SequenceSelector>, done: F) {
        for _ in 0..10_000 {
            if done(app) {
                return;
            }
            app.tick(TICK_MS);
        }
        panic!("condition never reached, screen {:?}", app.screen());
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app(PieceKind::O);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.screen(), &Screen::Menu { selected: 1 });
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), &Screen::Manual);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.screen(), &Screen::Menu { selected: 1 });

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.screen(), &Screen::Menu { selected: 3 });
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit());
    }

    #[test]
    fn test_play_starts_engine() {
        let mut app = app(PieceKind::T);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), &Screen::Playing);
        assert!(app.game().started());
        assert!(app.game().active().is_some());
    }

    #[test]
    fn test_ticks_only_run_while_playing() {
        let mut app = app(PieceKind::O);
        app.tick(10_000);
        assert!(!app.game().started());

        press(&mut app, KeyCode::Enter);
        app.tick(300);
        assert_eq!(app.game().active().unwrap().units[0], (8, 1));
    }

    #[test]
    fn test_lateral_press_moves_once() {
        let mut app = app(PieceKind::O);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.game().active().unwrap().units[0], (7, 0));
        // Same direction again is a held key, not a new move.
        press(&mut app, KeyCode::Left);
        assert_eq!(app.game().active().unwrap().units[0], (7, 0));
        app.handle_key_release(KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.game().active().unwrap().units[0], (6, 0));
    }

    #[test]
    fn test_skip_level_shows_card_and_withholds_ticks() {
        let mut app = app(PieceKind::O);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.screen(), &Screen::LevelUp);
        assert_eq!(app.game().level(), 2);

        let before = app.game().active().unwrap();
        app.tick(5_000);
        assert_eq!(app.game().active().unwrap(), before);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), &Screen::Playing);
    }

    #[test]
    fn test_game_over_name_entry_and_leaderboard() {
        let mut app = app(PieceKind::O);
        press(&mut app, KeyCode::Enter);
        run_until(&mut app, |a| matches!(a.screen(), Screen::GameOver { .. }));
        assert_eq!(
            app.screen(),
            &Screen::GameOver {
                name: Some(String::new())
            }
        );

        for c in "ada".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), &Screen::Leaderboard { highlight: Some(0) });
        assert_eq!(app.leaderboard().entries()[0].name, "ada");
        assert_eq!(app.leaderboard().entries()[0].lines_cleared, 0);

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.screen(), &Screen::Menu { selected: 2 });
    }

    #[test]
    fn test_quit_from_play_returns_to_menu() {
        let mut app = app(PieceKind::O);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.screen(), &Screen::Menu { selected: 0 });
        assert!(!app.should_quit());
        assert!(!app.game().started());

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_flash_expires() {
        let mut flash = FlashTimers::default();
        let ev = LockEvent {
            units: [(0, 0); 4],
            lines_cleared: 2,
            cleared_rows: Default::default(),
            score_gained: 70,
            grid_cleared: true,
            level_up: false,
            game_over: false,
        };
        flash.show(&ev, 50);
        assert_eq!(flash.hud().grid_clear_bonus, Some(50));
        assert_eq!(flash.hud().lines_cleared, Some(2));

        flash.advance(FLASH_MS - 1);
        assert!(flash.hud().grid_clear_bonus.is_some());
        flash.advance(1);
        assert_eq!(flash.hud(), HudFlash::default());
    }

    #[test]
    fn test_render_each_screen() {
        let mut app = app(PieceKind::O);
        let vp = Viewport::new(80, 30);
        let mut fb = FrameBuffer::new(0, 0);

        app.render_into(vp, &mut fb);
        assert!(fb.contains_text("> Play <"));

        press(&mut app, KeyCode::Enter);
        app.render_into(vp, &mut fb);
        assert!(fb.contains_text("SCORE"));

        press(&mut app, KeyCode::Char('c'));
        app.render_into(vp, &mut fb);
        assert!(fb.contains_text("LEVEL 2"));
    }
}
