//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. Each grid cell is drawn `cell_w` columns wide to make up for
//! the aspect ratio of terminal glyphs.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Transient HUD messages owned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudFlash {
    /// Grid-clear bonus to announce, while its flash timer runs.
    pub grid_clear_bonus: Option<u32>,
    /// Lines removed by the most recent lock, while its flash timer runs.
    pub lines_cleared: Option<u32>,
}

const PLAYFIELD_BG: Rgb = Rgb::new(24, 24, 32);
const LOCKED_FG: Rgb = Rgb::new(150, 150, 170);
const PANEL_WIDTH: u16 = 18;
const PROGRESS_WIDTH: u16 = 12;

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

pub struct GameView {
    cell_w: u16,
    show_landing: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            show_landing: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_landing(mut self, show: bool) -> Self {
        self.show_landing = show;
        self
    }

    /// Outer size of the bordered playfield in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 + 2,
        )
    }

    /// Top-left corner of the playfield frame, centered with the side panel.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w + 2 + PANEL_WIDTH;
        (
            viewport.width.saturating_sub(total_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flash: HudFlash,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (ox, oy) = self.frame_origin(viewport);

        fb.fill_rect(
            ox + 1,
            oy + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::default().on(PLAYFIELD_BG),
        );
        fb.draw_box(ox, oy, frame_w, frame_h, CellStyle::default());

        let empty = CellStyle::fg(Rgb::new(70, 70, 84)).on(PLAYFIELD_BG).dim();
        let locked = CellStyle::fg(LOCKED_FG).on(PLAYFIELD_BG);
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    self.put_grid_cell(fb, ox, oy, x as i8, y as i8, '█', locked);
                } else {
                    self.put_grid_cell(fb, ox, oy, x as i8, y as i8, '·', empty);
                }
            }
        }

        if let Some(active) = snap.active {
            let color = piece_color(active.kind);
            if self.show_landing {
                if let Some(landing) = snap.landing {
                    let style = CellStyle::fg(color).on(PLAYFIELD_BG).dim();
                    for &(x, y) in landing.iter() {
                        self.put_grid_cell(fb, ox, oy, x, y, '░', style);
                    }
                }
            }
            let style = CellStyle::fg(color).on(PLAYFIELD_BG).bold();
            for &(x, y) in active.units.iter() {
                self.put_grid_cell(fb, ox, oy, x, y, '█', style);
            }
        }

        self.draw_panel(fb, snap, flash, viewport, ox + frame_w + 2, oy);

        let overlay = if snap.game_over {
            Some("GAME OVER")
        } else if snap.paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = overlay {
            let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
            fb.put_str_centered(ox, frame_w, oy + frame_h / 2, text, style);
        }
    }

    /// Allocating convenience wrapper around [`render_into`](Self::render_into).
    pub fn render(&self, snap: &GameSnapshot, flash: HudFlash, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, flash, viewport, &mut fb);
        fb
    }

    fn put_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        ox: u16,
        oy: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let px = ox + 1 + x as u16 * self.cell_w;
        fb.fill_rect(px, oy + 1 + y as u16, self.cell_w, 1, ch, style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        flash: HudFlash,
        viewport: Viewport,
        x: u16,
        top: u16,
    ) {
        if x >= viewport.width || viewport.width - x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let mut y = top;

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "LEVEL", label);
        fb.put_u32(x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(x, y, "LINES", label);
        let cx = fb.put_u32(x, y + 1, snap.lines_this_level, value);
        let cx = fb.put_str(cx, y + 1, "/", value);
        fb.put_u32(cx, y + 1, snap.lines_needed, value);
        draw_progress(fb, x, y + 2, snap.level_progress());
        y += 4;

        fb.put_str(x, y, "TOTAL", label);
        fb.put_u32(x, y + 1, snap.lines_total, value);
        y += 3;

        let highlight = CellStyle::fg(Rgb::new(255, 215, 0)).bold();
        if let Some(lines) = flash.lines_cleared {
            let cx = fb.put_str(x, y, "+", highlight);
            let cx = fb.put_u32(cx, y, lines, highlight);
            fb.put_str(cx, y, if lines == 1 { " LINE" } else { " LINES" }, highlight);
        }
        if let Some(bonus) = flash.grid_clear_bonus {
            let cx = fb.put_str(x, y + 1, "+", highlight);
            fb.put_u32(cx, y + 1, bonus, highlight);
            fb.put_str(x, y + 2, "GRID CLEAR BONUS", highlight);
        }
        y += 4;

        let hint = CellStyle::default().dim();
        for line in ["←→ move  ↑ rotate", "↓ soft  SPACE fall", "P pause  Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }
}

fn draw_progress(fb: &mut FrameBuffer, x: u16, y: u16, progress: f32) {
    let filled = (progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f32).round() as u16;
    let on = CellStyle::fg(Rgb::new(100, 220, 120));
    let off = CellStyle::default().dim();
    fb.put_char(x, y, '[', off);
    for i in 0..PROGRESS_WIDTH {
        if i < filled {
            fb.put_char(x + 1 + i, y, '=', on);
        } else {
            fb.put_char(x + 1 + i, y, ' ', off);
        }
    }
    fb.put_char(x + 1 + PROGRESS_WIDTH, y, ']', off);
}
