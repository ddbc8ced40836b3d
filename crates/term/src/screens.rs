//! Full-screen views outside of gameplay: menu, manual, level-up card,
//! game over with name entry, and the leaderboard.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

const CARD_WIDTH: u16 = 40;

/// Entries on the main menu, in display order.
pub const MENU_ITEMS: [&str; 4] = ["Play", "Manual", "Leaderboard", "Quit"];

/// One leaderboard row as shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRow<'a> {
    pub name: &'a str,
    pub lines: u32,
}

fn title_style() -> CellStyle {
    CellStyle::fg(Rgb::new(255, 215, 0)).bold()
}

fn text_style() -> CellStyle {
    CellStyle::default()
}

fn hint_style() -> CellStyle {
    CellStyle::default().dim()
}

/// Clear `fb` and draw an empty bordered card of `h` rows. Returns its origin.
fn card(fb: &mut FrameBuffer, viewport: Viewport, h: u16) -> (u16, u16) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().cell(' '));
    let x = viewport.width.saturating_sub(CARD_WIDTH) / 2;
    let y = viewport.height.saturating_sub(h) / 2;
    fb.draw_box(x, y, CARD_WIDTH, h, CellStyle::default());
    (x, y)
}

pub fn render_menu(fb: &mut FrameBuffer, viewport: Viewport, selected: usize) {
    let (x, y) = card(fb, viewport, 12);
    fb.put_str_centered(x, CARD_WIDTH, y + 2, "B L O C K F A L L", title_style());

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let row = y + 4 + i as u16;
        if i == selected {
            let style = text_style().bold();
            fb.put_str_centered(x, CARD_WIDTH, row, &format!("> {item} <"), style);
        } else {
            fb.put_str_centered(x, CARD_WIDTH, row, item, text_style());
        }
    }
    fb.put_str_centered(x, CARD_WIDTH, y + 10, "↑↓ select  ENTER confirm", hint_style());
}

const MANUAL: [&str; 11] = [
    "←  →      move left / right",
    "↑         rotate",
    "↓         soft drop",
    "SPACE     free fall",
    "P         pause",
    "R         restart",
    "C         skip level",
    "Q / ESC   back",
    "",
    "Fill a row to clear it. Clear enough",
    "rows to reach the next level.",
];

pub fn render_manual(fb: &mut FrameBuffer, viewport: Viewport) {
    let (x, y) = card(fb, viewport, MANUAL.len() as u16 + 6);
    fb.put_str_centered(x, CARD_WIDTH, y + 1, "HOW TO PLAY", title_style());
    for (i, line) in MANUAL.iter().enumerate() {
        fb.put_str(x + 2, y + 3 + i as u16, line, text_style());
    }
    fb.put_str_centered(
        x,
        CARD_WIDTH,
        y + MANUAL.len() as u16 + 4,
        "press any key",
        hint_style(),
    );
}

/// Interlude shown after a level up, before play resumes.
pub fn render_level_up(fb: &mut FrameBuffer, viewport: Viewport, level: u32, lines_needed: u32) {
    let (x, y) = card(fb, viewport, 9);
    let cx = x + (CARD_WIDTH - 14) / 2;
    let after = fb.put_str(cx, y + 2, "LEVEL ", title_style());
    fb.put_u32(after, y + 2, level, title_style());

    let cx = x + 8;
    let after = fb.put_str(cx, y + 4, "Clear ", text_style());
    let after = fb.put_u32(after, y + 4, lines_needed, text_style());
    fb.put_str(after, y + 4, " lines to advance", text_style());

    fb.put_str_centered(x, CARD_WIDTH, y + 6, "press ENTER to continue", hint_style());
}

/// Game over card. `name` is the in-progress leaderboard entry, if the run qualified.
pub fn render_game_over(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    lines_total: u32,
    level: u32,
    name: Option<&str>,
) {
    let (x, y) = card(fb, viewport, 11);
    fb.put_str_centered(x, CARD_WIDTH, y + 1, "GAME OVER", title_style());

    let after = fb.put_str(x + 10, y + 3, "Lines: ", text_style());
    fb.put_u32(after, y + 3, lines_total, text_style());
    let after = fb.put_str(x + 10, y + 4, "Level: ", text_style());
    fb.put_u32(after, y + 4, level, text_style());

    match name {
        Some(name) => {
            fb.put_str_centered(x, CARD_WIDTH, y + 6, "New high score! Name:", text_style());
            let field = format!("{name}_");
            fb.put_str_centered(x, CARD_WIDTH, y + 7, &field, text_style().bold());
            fb.put_str_centered(x, CARD_WIDTH, y + 9, "ENTER save", hint_style());
        }
        None => {
            fb.put_str_centered(x, CARD_WIDTH, y + 9, "R restart  ENTER menu", hint_style());
        }
    }
}

/// Ranked list; `highlight` marks a freshly inserted entry.
pub fn render_leaderboard(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    rows: &[LeaderboardRow<'_>],
    highlight: Option<usize>,
) {
    let (x, y) = card(fb, viewport, 16);
    fb.put_str_centered(x, CARD_WIDTH, y + 1, "LEADERBOARD", title_style());

    if rows.is_empty() {
        fb.put_str_centered(x, CARD_WIDTH, y + 4, "no scores yet", hint_style());
    }

    for (i, row) in rows.iter().enumerate().take(10) {
        let ry = y + 3 + i as u16;
        let style = if highlight == Some(i) {
            title_style()
        } else {
            text_style()
        };
        let rank = i as u32 + 1;
        let rank_x = if rank < 10 { x + 4 } else { x + 3 };
        let after = fb.put_u32(rank_x, ry, rank, style);
        fb.put_char(after, ry, '.', style);
        fb.put_str(x + 7, ry, row.name, style);
        let lines_x = x + CARD_WIDTH - 10;
        fb.put_u32(lines_x, ry, row.lines, style);
    }

    fb.put_str_centered(x, CARD_WIDTH, y + 14, "press any key", hint_style());
}
