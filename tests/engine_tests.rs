//! End-to-end engine behavior through the public API.

use blockfall::core::{GameState, Grid, LockEvent, SequenceSelector, ShapeSelector};
use blockfall::types::{
    EngineConfig, GameAction, LevelThreshold, PieceKind, PieceState, GRID_CLEAR_BONUS,
    GRID_HEIGHT, GRID_WIDTH, TICK_MS,
};

fn no_level_ups() -> EngineConfig {
    EngineConfig {
        level_threshold: LevelThreshold::Linear {
            base: 1000,
            increment: 0,
        },
        ..EngineConfig::default()
    }
}

fn started(config: EngineConfig, shapes: &[PieceKind]) -> GameState<SequenceSelector> {
    let mut game = GameState::with_selector(config, SequenceSelector::new(shapes.to_vec()));
    game.start();
    game
}

/// Tick until the active piece locks; returns the lock event.
fn run_until_lock<S: ShapeSelector>(game: &mut GameState<S>) -> LockEvent {
    for _ in 0..5_000 {
        game.tick(TICK_MS);
        if let Some(ev) = game.take_last_event() {
            return ev;
        }
    }
    panic!("piece never locked");
}

fn full_row(gaps: &[usize]) -> String {
    (0..GRID_WIDTH as usize)
        .map(|x| if gaps.contains(&x) { '.' } else { '#' })
        .collect()
}

#[test]
fn test_o_pieces_stacked_in_one_column_top_out_on_the_eleventh() {
    let mut game = started(EngineConfig::default(), &[PieceKind::O]);

    for n in 1..=10 {
        game.apply_action(GameAction::FreeFall);
        let ev = run_until_lock(&mut game);
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over, "game over after only {n} pieces");
    }
    assert_eq!(game.grid().occupied_count(), 40);

    game.apply_action(GameAction::FreeFall);
    let ev = run_until_lock(&mut game);
    assert!(ev.game_over);
    assert!(game.game_over());
    assert!(game.active().is_none());
    assert_eq!(game.pieces_spawned(), 11);
}

#[test]
fn test_horizontal_i_completes_bottom_row() {
    let mut game = started(no_level_ups(), &[PieceKind::I]);
    let mut grid = Grid::from_rows(&["#...............", full_row(&[12, 13, 14, 15]).as_str()]);
    grid.set(0, 19, true);
    game.set_grid(grid);

    // Pivot to column 13 puts the fourth unit on column 15.
    for _ in 0..5 {
        assert!(game.apply_action(GameAction::MoveRight));
    }
    assert_eq!(game.active().unwrap().units[3], (15, 0));

    game.apply_action(GameAction::FreeFall);
    let ev = run_until_lock(&mut game);

    assert_eq!(ev.units[3], (15, 21));
    assert_eq!(ev.lines_cleared, 1);
    assert_eq!(ev.cleared_rows.as_slice(), &[21]);
    assert_eq!(ev.score_gained, 10 * game.level());
    assert!(!ev.grid_cleared);
    assert_eq!(game.score(), 10);

    // The row above dropped into the bottom row.
    assert!(game.grid().is_occupied(0, 21));
    assert!(game.grid().is_occupied(0, 20));
    assert_eq!(game.grid().occupied_count(), 2);
}

#[test]
fn test_vertical_i_fills_last_gap_in_bottom_row() {
    let mut game = started(no_level_ups(), &[PieceKind::I]);
    game.set_grid(Grid::from_rows(&[full_row(&[15]).as_str()]));

    // Clear of the ceiling so the rotations fit.
    game.tick(300);
    game.tick(300);
    for _ in 0..3 {
        assert!(game.apply_action(GameAction::Rotate));
    }
    let units = game.active().unwrap().units;
    assert!(units.iter().all(|&(x, _)| x == 8));
    assert_eq!(units[3], (8, 4));

    for _ in 0..7 {
        assert!(game.apply_action(GameAction::MoveRight));
    }
    assert!(!game.apply_action(GameAction::MoveRight));

    game.apply_action(GameAction::FreeFall);
    let ev = run_until_lock(&mut game);

    assert_eq!(ev.lines_cleared, 1);
    assert_eq!(ev.score_gained, 10);
    // Three units of the I remain in column 15, now resting on the floor.
    for y in 19..GRID_HEIGHT as i8 {
        assert!(game.grid().is_occupied(15, y));
    }
    assert_eq!(game.grid().occupied_count(), 3);
}

#[test]
fn test_whole_grid_clear_pays_bonus_once() {
    let mut game = started(no_level_ups(), &[PieceKind::I]);

    // Stand a vertical I in column 15 just above the floor.
    game.tick(300);
    game.tick(300);
    for _ in 0..3 {
        game.apply_action(GameAction::Rotate);
    }
    for _ in 0..7 {
        game.apply_action(GameAction::MoveRight);
    }
    for _ in 0..17 {
        game.tick(300);
    }
    let units = game.active().unwrap().units;
    assert!(units.iter().all(|&(x, y)| x == 15 && y >= 18));

    // Every other cell is occupied.
    let mut rows = vec![full_row(&[]); GRID_HEIGHT as usize - 4];
    rows.extend(std::iter::repeat(full_row(&[15])).take(4));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    game.set_grid(Grid::from_rows(&rows));

    let ev = run_until_lock(&mut game);
    assert_eq!(ev.lines_cleared, GRID_HEIGHT as u32);
    assert!(ev.grid_cleared);
    assert_eq!(ev.score_gained, GRID_HEIGHT as u32 * 10 + GRID_CLEAR_BONUS);
    assert_eq!(game.score(), ev.score_gained);
    assert!(game.grid().is_empty());
}

#[test]
fn test_lock_writes_exactly_the_piece_cells() {
    for kind in PieceKind::ALL {
        let mut game = started(no_level_ups(), &[kind]);
        game.apply_action(GameAction::FreeFall);
        let ev = run_until_lock(&mut game);
        assert_eq!(game.grid().occupied_count(), 4, "{kind:?}");
        for &(x, y) in ev.units.iter() {
            assert!(game.grid().is_occupied(x, y));
        }
    }
}

#[test]
fn test_rejected_rotation_leaves_piece_unchanged() {
    let mut game = started(no_level_ups(), &[PieceKind::T]);
    game.tick(300);
    game.tick(300);
    assert_eq!(game.active().unwrap().units[0], (8, 2));

    // The quarter turn would swing the right arm up into (9, 1).
    let mut grid = Grid::new();
    grid.set(9, 1, true);
    game.set_grid(grid);

    let before = game.active().unwrap();
    assert!(!game.apply_action(GameAction::Rotate));
    assert_eq!(game.active().unwrap(), before);

    game.set_grid(Grid::new());
    assert!(game.apply_action(GameAction::Rotate));
}

#[test]
fn test_level_up_wipes_grid_and_resets_score() {
    let mut game = started(EngineConfig::default(), &[PieceKind::I]);
    game.set_grid(Grid::from_rows(&["#...............", full_row(&[12, 13, 14, 15]).as_str()]));
    for _ in 0..5 {
        game.apply_action(GameAction::MoveRight);
    }
    game.apply_action(GameAction::FreeFall);
    let ev = run_until_lock(&mut game);

    assert!(ev.level_up);
    assert!(!ev.game_over);
    assert_eq!(game.level(), 2);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines_total(), 1);
    assert_eq!(game.lines_this_level(), 0);
    assert_eq!(game.lines_needed(), 4);
    assert!(game.grid().is_empty());
    assert_eq!(game.active().unwrap().state, PieceState::Falling);
}

#[test]
fn test_pause_freezes_everything() {
    let mut game = started(EngineConfig::default(), &[PieceKind::S]);
    let before = game.snapshot();
    game.apply_action(GameAction::Pause);
    for _ in 0..500 {
        game.tick(TICK_MS);
    }
    assert!(!game.apply_action(GameAction::Rotate));
    assert!(!game.apply_action(GameAction::FreeFall));

    let mut after = game.snapshot();
    after.paused = false;
    assert_eq!(after, before);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let mut a = GameState::seeded(99);
    let mut b = GameState::seeded(99);
    a.start();
    b.start();
    for _ in 0..20 {
        a.apply_action(GameAction::FreeFall);
        b.apply_action(GameAction::FreeFall);
        run_until_lock(&mut a);
        run_until_lock(&mut b);
        assert_eq!(a.snapshot(), b.snapshot());
        if a.game_over() {
            break;
        }
    }
}
