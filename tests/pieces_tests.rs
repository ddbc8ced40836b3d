//! Pieces tests - spawn table, rotation and movement rules

use blockfall::core::movement::{can_move_horizontally, move_horizontally};
use blockfall::core::pieces::{rotate_units, spawn_offsets, SPAWN_COLUMN};
use blockfall::core::{drop_distance, rotate, spawn_units, Grid, Tetromino};
use blockfall::types::{PieceKind, PieceState, GRID_WIDTH};

#[test]
fn test_spawn_table() {
    assert_eq!(SPAWN_COLUMN, 8);
    assert_eq!(spawn_units(PieceKind::I), [(8, 0), (7, 0), (9, 0), (10, 0)]);
    assert_eq!(spawn_units(PieceKind::J), [(8, 0), (8, 1), (8, 2), (7, 2)]);
    assert_eq!(spawn_units(PieceKind::L), [(8, 0), (8, 1), (8, 2), (9, 2)]);
    assert_eq!(spawn_units(PieceKind::O), [(8, 0), (9, 0), (8, 1), (9, 1)]);
    assert_eq!(spawn_units(PieceKind::S), [(8, 0), (9, 0), (8, 1), (7, 1)]);
    assert_eq!(spawn_units(PieceKind::T), [(8, 0), (7, 1), (8, 1), (9, 1)]);
    assert_eq!(spawn_units(PieceKind::Z), [(8, 0), (7, 0), (8, 1), (9, 1)]);
}

#[test]
fn test_spawned_pieces_are_distinct_cells_in_bounds() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let piece = Tetromino::spawn(kind);
        assert!(piece.is_valid(&grid), "{kind:?}");
        for (i, a) in piece.units.iter().enumerate() {
            for b in piece.units.iter().skip(i + 1) {
                assert_ne!(a, b, "{kind:?} repeats a cell");
            }
        }
    }
}

#[test]
fn test_rotation_keeps_pivot_and_cell_count() {
    for kind in PieceKind::ALL {
        let units = spawn_offsets(kind).map(|(dx, dy)| (8 + dx, 10 + dy));
        let rotated = rotate_units(&units, |_, _| true).unwrap();
        assert_eq!(rotated[0], units[0], "{kind:?}");
    }
}

#[test]
fn test_i_rotates_into_a_column() {
    let grid = Grid::new();
    let mut piece = Tetromino::spawn(PieceKind::I);
    for unit in piece.units.iter_mut() {
        unit.1 += 5;
    }
    let rotated = rotate(&piece, &grid);
    assert!(rotated.units.iter().all(|&(x, _)| x == 8));
    assert_eq!(rotated.units, [(8, 5), (8, 6), (8, 4), (8, 3)]);
}

#[test]
fn test_rotation_against_right_wall_is_rejected() {
    let grid = Grid::new();
    // Vertical I hugging the right wall: turning it flat would leave the grid.
    let piece = Tetromino {
        kind: PieceKind::I,
        units: [(15, 10), (15, 11), (15, 9), (15, 8)],
        state: PieceState::Falling,
    };
    assert_eq!(rotate(&piece, &grid), piece);
}

#[test]
fn test_walk_to_each_wall() {
    let grid = Grid::new();
    let mut piece = Tetromino::spawn(PieceKind::T);

    let mut steps = 0;
    while can_move_horizontally(&piece, &grid, -1, true) {
        move_horizontally(&mut piece, -1);
        steps += 1;
    }
    assert_eq!(steps, 7);
    assert_eq!(piece.units.iter().map(|u| u.0).min(), Some(0));

    while can_move_horizontally(&piece, &grid, 1, true) {
        move_horizontally(&mut piece, 1);
    }
    assert_eq!(
        piece.units.iter().map(|u| u.0).max(),
        Some(GRID_WIDTH as i8 - 1)
    );
}

#[test]
fn test_drop_distance_on_stack() {
    let grid = Grid::from_rows(&["########........"]);
    let piece = Tetromino::spawn(PieceKind::O);
    // Columns 8 and 9 are open to the floor.
    assert_eq!(drop_distance(&piece, &grid), 20);

    let piece = Tetromino::spawn(PieceKind::T);
    // Left arm sits over column 7, which is filled at row 21.
    assert_eq!(drop_distance(&piece, &grid), 19);
}
