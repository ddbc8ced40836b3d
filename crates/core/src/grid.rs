//! Grid module - the fixed occupancy board
//!
//! The grid is 16 columns x 22 rows; each cell is either empty or occupied.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x is the column (0..16, left to right) and y is the
//! row (0..22, top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Row indices removed by one line-clear pass.
pub type ClearedRows = ArrayVec<u8, { GRID_HEIGHT as usize }>;

/// The game grid - 16 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [false; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(false))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(true))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * GRID_WIDTH as usize;
        &self.cells[start..start + GRID_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell)
    }

    /// Remove row `y`: every row above moves down by one and row 0 is zeroed.
    /// Returns the number of rows removed (1 or 0).
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= GRID_HEIGHT as usize {
            return 0;
        }

        let width = GRID_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(false);

        1
    }

    /// Clear every full row, scanning bottom to top.
    ///
    /// After a row is removed the same index is inspected again, since it now
    /// holds the row that was above it. The returned indices are the rows'
    /// positions before clearing, bottom-most first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = GRID_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                // Rows above `row` have already dropped by `cleared.len()`.
                cleared.push((row - cleared.len()) as u8);
                self.clear_row(row);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write occupied cells at the given absolute positions.
    ///
    /// Either all cells are written or none: if any position is out of bounds
    /// or already occupied, the grid is left untouched and false is returned.
    pub fn lock_cells(&mut self, units: &[(i8, i8)]) -> bool {
        if !units.iter().all(|&(x, y)| self.is_valid(x, y)) {
            return false;
        }

        for &(x, y) in units {
            self.set(x, y, true);
        }

        true
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a 0/1 matrix (row-major, row 0 first).
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        for (y, out_row) in out.iter_mut().enumerate() {
            for (x, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.row(y)[x] as u8;
            }
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Build a grid from text rows, `#` = occupied, anything else = empty.
    ///
    /// Rows are aligned to the bottom of the grid; missing columns are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let offset = (GRID_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().take(GRID_HEIGHT as usize).enumerate() {
            for (x, ch) in line.chars().take(GRID_WIDTH as usize).enumerate() {
                if ch == '#' {
                    grid.set(x as i8, (offset + i) as i8, true);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
