//! Field module - the locked-cell grid
//!
//! The field is a 10x20 grid where each cell is empty (0) or holds the
//! `cell_value` of the piece kind that locked there.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! Pieces are positioned by the top-left corner of their 4x4 box. That corner
//! may sit above the field (negative y): occupied cells above row 0 are exempt
//! from collision, which is what lets a piece spawn and rotate at the top.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{
    Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, GAME_OVER_ROWS, OUT_OF_BOUNDS_CELL,
};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the field
const FIELD_SIZE: usize = WIDTH * HEIGHT;

/// Row indices of a field, bottom-most first
pub type RowList = ArrayVec<usize, HEIGHT>;

/// The playing field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; FIELD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= WIDTH as i32 || y < 0 || y >= HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Get cell at position (x, y), or `OUT_OF_BOUNDS_CELL` (-1) outside the field
    pub fn get_cell(&self, x: i32, y: i32) -> i8 {
        self.get(x, y).map_or(OUT_OF_BOUNDS_CELL, |c| c as i8)
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    ///
    /// This bypasses placement rules; gameplay writes go through [`Field::place`].
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// Check whether `piece` fits with its box corner at (x, y)
    ///
    /// Every occupied cell must be inside the side walls and above the floor.
    /// Cells above the top edge are accepted without a collision check; all
    /// others must land on empty cells.
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece.cells().all(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= WIDTH as i32 || by >= HEIGHT as i32 {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Write `piece` into the field with its box corner at (x, y)
    ///
    /// No feasibility check happens here; callers check [`Field::can_place`]
    /// first. Cells outside the field are dropped.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) {
        let value = piece.kind().cell_value();
        for (dx, dy) in piece.cells() {
            self.set(x + dx, y + dy, value);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Indices of all currently full rows, bottom-most first
    pub fn full_rows(&self) -> RowList {
        (0..HEIGHT).rev().filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove every full row, compacting the rows above it downwards
    ///
    /// Scans from the bottom row up. When a row is full it is emptied, every
    /// row above shifts down one, and the same index is examined again since
    /// new content just moved into it. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                self.shift_down_into(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    fn clear_row(&mut self, y: usize) {
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].fill(EMPTY_CELL);
    }

    /// Move rows `0..y` down by one so they occupy `1..=y`; row 0 becomes empty
    fn shift_down_into(&mut self, y: usize) {
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.clear_row(0);
    }

    /// True if any locked cell sits in the top rows
    ///
    /// Only meaningful right after a lock; a falling piece is never part of
    /// the field.
    pub fn is_game_over(&self) -> bool {
        self.cells[..GAME_OVER_ROWS as usize * WIDTH]
            .iter()
            .any(|&cell| cell != EMPTY_CELL)
    }

    /// Cells of one row, left to right
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a valid row index.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the field into a row-major 2D grid
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Count of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Build a field from text rows, bottom-aligned
    ///
    /// Each string is one row; `.` or space is empty and a piece letter
    /// (`IOTSZJL`, any case) is a locked cell of that kind. Any other
    /// character counts as an `I` cell. Rows are placed so the last string
    /// lands on the bottom row. Extra rows or columns are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut field = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(HEIGHT).enumerate() {
            let y = (offset + i) as i32;
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '.' | ' ' => EMPTY_CELL,
                    other => PieceKind::ALL
                        .iter()
                        .find(|k| k.as_char() == other.to_ascii_uppercase())
                        .map_or(PieceKind::I.cell_value(), |k| k.cell_value()),
                };
                field.set(x as i32, y, cell);
            }
        }
        field
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_field_index_calculation() {
        assert_eq!(Field::index(0, 0), Some(0));
        assert_eq!(Field::index(9, 0), Some(9));
        assert_eq!(Field::index(0, 1), Some(10));
        assert_eq!(Field::index(9, 19), Some(199));
        assert_eq!(Field::index(-1, 0), None);
        assert_eq!(Field::index(10, 0), None);
        assert_eq!(Field::index(0, 20), None);
    }

    #[test]
    fn test_get_cell_sentinel() {
        let mut field = Field::new();
        field.set(2, 3, PieceKind::Z.cell_value());
        assert_eq!(field.get_cell(2, 3), 5);
        assert_eq!(field.get_cell(0, 0), 0);
        assert_eq!(field.get_cell(-1, 0), -1);
        assert_eq!(field.get_cell(0, 20), -1);
        assert_eq!(field.get_cell(10, 5), -1);
    }

    #[test]
    fn test_can_place_allows_cells_above_top() {
        let field = Field::new();
        // Vertical I occupies matrix rows 0..4 in column 2; y = -3 leaves one cell visible.
        let piece = Piece::with_rotation(PieceKind::I, Rotation::East);
        assert!(field.can_place(&piece, 0, -3));
        // Still blocked by the side wall while above the field.
        assert!(!field.can_place(&piece, 8, -3));
    }

    #[test]
    fn test_can_place_rejects_floor_and_walls() {
        let field = Field::new();
        let piece = Piece::new(PieceKind::I);
        assert!(field.can_place(&piece, 0, 18));
        assert!(!field.can_place(&piece, 0, 19));
        assert!(!field.can_place(&piece, -1, 0));
        assert!(!field.can_place(&piece, 7, 0));
        assert!(field.can_place(&piece, 6, 0));
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let mut field = Field::new();
        field.set(4, 1, PieceKind::O.cell_value());
        let piece = Piece::new(PieceKind::I);
        assert!(!field.can_place(&piece, 3, 0));
        assert!(field.can_place(&piece, 5, 0));
    }

    #[test]
    fn test_place_clips_outside_cells() {
        let mut field = Field::new();
        let piece = Piece::with_rotation(PieceKind::I, Rotation::East);
        field.place(&piece, 0, -2);
        assert_eq!(field.filled_count(), 2);
        assert_eq!(field.get(2, 0), Some(1));
        assert_eq!(field.get(2, 1), Some(1));
    }

    #[test]
    fn test_shift_down_keeps_upper_rows() {
        let mut field = Field::from_rows(&["T.........", "IIIIIIIIII"]);
        assert_eq!(field.clear_lines(), 1);
        assert_eq!(field.get(0, 19), Some(PieceKind::T.cell_value()));
        assert_eq!(field.filled_count(), 1);
    }

    #[test]
    fn test_full_rows_bottom_first() {
        let field = Field::from_rows(&["OOOOOOOOOO", "..........", "IIIIIIIIII"]);
        assert_eq!(field.full_rows().as_slice(), &[19, 17]);
    }

    #[test]
    fn test_write_grid_matches_cells() {
        let field = Field::from_rows(&["J........L"]);
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        field.write_grid(&mut grid);
        assert_eq!(grid[19][0], PieceKind::J.cell_value());
        assert_eq!(grid[19][9], PieceKind::L.cell_value());
        assert_eq!(grid[18], [0u8; WIDTH]);
    }
}
