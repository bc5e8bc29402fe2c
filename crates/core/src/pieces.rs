//! Pieces module - tetromino shape tables and the `Piece` value type
//!
//! Every (kind, rotation) pair maps to a precomputed 4x4 occupancy matrix.
//! The matrices are a bounding box, not the tight piece bounds, so up to two
//! rows and columns of each box stay empty. Rotation is a table lookup; shapes
//! are never derived analytically.

use crate::rng::PieceSource;
use crate::types::{PieceKind, Rotation, PIECE_MATRIX_SIZE};

/// 4x4 occupancy matrix, indexed `[row][col]`
pub type PieceMatrix = [[bool; PIECE_MATRIX_SIZE]; PIECE_MATRIX_SIZE];

/// Four rotation states of one kind, in `Rotation::index` order
type RotationTable = [PieceMatrix; 4];

/// Matrix with no occupied cell
pub const EMPTY_MATRIX: PieceMatrix = [[false; PIECE_MATRIX_SIZE]; PIECE_MATRIX_SIZE];

const fn m(rows: [[u8; PIECE_MATRIX_SIZE]; PIECE_MATRIX_SIZE]) -> PieceMatrix {
    let mut out = EMPTY_MATRIX;
    let mut r = 0;
    while r < PIECE_MATRIX_SIZE {
        let mut c = 0;
        while c < PIECE_MATRIX_SIZE {
            out[r][c] = rows[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    out
}

const I_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    m([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    m([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const O_SHAPE: PieceMatrix = m([[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]]);

const O_SHAPES: RotationTable = [O_SHAPE, O_SHAPE, O_SHAPE, O_SHAPE];

const T_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0]]),
];

const S_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0]]),
    m([[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0]]),
];

const Z_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    m([[0, 0, 0, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0]]),
];

const J_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
    m([[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]]),
];

const L_SHAPES: RotationTable = [
    m([[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
    m([[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0]]),
    m([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0]]),
    m([[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

/// Get the occupancy matrix for a piece kind and rotation
pub fn shape_matrix(kind: PieceKind, rotation: Rotation) -> &'static PieceMatrix {
    let table = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    &table[rotation.index()]
}

/// Iterate the occupied `(col, row)` offsets of a matrix, row-major
pub fn occupied_cells(matrix: &PieceMatrix) -> impl Iterator<Item = (i32, i32)> + '_ {
    matrix.iter().enumerate().flat_map(|(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(col, _)| (col as i32, row as i32))
    })
}

/// A tetromino: kind plus rotation state
///
/// The matrix is looked up from the static tables, so a `Piece` is a small
/// `Copy` value and rotating it never fails. Whether the rotated piece fits on
/// a field is the session's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
}

impl Piece {
    /// Create a piece in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    /// Create a piece with an explicit rotation
    pub fn with_rotation(kind: PieceKind, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    /// Draw one kind from `source` and build a spawn-oriented piece
    pub fn random<S: PieceSource + ?Sized>(source: &mut S) -> Self {
        Self::new(source.next_kind())
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Rotation state number in `0..4`
    pub fn rotation_state(&self) -> u8 {
        self.rotation.index() as u8
    }

    pub fn matrix(&self) -> &'static PieceMatrix {
        shape_matrix(self.kind, self.rotation)
    }

    /// Occupied `(col, row)` offsets inside the 4x4 box
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        occupied_cells(self.matrix())
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Copy of this piece rotated clockwise
    pub fn rotated_cw(&self) -> Self {
        let mut p = *self;
        p.rotate_cw();
        p
    }

    /// Copy of this piece rotated counter-clockwise
    pub fn rotated_ccw(&self) -> Self {
        let mut p = *self;
        p.rotate_ccw();
        p
    }
}
