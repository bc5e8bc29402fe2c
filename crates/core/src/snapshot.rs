use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, Rotation, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

/// Grid of cell values, `[row][col]`, row 0 at the top
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl PieceSnapshot {
    pub fn piece(&self) -> Piece {
        Piece::with_rotation(self.kind, self.rotation)
    }
}

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceKind>,
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: None,
            ghost_y: None,
            score: 0,
            level: 1,
            lines: 0,
            state: SessionState::Menu,
        }
    }
}
