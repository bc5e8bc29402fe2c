//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the terminal view and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: top-left of the 4x4 piece box at (3, 0)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame budget of the outer loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Drop interval at level 1 |
//! | `DROP_SPEEDUP_PER_LEVEL` | 0.1 | Fraction of the base interval removed per level |
//! | `MIN_DROP_FACTOR` | 0.05 | Floor of the interval factor (50ms) |
//!
//! # Examples
//!
//! ```
//! use tui_tetromino_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.cell_value(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square box every piece matrix lives in
pub const PIECE_MATRIX_SIZE: usize = 4;

/// Spawn column of the piece box: centered, `(10 - 4) / 2`
pub const SPAWN_X: i32 = (BOARD_WIDTH as i32 - PIECE_MATRIX_SIZE as i32) / 2;

/// Spawn row of the piece box
pub const SPAWN_Y: i32 = 0;

/// Locked cells in this many top rows end the game
pub const GAME_OVER_ROWS: u8 = 2;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines with one lock, multiplied by the level:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Horizontal offsets tried, in order, when a rotation is blocked
pub const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Frame budget of the outer loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Drop interval at level 1 in milliseconds
pub const BASE_DROP_MS: f64 = 1000.0;

/// Fraction of the base interval removed per level above 1
pub const DROP_SPEEDUP_PER_LEVEL: f64 = 0.1;

/// Lower bound of the interval factor (5% of the base interval)
pub const MIN_DROP_FACTOR: f64 = 0.05;

/// Value of an empty field cell
pub const EMPTY_CELL: Cell = 0;

/// Sentinel returned by cell queries outside the field
pub const OUT_OF_BOUNDS_CELL: i8 = -1;

/// A cell on the field: 0 is empty, `k` is a locked cell of the piece kind
/// with index `k - 1` (see [`PieceKind::cell_value`]).
pub type Cell = u8;

/// The seven tetromino piece kinds
///
/// The declaration order is significant: it defines [`PieceKind::index`] and
/// therefore the value written into the field when a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Zero-based index of the kind (I = 0 .. L = 6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at the given index, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Value written into the field for a locked cell of this kind
    ///
    /// ```
    /// use tui_tetromino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.cell_value(), 1);
    /// assert_eq!(PieceKind::L.cell_value(), 7);
    /// ```
    pub fn cell_value(self) -> Cell {
        self as Cell + 1
    }

    /// Kind of a locked field cell, `None` for empty or invalid values
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            0 => None,
            v => Self::from_index(v as usize - 1),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Uppercase display letter
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Rotation states of a piece
///
/// - **North**: spawn orientation (state 0)
/// - **East**: rotated 90° clockwise (state 1)
/// - **South**: rotated 180° (state 2)
/// - **West**: rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation state number in `0..4`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation for a state number, taken mod 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete player actions
///
/// An input poll yields `Option<GameAction>`; `None` means nothing happened.
/// `Quit` is handled by the outer loop and never changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Drop piece to the lowest feasible row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Pause while playing, resume while paused
    Pause,
    /// Leave the program
    Quit,
    /// Start a game from the menu (or after game over)
    Start,
    /// Restart after game over
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "quit" => Some(GameAction::Quit),
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
            GameAction::Start => "start",
            GameAction::Restart => "restart",
        }
    }
}

/// Discrete state of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Menu => "menu",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_column_is_centered() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn cell_values_round_trip_through_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_cell(kind.cell_value()), Some(kind));
        }
        assert_eq!(PieceKind::from_cell(EMPTY_CELL), None);
        assert_eq!(PieceKind::from_cell(8), None);
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(7), Rotation::West);
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
    }

    #[test]
    fn cw_then_ccw_is_identity() {
        for i in 0..4 {
            let r = Rotation::from_index(i);
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn action_names_parse_back() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Pause,
            GameAction::Quit,
            GameAction::Start,
            GameAction::Restart,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
