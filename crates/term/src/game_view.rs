//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{occupied_cells, shape_matrix, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, SessionState, BOARD_HEIGHT, BOARD_WIDTH, PIECE_MATRIX_SIZE};

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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Key help shown on the menu overlay and under the side panel
const CONTROLS: [&str; 6] = [
    "←→ / A D  move",
    "↓ / S     down",
    "↑ W Z / X rotate",
    "SPACE     drop",
    "P pause  R restart",
    "Q quit",
];

/// Where the board frame sits, computed once per frame
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// Board renderer: 10x20 cells plus side panel and state overlays
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is resized to the
    /// viewport when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        self.draw_board(fb, snap, layout);
        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.state {
            SessionState::Menu => self.draw_menu(fb, layout),
            SessionState::Paused => {
                self.draw_overlay(fb, layout, &["PAUSED", "", "P to resume"]);
            }
            SessionState::GameOver => self.draw_game_over(fb, snap, layout),
            SessionState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(fb, layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                match PieceKind::from_cell(cell) {
                    Some(kind) => self.fill_cell(fb, layout, x as i32, y as i32, '█', piece_style(kind)),
                    None => self.fill_cell(fb, layout, x as i32, y as i32, '·', empty),
                }
            }
        }

        let Some(current) = snap.current else {
            return;
        };
        let matrix = shape_matrix(current.kind, current.rotation);

        if let Some(ghost_y) = snap.ghost_y {
            if ghost_y != current.y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                for (dx, dy) in occupied_cells(matrix) {
                    self.fill_cell(fb, layout, current.x + dx, ghost_y + dy, '░', ghost);
                }
            }
        }

        let style = piece_style(current.kind).bold();
        for (dx, dy) in occupied_cells(matrix) {
            self.fill_cell(fb, layout, current.x + dx, current.y + dy, '█', style);
        }
    }

    /// Paint board cell (x, y); cells outside the board (such as rows above
    /// the top) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: i32, y: i32, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        let px = layout.x + 1 + x as u16 * self.cell_w;
        let py = layout.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = layout.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let matrix = shape_matrix(kind, Rotation::North);
            let style = piece_style(kind);
            for (dx, dy) in occupied_cells(matrix) {
                let px = panel_x + dx as u16 * self.cell_w;
                fb.fill_rect(px, y + dy as u16 * self.cell_h, self.cell_w, self.cell_h, '█', style);
            }
        }
        y = y.saturating_add(PIECE_MATRIX_SIZE as u16 * self.cell_h + 1);

        let help = value.dim();
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, layout: Layout) {
        let mut lines = [""; 3 + CONTROLS.len()];
        lines[0] = "TETRIS";
        lines[2] = "ENTER to start";
        // The controls are also on the side panel; narrow terminals only see them here.
        lines[3..].copy_from_slice(&CONTROLS);
        self.draw_overlay(fb, layout, &lines);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        self.draw_overlay(fb, layout, &["GAME OVER", "", "", "R to restart"]);

        let style = overlay_style();
        let mid = layout.y + layout.frame_h / 2;
        let score_y = mid.saturating_sub(2) + 2;
        let digits = digit_count(snap.score);
        let text_w = 6 + digits;
        let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
        let x = fb.put_str(x, score_y, "SCORE ", style);
        fb.put_u32(x, score_y, snap.score, style);
    }

    /// Center `lines` vertically and horizontally over the board frame
    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: Layout, lines: &[&str]) {
        let style = overlay_style();
        let inner_w = layout.frame_w - 2;
        let top = (layout.y + layout.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as u16;
            fb.fill_rect(layout.x + 1, y, inner_w, 1, ' ', style);
            if !line.is_empty() {
                fb.put_str_centered(layout.x + 1, inner_w, y, line, style);
            }
        }
    }
}

fn overlay_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, BOARD_BG)
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
