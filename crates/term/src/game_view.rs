//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board row 0 is the bottom row, so it is drawn on the last screen row of the
//! frame. Pieces are drawn at their eased display position, which lets falls and
//! swaps show up as movement between frames.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BombColor, PieceColor, PieceKind, Position, TurnState};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for cursor brackets around the glyph.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen origin and size of the board frame (border included).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is the selected board cell, if any. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = snap.width as u16 * self.cell_w;
        let board_px_h = snap.height as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_px_w + 2,
            h: board_px_h + 2,
            rows: snap.height as u16,
        };

        let bg = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::default());

        if let Some(pos) = cursor {
            if pos.x >= 0 && pos.y >= 0 && (pos.x as u8) < snap.width && (pos.y as u8) < snap.height {
                self.draw_cursor(fb, frame, pos.x as u16, pos.y as u16);
            }
        }

        for y in 0..snap.height {
            for x in 0..snap.width {
                if snap.cell(x, y).is_none() {
                    self.put_glyph(fb, frame, x as u16, y as u16, '·', bg);
                }
            }
        }

        for cell in snap.cells.iter().flatten() {
            let (sx, sy) = (cell.display_x.round(), cell.display_y.round());
            if sx < 0.0 || sy < 0.0 || sx >= snap.width as f32 || sy >= snap.height as f32 {
                continue;
            }
            let (glyph, fg) = piece_glyph(&cell.kind);
            let mut style = CellStyle::new(fg, BOARD_BG);
            if cell.matched {
                style = style.bold();
            }
            self.put_glyph(fb, frame, sx as u16, sy as u16, glyph, style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Top-left screen coordinate of a board cell.
    fn cell_origin(&self, frame: Frame, x: u16, y: u16) -> (u16, u16) {
        let screen_row = frame.rows.saturating_sub(1).saturating_sub(y);
        (
            frame.x + 1 + x * self.cell_w,
            frame.y + 1 + screen_row * self.cell_h,
        )
    }

    fn put_glyph(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let (px, py) = self.cell_origin(frame, x, y);
        let keep_bg = fb.get(px + self.cell_w / 2, py + self.cell_h / 2).map(|c| c.style.bg);
        let style = CellStyle {
            bg: keep_bg.unwrap_or(style.bg),
            ..style
        };
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, ch, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let (px, py) = self.cell_origin(frame, x, y);
        let style = CellStyle::new(Rgb::new(255, 255, 255), CURSOR_BG).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        if self.cell_w >= 3 {
            let mid = py + self.cell_h / 2;
            fb.put_char(px, mid, '[', style);
            fb.put_char(px + self.cell_w - 1, mid, ']', style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h, .. } = frame;
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

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.displayed_score.round().max(0.0) as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        let state = match snap.state {
            TurnState::Move => "MOVE",
            TurnState::Wait => "WAIT",
        };
        fb.put_str(panel_x, y, state, value);
        y = y.saturating_add(2);

        if snap.cascade > 0 {
            fb.put_str(panel_x, y, "CASCADE", label);
            y = y.saturating_add(1);
            let end = fb.put_str(panel_x, y, "x", value);
            fb.put_u32(end, y, snap.cascade, value);
        }
    }
}

fn color_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Blue => Rgb::new(80, 120, 220),
        PieceColor::Green => Rgb::new(100, 220, 120),
        PieceColor::Red => Rgb::new(220, 80, 80),
        PieceColor::Purple => Rgb::new(200, 120, 220),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
    }
}

/// Glyph and foreground color for a piece.
pub fn piece_glyph(kind: &PieceKind) -> (char, Rgb) {
    match kind {
        PieceKind::Regular { color } => ('●', color_rgb(*color)),
        PieceKind::Bomb {
            color: BombColor::Any,
            ..
        } => ('✱', Rgb::new(255, 255, 255)),
        PieceKind::Bomb {
            color: BombColor::Color(color),
            ..
        } => ('◆', color_rgb(*color)),
    }
}
