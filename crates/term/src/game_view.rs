//! GameView: draws a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. The grid size comes from the snapshot, so any configured
//! field size renders without changes here.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, EMPTY};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

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

pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the field frame plus its outer size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
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

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let field_w = snap.width.saturating_mul(self.cell_w);
        let field_h = snap.height.saturating_mul(self.cell_h);
        let frame_w = field_w.saturating_add(2);
        let frame_h = field_h.saturating_add(2);

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), FIELD_BG);
        fb.fill_rect(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            field_w,
            field_h,
            ' ',
            bg,
        );
        self.draw_border(fb, frame);

        // Locked cells carry no kind, so they share one color.
        let locked = CellStyle::new(Rgb::new(170, 170, 180), FIELD_BG);
        let empty = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        for row in 0..snap.height {
            for col in 0..snap.width {
                match snap.cell(usize::from(row), usize::from(col)) {
                    Some(v) if v != EMPTY => {
                        self.fill_cell_rect(fb, frame, col, row, '█', locked);
                    }
                    _ => self.fill_cell_rect(fb, frame, col, row, '·', empty),
                }
            }
        }

        if let Some(active) = &snap.active {
            let style = CellStyle::new(piece_color(active.kind), FIELD_BG).bold();
            for (row, col) in active.cells() {
                if row >= 0 && col >= 0 && row < i32::from(snap.height) && col < i32::from(snap.width)
                {
                    self.fill_cell_rect(fb, frame, col as u16, row as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            let mid = frame.y.saturating_add(frame.h / 2);
            self.draw_overlay_text(fb, frame, mid, "GAME OVER");
            self.draw_overlay_text(fb, frame, mid.saturating_add(1), "R to restart");
        }
    }

    /// Allocating variant of [`GameView::render_into`].
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

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

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame
            .x
            .saturating_add(1)
            .saturating_add(col.saturating_mul(self.cell_w));
        let py = frame
            .y
            .saturating_add(1)
            .saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let entries = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("SPEED ms", snap.tick_interval_ms),
        ];
        let mut y = frame.y;
        for (name, v) in entries {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
