//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Pieces sit on the intersections of the grid, as on a real Xiangqi board.
//! Each intersection is `cell_w` columns apart horizontally and `cell_h` rows
//! apart vertically; the river band fills the gap between rows 4 and 5.

use crate::core::{GameSnapshot, SelectOutcome};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::types::{Piece, Script, Side, Square, BOARD_COLS, BOARD_ROWS, BLACK_RIVER_ROW};

const WOOD: Rgb = Rgb::new(210, 180, 140);
const LINE: Rgb = Rgb::new(90, 60, 30);
const RIVER: Rgb = Rgb::new(100, 149, 237);
const PALACE: Rgb = Rgb::new(170, 130, 20);
const MENU: Rgb = Rgb::new(128, 128, 128);
const STONE: Rgb = Rgb::new(245, 235, 215);
const RED_INK: Rgb = Rgb::new(200, 30, 30);
const BLACK_INK: Rgb = Rgb::new(20, 20, 20);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const SELECTED: Rgb = Rgb::new(255, 215, 0);
const TARGET: Rgb = Rgb::new(0, 150, 0);
const CAPTURE: Rgb = Rgb::new(130, 210, 130);
const CURSOR: Rgb = Rgb::new(0, 170, 200);

/// Cannon and soldier starting points, marked with small corner brackets.
const MARKER_POINTS: [(i8, i8); 14] = [
    (2, 1),
    (2, 7),
    (7, 1),
    (7, 7),
    (3, 0),
    (3, 2),
    (3, 4),
    (3, 6),
    (3, 8),
    (6, 0),
    (6, 2),
    (6, 4),
    (6, 6),
    (6, 8),
];

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

/// What a terminal cell points at, for mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Square(Square),
    ScriptToggle,
}

/// Where everything lands for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Row of the menu bar (turn indicator and script toggle)
    pub menu_y: u16,
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Terminal cell of intersection (0, 0)
    pub origin_x: u16,
    pub origin_y: u16,
    /// First column of the script toggle button on the menu bar
    pub toggle_x: u16,
    pub toggle_w: u16,
}

/// A lightweight terminal renderer for the Xiangqi board.
pub struct GameView {
    /// Columns between neighbouring intersections.
    cell_w: u16,
    /// Rows between neighbouring intersections.
    cell_h: u16,
    anchor_y: AnchorY,
    script: Script,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps the board roughly square and leaves room for double-width glyphs.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
            script: Script::Chinese,
        }
    }
}

impl GameView {
    /// Create a view with custom spacing. Widths below 3 cannot fit a CJK
    /// glyph plus a line segment, heights below 2 leave no room for the river.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(2),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn toggle_script(&mut self) {
        self.script = self.script.toggled();
    }

    /// Compute where the board sits inside `viewport`.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        // One spare column after the last intersection for a double-width glyph.
        let grid_w = (BOARD_COLS as u16 - 1) * self.cell_w + 2;
        let grid_h = (BOARD_ROWS as u16 - 1) * self.cell_h + 1;
        // Border plus one column of padding on each side.
        let frame_w = grid_w + 4;
        let frame_h = grid_h + 2;
        let total_h = frame_h + 1;

        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let menu_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let frame_y = menu_y + 1;

        let toggle_w = text_width(self.script.label()) + 2;
        let toggle_x = (frame_x + frame_w).saturating_sub(toggle_w + 1);

        BoardLayout {
            menu_y,
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            origin_x: frame_x + 2,
            origin_y: frame_y + 1,
            toggle_x,
            toggle_w,
        }
    }

    /// Terminal cell of an intersection.
    pub fn point(&self, layout: &BoardLayout, sq: Square) -> (u16, u16) {
        (
            layout.origin_x + sq.col() as u16 * self.cell_w,
            layout.origin_y + sq.row() as u16 * self.cell_h,
        )
    }

    /// Map a terminal cell (e.g. a mouse click) to what is drawn there.
    ///
    /// Clicks snap to the nearest intersection.
    pub fn hit_test(&self, viewport: Viewport, x: u16, y: u16) -> Option<HitTarget> {
        let layout = self.layout(viewport);
        if y == layout.menu_y && (layout.toggle_x..layout.toggle_x + layout.toggle_w).contains(&x) {
            return Some(HitTarget::ScriptToggle);
        }

        let dx = x as i32 - layout.origin_x as i32;
        let dy = y as i32 - layout.origin_y as i32;
        let cw = self.cell_w as i32;
        let ch = self.cell_h as i32;
        let col = (dx + cw / 2).div_euclid(cw);
        let row = (dy + ch / 2).div_euclid(ch);
        let row = i8::try_from(row).ok()?;
        let col = i8::try_from(col).ok()?;
        Square::new(row, col).ok().map(HitTarget::Square)
    }

    /// Board square under a terminal cell, ignoring the menu bar.
    pub fn square_at(&self, viewport: Viewport, x: u16, y: u16) -> Option<Square> {
        match self.hit_test(viewport, x, y) {
            Some(HitTarget::Square(sq)) => Some(sq),
            _ => None,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let layout = self.layout(viewport);
        let board_style = CellStyle::new(LINE, WOOD);

        self.draw_menu_bar(fb, snap, &layout);

        fb.fill_rect(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            ' ',
            board_style,
        );
        self.draw_border(fb, &layout, board_style.bold());
        self.draw_grid(fb, &layout, board_style);
        self.draw_river(fb, &layout);
        self.draw_palaces(fb, &layout);
        self.draw_markers(fb, &layout);

        for sq in Square::all() {
            if let Some(piece) = snap.cell(sq) {
                self.draw_piece(fb, &layout, sq, piece);
            }
        }

        // Highlights, in increasing priority.
        for &sq in snap.valid_moves.iter() {
            if snap.cell(sq).is_some() {
                self.tint_point(fb, &layout, sq, CAPTURE);
            } else {
                let (px, py) = self.point(&layout, sq);
                fb.put_char(px, py, 'o', CellStyle::new(TARGET, WOOD).bold());
            }
        }
        if let Some(sq) = snap.selected {
            self.tint_point(fb, &layout, sq, SELECTED);
        }
        self.tint_point(fb, &layout, snap.cursor, CURSOR);

        self.draw_side_panel(fb, snap, viewport, &layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_menu_bar(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &BoardLayout) {
        let bar = CellStyle::new(BLACK_INK, MENU);
        fb.fill_rect(layout.frame_x, layout.menu_y, layout.frame_w, 1, ' ', bar);

        let ink = match snap.turn {
            Side::Red => RED_INK,
            Side::Black => BLACK_INK,
        };
        let turn = CellStyle::new(ink, MENU).bold();
        fb.put_str(layout.frame_x + 1, layout.menu_y, "Turn: ", turn);
        fb.put_str(layout.frame_x + 7, layout.menu_y, snap.turn.label(), turn);

        let button = CellStyle::new(BLACK_INK, WHITE);
        fb.fill_rect(layout.toggle_x, layout.menu_y, layout.toggle_w, 1, ' ', button);
        fb.put_str(layout.toggle_x + 1, layout.menu_y, self.script.label(), button);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╔', style);
        fb.put_char(x + w - 1, y, '╗', style);
        fb.put_char(x, y + h - 1, '╚', style);
        fb.put_char(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '═', style);
            fb.put_char(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '║', style);
            fb.put_char(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
        let last_row = BOARD_ROWS as i8 - 1;
        let last_col = BOARD_COLS as i8 - 1;

        for sq in Square::all() {
            let (r, c) = (sq.row(), sq.col());
            let (px, py) = self.point(layout, sq);
            let inner_col = c > 0 && c < last_col;

            let up = r > 0 && !(r == BLACK_RIVER_ROW + 1 && inner_col);
            let down = r < last_row && !(r == BLACK_RIVER_ROW && inner_col);
            let left = c > 0;
            let right = c < last_col;
            fb.put_char(px, py, junction(up, down, left, right), style);

            if right {
                for dx in 1..self.cell_w {
                    fb.put_char(px + dx, py, '─', style);
                }
            }
            if down {
                for dy in 1..self.cell_h {
                    fb.put_char(px, py + dy, '│', style);
                }
            }
        }
    }

    fn draw_river(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let left = layout.origin_x + 1;
        let right = layout.origin_x + (BOARD_COLS as u16 - 1) * self.cell_w;
        let width = right.saturating_sub(left);
        let top = layout.origin_y + BLACK_RIVER_ROW as u16 * self.cell_h + 1;
        let height = self.cell_h - 1;

        let water = CellStyle::new(WHITE, RIVER).bold();
        fb.fill_rect(left, top, width, height, ' ', water);

        let label_y = top + (height - 1) / 2;
        match self.script {
            Script::Chinese => {
                let chu = "楚河";
                let han = "漢界";
                let quarter = width / 4;
                fb.put_str(
                    left + quarter.saturating_sub(text_width(chu) / 2),
                    label_y,
                    chu,
                    water,
                );
                fb.put_str(
                    left + (3 * quarter).saturating_sub(text_width(han) / 2),
                    label_y,
                    han,
                    water,
                );
            }
            Script::English => {
                let text = "RIVER";
                fb.put_str(
                    left + (width.saturating_sub(text_width(text))) / 2,
                    label_y,
                    text,
                    water,
                );
            }
        }
    }

    fn draw_palaces(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let style = CellStyle::new(PALACE, WOOD).bold();
        for side in [Side::Black, Side::Red] {
            let (top, _) = side.palace_rows();
            for r in 0..2i8 {
                for c in 0..2i8 {
                    let Ok(sq) = Square::new(top + r, 3 + c) else {
                        continue;
                    };
                    let (px, py) = self.point(layout, sq);
                    // Both diagonals run through the palace centre.
                    let ch = if r == c { '╲' } else { '╱' };
                    fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, ch, style);
                }
            }
        }
    }

    /// Corner brackets in the diagonal cells around each marker point.
    ///
    /// Brackets that would fall past a board edge are left out.
    fn draw_markers(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let style = CellStyle::new(LINE, WOOD);
        let last_row = BOARD_ROWS as i8 - 1;
        let last_col = BOARD_COLS as i8 - 1;

        for (row, col) in MARKER_POINTS {
            let Ok(sq) = Square::new(row, col) else {
                continue;
            };
            let (px, py) = self.point(layout, sq);
            let (left, right) = (col > 0, col < last_col);
            let (up, down) = (row > 0, row < last_row);

            if up && left {
                fb.put_char(px.saturating_sub(1), py.saturating_sub(1), '┌', style);
            }
            if up && right {
                fb.put_char(px + 1, py.saturating_sub(1), '┐', style);
            }
            if down && left {
                fb.put_char(px.saturating_sub(1), py + 1, '└', style);
            }
            if down && right {
                fb.put_char(px + 1, py + 1, '┘', style);
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, layout: &BoardLayout, sq: Square, piece: Piece) {
        let ink = match piece.side {
            Side::Red => RED_INK,
            Side::Black => BLACK_INK,
        };
        let style = CellStyle::new(ink, STONE).bold();
        let (px, py) = self.point(layout, sq);
        match self.script {
            Script::Chinese => fb.put_wide_char(px, py, piece.chinese_char(), style),
            Script::English => fb.put_char(px, py, piece.kind.letter(), style),
        }
    }

    /// Recolour the background of an intersection (both halves of a wide glyph).
    fn tint_point(&self, fb: &mut FrameBuffer, layout: &BoardLayout, sq: Square, bg: Rgb) {
        let (px, py) = self.point(layout, sq);
        if let Some(cell) = fb.get(px, py) {
            fb.put_char(px, py, cell.ch, cell.style.on(bg));
        }
        if let Some(next) = fb.get(px + 1, py) {
            if next.is_continuation() {
                fb.put_char(px + 1, py, next.ch, next.style.on(bg));
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 16 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            bold: false,
            ..label
        };

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for (key, what) in [
            ("arrows", "move cursor"),
            ("enter", "select/move"),
            ("esc", "cancel"),
            ("tab", "script"),
            ("r", "restart"),
            ("q", "quit"),
        ] {
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 8, y, what, CellStyle { dim: true, ..value });
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "LAST", label);
        y = y.saturating_add(1);
        let status = match snap.last_outcome {
            Some(SelectOutcome::Selected(sq)) => format!("picked {}", sq),
            Some(SelectOutcome::Moved { mv, captured: Some(p) }) => {
                format!("{} x{}", mv, p.glyph(self.script))
            }
            Some(SelectOutcome::Moved { mv, captured: None }) => mv.to_string(),
            Some(SelectOutcome::Rejected(_)) => "illegal move".to_string(),
            Some(SelectOutcome::Ignored) | None => "-".to_string(),
        };
        fb.put_str(panel_x, y, &status, value);
    }
}

/// Box-drawing junction for an intersection with the given line stubs.
fn junction(up: bool, down: bool, left: bool, right: bool) -> char {
    match (up, down, left, right) {
        (false, true, false, true) => '┌',
        (false, true, true, false) => '┐',
        (true, false, false, true) => '└',
        (true, false, true, false) => '┘',
        (false, true, true, true) => '┬',
        (true, false, true, true) => '┴',
        (true, true, false, true) => '├',
        (true, true, true, false) => '┤',
        (true, true, true, true) => '┼',
        _ => '·',
    }
}
