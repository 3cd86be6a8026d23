//! Framebuffer and style types for terminal rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker stored in the cell right after a double-width glyph.
///
/// The renderer prints nothing for it; the terminal already advanced the
/// cursor by two columns when it printed the glyph.
pub const WIDE_CONTINUATION: char = '\0';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn on(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn is_continuation(&self) -> bool {
        self.ch == WIDE_CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Put a double-width glyph (CJK) covering `x` and `x + 1`.
    ///
    /// Dropped entirely if the second column would fall off the buffer.
    pub fn put_wide_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if x.saturating_add(1) >= self.width {
            return;
        }
        self.put_char(x, y, ch, style);
        self.put_char(x + 1, y, WIDE_CONTINUATION, style);
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            if is_wide(ch) {
                self.put_wide_char(cx, y, ch, style);
                cx = cx.saturating_add(2);
            } else {
                self.put_char(cx, y, ch, style);
                cx = cx.saturating_add(1);
            }
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Row `y` as plain text, skipping wide-glyph continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }
}

/// Display width of `s` in terminal columns.
pub fn text_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// Whether a glyph takes two terminal columns.
pub fn is_wide(ch: char) -> bool {
    UnicodeWidthChar::width(ch) == Some(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_take_two_cells() {
        let mut fb = FrameBuffer::new(6, 1);
        let style = CellStyle::default();
        fb.put_str(0, 0, "楚a河", style);

        assert_eq!(fb.get(0, 0).unwrap().ch, '楚');
        assert!(fb.get(1, 0).unwrap().is_continuation());
        assert_eq!(fb.get(2, 0).unwrap().ch, 'a');
        assert_eq!(fb.get(3, 0).unwrap().ch, '河');
        assert_eq!(fb.row_text(0), "楚a河 ");
    }

    #[test]
    fn wide_char_at_right_edge_is_dropped() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_wide_char(2, 0, '車', CellStyle::default());
        assert_eq!(fb.get(2, 0).unwrap().ch, ' ');
    }

    #[test]
    fn wide_detection_covers_supplementary_planes() {
        assert!(is_wide('帥'));
        assert!(is_wide('\u{20000}'));
        assert!(is_wide('\u{1F004}'));
        assert!(!is_wide('G'));
        assert!(!is_wide('─'));
    }

    #[test]
    fn text_width_counts_cjk_double() {
        assert_eq!(text_width("English"), 7);
        assert_eq!(text_width("中文"), 4);
        assert_eq!(text_width("楚河 漢界"), 9);
    }
}
