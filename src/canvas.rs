//! Logical 2-D buffer with a scrolling viewport and differential flush.
//!
//! A `Canvas` owns two grids — `current` (everything writes go here) and
//! `last_flushed` (only `refresh()` touches this one). `refresh()` walks both
//! grids, batches runs of cells sharing a style triple, and returns them as
//! [`CellRun`]s for a driver to render; `last_flushed` is then overwritten
//! with `current` so the next refresh only reports genuinely new changes.

use crate::cell::{Attr, Cell, Colour, StyleTriple, WIDE_CONTINUATION};
use unicode_width::UnicodeWidthChar;

/// A contiguous run of cells on one row sharing a style, as emitted by
/// [`Canvas::refresh`] for the driver to paint in one shot.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRun {
    pub x: u16,
    pub y: u16,
    pub style: StyleTriple,
    pub text: String,
}

/// A 2-D grid of [`Cell`]s with a buffer taller than the visible region, to
/// support scroll-back.
pub struct Canvas {
    width: u16,
    height: u16,
    buffer_height: u16,
    start_line: u16,
    last_start_line: u16,
    origin: (i32, i32),
    unicode_aware: bool,
    current: Vec<Cell>,
    last_flushed: Vec<Cell>,
    cursor: (i32, i32),
}

impl Canvas {
    /// Construct a canvas. `buffer_height` is clamped to be at least
    /// `height`, per the invariant in the data model.
    pub fn new(width: u16, height: u16, buffer_height: u16, unicode_aware: bool) -> Self {
        let buffer_height = buffer_height.max(height).max(1);
        let width = width.max(1);
        let size = width as usize * buffer_height as usize;
        Canvas {
            width,
            height,
            buffer_height,
            start_line: 0,
            last_start_line: 0,
            origin: (0, 0),
            unicode_aware,
            current: vec![Cell::default(); size],
            last_flushed: vec![Cell::default(); size],
            cursor: (0, 0),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn buffer_height(&self) -> u16 {
        self.buffer_height
    }

    pub fn start_line(&self) -> u16 {
        self.start_line
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin = (x, y);
    }

    pub fn unicode_aware(&self) -> bool {
        self.unicode_aware
    }

    /// Whether row `y` (in buffer coordinates) is currently scrolled into
    /// view.
    pub fn is_visible(&self, y: i32) -> bool {
        y >= self.start_line as i32 && y < self.start_line as i32 + self.height as i32
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn in_buffer(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.buffer_height as i32
    }

    /// Character width under this canvas's width-awareness setting: 1 if
    /// not unicode-aware (every character occupies one cell), else the
    /// East-Asian-Width-derived value (0, 1 or 2; 0 collapses to 1 so a
    /// combining mark does not vanish from the grid).
    fn char_width(&self, ch: char) -> u16 {
        if !self.unicode_aware {
            return 1;
        }
        UnicodeWidthChar::width(ch).unwrap_or(0).max(1) as u16
    }

    /// Return the cell at `(x, y)` in buffer coordinates, or a blank
    /// sentinel cell if the position is off-grid.
    pub fn get_from(&self, x: i32, y: i32) -> Cell {
        if self.in_buffer(x, y) {
            self.current[self.index(x as u16, y as u16)]
        } else {
            Cell::default()
        }
    }

    /// Write `text` starting at `(x, y)` in buffer coordinates with the given
    /// style. Characters that fall entirely outside `[0, width) x
    /// [start_line, start_line + height)` are dropped; a character that
    /// straddles the right edge is never emitted (its left neighbour in the
    /// string still renders, the oversized glyph itself is clipped).
    ///
    /// When `transparent` is set, space characters in `text` do not
    /// overwrite the existing cell underneath them.
    pub fn print_at(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        fg: Colour,
        attr: Attr,
        bg: Colour,
        transparent: bool,
    ) {
        if y < self.start_line as i32 || y >= self.start_line as i32 + self.height as i32 {
            return;
        }
        if !self.in_buffer(0, y) {
            return;
        }
        let style = StyleTriple::new(fg, attr, bg);
        let mut cx = x;
        for ch in text.chars() {
            let w = self.char_width(ch);
            if cx < 0 {
                cx += w as i32;
                continue;
            }
            if cx >= self.width as i32 {
                break;
            }
            // Partial clip: a double-width glyph that would spill past the
            // right edge is dropped entirely rather than torn in half.
            if cx + w as i32 > self.width as i32 {
                cx += w as i32;
                continue;
            }
            if transparent && ch == ' ' {
                cx += w as i32;
                continue;
            }
            let idx = self.index(cx as u16, y as u16);
            self.current[idx] = Cell::new(ch, style);
            if w == 2 {
                self.current[idx + 1] = Cell::new(WIDE_CONTINUATION, style);
            }
            cx += w as i32;
        }
    }

    /// Like [`Canvas::print_at`] but each character may override fg/attr/bg
    /// via a parallel map of partial style patches; entries of `None` fall
    /// back to the base `fg`/`attr`/`bg` arguments.
    pub fn paint(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        fg: Colour,
        attr: Attr,
        bg: Colour,
        colour_map: Option<&[StyleTriple]>,
    ) {
        if y < self.start_line as i32 || y >= self.start_line as i32 + self.height as i32 {
            return;
        }
        let base = StyleTriple::new(fg, attr, bg);
        let mut cx = x;
        for (i, ch) in text.chars().enumerate() {
            let w = self.char_width(ch);
            if cx < 0 {
                cx += w as i32;
                continue;
            }
            if cx >= self.width as i32 || cx + w as i32 > self.width as i32 {
                cx += w as i32;
                continue;
            }
            let style = match colour_map.and_then(|m| m.get(i)) {
                Some(patch) => base.overlay(Some(patch.fg), Some(patch.attr), Some(patch.bg)),
                None => base,
            };
            let idx = self.index(cx as u16, y as u16);
            self.current[idx] = Cell::new(ch, style);
            if w == 2 {
                self.current[idx + 1] = Cell::new(WIDE_CONTINUATION, style);
            }
            cx += w as i32;
        }
    }

    /// Fill a rectangle of the buffer with blank cells of the given style.
    pub fn clear_buffer(&mut self, fg: Colour, attr: Attr, bg: Colour, x: i32, y: i32, w: i32, h: i32) {
        let style = StyleTriple::new(fg, attr, bg);
        for row in y..y + h {
            if !self.in_buffer(0, row) {
                continue;
            }
            for col in x..x + w {
                if col < 0 || col >= self.width as i32 {
                    continue;
                }
                let idx = self.index(col as u16, row as u16);
                self.current[idx] = Cell::blank(style);
            }
        }
    }

    /// Shift the visible viewport by `delta` rows (positive scrolls down,
    /// i.e. towards later content). The viewport is clamped to
    /// `[0, buffer_height - height]`; content above `start_line` remains in
    /// the buffer but is not drawn.
    pub fn scroll(&mut self, delta: i32) {
        let max_start = self.buffer_height.saturating_sub(self.height) as i32;
        let new_start = (self.start_line as i32 + delta).clamp(0, max_start.max(0));
        self.start_line = new_start as u16;
    }

    pub fn scroll_to(&mut self, line: u16) {
        let max_start = self.buffer_height.saturating_sub(self.height);
        self.start_line = line.min(max_start);
    }

    /// Move the stateful line-drawing cursor without drawing.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    /// Draw a line from the stateful cursor to `(x, y)` using Bresenham's
    /// algorithm, then update the cursor to `(x, y)`.
    ///
    /// When `thin` is set and the canvas is unicode-aware, the line is drawn
    /// at twice the vertical resolution using half-block glyphs so that two
    /// logical "pixels" share one character cell.
    pub fn draw(&mut self, x: i32, y: i32, ch: char, fg: Colour, bg: Colour, thin: bool) {
        let (x0, y0) = self.cursor;
        if thin && self.unicode_aware {
            self.draw_thin(x0, y0, x, y, fg, bg);
        } else {
            self.draw_bresenham(x0, y0, x, y, ch, StyleTriple::new(fg, Attr::NORMAL, bg));
        }
        self.cursor = (x, y);
    }

    fn draw_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ch: char, style: StyleTriple) {
        let (mut x0, mut y0) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if self.in_buffer(x0, y0) && self.is_visible(y0) {
                let idx = self.index(x0 as u16, y0 as u16);
                self.current[idx] = Cell::new(ch, style);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Half-block two-pixels-per-cell line drawing: each cell covers two
    /// vertical sub-rows, rendered with `▀`/`▄`/`█` as appropriate.
    fn draw_thin(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, fg: Colour, bg: Colour) {
        // Sub-pixel space doubles the vertical resolution; two sub-rows
        // share one cell row (sub_y / 2).
        let (sx0, sy0, sx1, sy1) = (x0, y0 * 2, x1, y1 * 2);
        let dx = (sx1 - sx0).abs();
        let dy = -(sy1 - sy0).abs();
        let sx = if sx0 < sx1 { 1 } else { -1 };
        let sy = if sy0 < sy1 { 1 } else { -1 };
        let (mut cx, mut cy) = (sx0, sy0);
        let mut err = dx + dy;
        loop {
            let cell_y = cy.div_euclid(2);
            let top_half = cy.rem_euclid(2) == 0;
            if self.in_buffer(cx, cell_y) && self.is_visible(cell_y) {
                let idx = self.index(cx as u16, cell_y as u16);
                let existing = self.current[idx];
                let glyph = if existing.ch == '\u{2580}' || existing.ch == '\u{2584}' {
                    '\u{2588}'
                } else if top_half {
                    '\u{2580}'
                } else {
                    '\u{2584}'
                };
                self.current[idx] = Cell::new(glyph, StyleTriple::new(fg, Attr::NORMAL, bg));
            }
            if cx == sx1 && cy == sy1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Scan-line fill of a polygon using the even-odd rule. Vertex
    /// coordinates may be fractional; each output row corresponds to one
    /// character row (full cell height).
    pub fn fill_polygon(&mut self, vertices: &[(f64, f64)], fg: Colour, bg: Colour) {
        if vertices.len() < 3 {
            return;
        }
        let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min).floor() as i32;
        let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i32;
        let style = StyleTriple::new(fg, Attr::NORMAL, bg);
        for y in min_y..=max_y {
            let yf = y as f64 + 0.5;
            let mut xs = Vec::new();
            let n = vertices.len();
            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];
                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let t = (yf - y1) / (y2 - y1);
                    xs.push(x1 + t * (x2 - x1));
                }
            }
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.chunks(2) {
                if pair.len() < 2 {
                    continue;
                }
                let x_start = pair[0].round() as i32;
                let x_end = pair[1].round() as i32;
                for x in x_start..x_end {
                    if self.in_buffer(x, y) && self.is_visible(y) {
                        let idx = self.index(x as u16, y as u16);
                        self.current[idx] = Cell::blank(style);
                    }
                }
            }
        }
    }

    /// Apply a colour wash over a region, preserving existing glyphs.
    /// `blend` is a percentage (0-100) used by callers to pick an
    /// intermediate palette entry; Stagecraft has no true alpha blending so
    /// `blend >= 50` swaps to the requested colours, otherwise the existing
    /// style is kept (a best-effort two-step approximation matching the
    /// "best-effort width handling" spirit of the spec's Non-goals).
    pub fn highlight(&mut self, x: i32, y: i32, w: i32, h: i32, fg: Colour, bg: Colour, blend: u8) {
        if blend < 50 {
            return;
        }
        for row in y..y + h {
            if !self.in_buffer(0, row) || !self.is_visible(row) {
                continue;
            }
            for col in x..x + w {
                if col < 0 || col >= self.width as i32 {
                    continue;
                }
                let idx = self.index(col as u16, row as u16);
                let cell = self.current[idx];
                self.current[idx] = Cell::new(cell.ch, StyleTriple::new(fg, cell.style.attr, bg));
            }
        }
    }

    /// Compute the diff between `current` and `last_flushed` restricted to
    /// the visible window `[start_line, start_line + height)`, translating
    /// each row to screen-relative coordinates (row `start_line` becomes
    /// screen row 0) and batching same-style runs, then copy `current` into
    /// `last_flushed`. On return, `current == last_flushed`.
    ///
    /// If the viewport scrolled since the last flush, every cell in the new
    /// window is reported regardless of whether its content happens to
    /// match `last_flushed` at that buffer row — the driver has never
    /// painted that content at its new screen row, so a buffer-level match
    /// is not a screen-level match.
    pub fn refresh(&mut self) -> Vec<CellRun> {
        let mut runs = Vec::new();
        let end_line = (self.start_line as u32 + self.height as u32).min(self.buffer_height as u32) as u16;
        let scrolled = self.last_start_line != self.start_line;
        for y in self.start_line..end_line {
            let screen_y = y - self.start_line;
            let mut run: Option<CellRun> = None;
            for x in 0..self.width {
                let idx = self.index(x, y);
                let cur = self.current[idx];
                let old = self.last_flushed[idx];
                if !scrolled && cur == old {
                    if let Some(r) = run.take() {
                        runs.push(r);
                    }
                    continue;
                }
                if cur.is_wide_continuation() {
                    // Part of the previous (already-emitted) glyph; just
                    // extend the text so the driver overwrites it too.
                    if let Some(r) = run.as_mut() {
                        if r.style == cur.style {
                            r.text.push(cur.ch);
                            continue;
                        }
                    }
                }
                match run.as_mut() {
                    Some(r) if r.style == cur.style && r.x as usize + r.text.chars().count() == x as usize => {
                        r.text.push(cur.ch);
                    }
                    _ => {
                        if let Some(r) = run.take() {
                            runs.push(r);
                        }
                        run = Some(CellRun {
                            x,
                            y: screen_y,
                            style: cur.style,
                            text: cur.ch.to_string(),
                        });
                    }
                }
            }
            if let Some(r) = run.take() {
                runs.push(r);
            }
        }
        self.last_flushed.copy_from_slice(&self.current);
        self.last_start_line = self.start_line;
        runs
    }

    /// Force the next `refresh()` to report every cell as changed, by
    /// desynchronising `last_flushed` from `current`.
    pub fn force_update(&mut self) {
        for cell in self.last_flushed.iter_mut() {
            *cell = Cell::new(WIDE_CONTINUATION, StyleTriple::new(Colour::Indexed(250), Attr::NORMAL, Colour::Indexed(250)));
        }
    }

    pub fn resize(&mut self, width: u16, height: u16, buffer_height: u16) {
        let buffer_height = buffer_height.max(height).max(1);
        let width = width.max(1);
        let size = width as usize * buffer_height as usize;
        self.width = width;
        self.height = height;
        self.buffer_height = buffer_height;
        self.start_line = 0;
        self.last_start_line = 0;
        self.current = vec![Cell::default(); size];
        self.last_flushed = vec![Cell::default(); size];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_at_then_read_back_round_trips() {
        let mut c = Canvas::new(10, 5, 5, true);
        c.print_at("X", 2, 1, Colour::RED, Attr::BOLD, Colour::BLUE, false);
        let cell = c.get_from(2, 1);
        assert_eq!(cell.ch, 'X');
        assert_eq!(cell.style.fg, Colour::RED);
        assert_eq!(cell.style.bg, Colour::BLUE);
    }

    #[test]
    fn double_flush_is_idempotent() {
        let mut c = Canvas::new(5, 3, 3, true);
        c.print_at("hi", 0, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        let first = c.refresh();
        assert!(!first.is_empty());
        let second = c.refresh();
        assert!(second.is_empty());
    }

    #[test]
    fn print_at_clips_outside_visible_region() {
        let mut c = Canvas::new(5, 3, 3, true);
        c.print_at("x", -1, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        c.print_at("x", 10, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        c.print_at("x", 0, 10, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        assert_eq!(c.get_from(0, 0).ch, ' ');
    }

    #[test]
    fn transparent_print_preserves_existing_cell_under_spaces() {
        let mut c = Canvas::new(5, 3, 3, true);
        c.print_at("AB", 0, 0, Colour::RED, Attr::NORMAL, Colour::BLACK, false);
        c.print_at(" C", 0, 0, Colour::BLUE, Attr::NORMAL, Colour::BLACK, true);
        assert_eq!(c.get_from(0, 0).ch, 'A');
        assert_eq!(c.get_from(1, 0).ch, 'C');
    }

    #[test]
    fn paint_applies_colour_map_per_character() {
        let mut c = Canvas::new(10, 3, 3, true);
        let map = [
            StyleTriple::new(Colour::Indexed(1), Attr::NORMAL, Colour::Indexed(4)),
            StyleTriple::new(Colour::Indexed(2), Attr::NORMAL, Colour::Indexed(3)),
            StyleTriple::new(Colour::Indexed(3), Attr::NORMAL, Colour::Indexed(2)),
            StyleTriple::new(Colour::Indexed(4), Attr::NORMAL, Colour::Indexed(1)),
        ];
        c.paint("Text", 0, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, Some(&map));
        assert_eq!(c.get_from(0, 0).style.fg, Colour::Indexed(1));
        assert_eq!(c.get_from(0, 0).style.bg, Colour::Indexed(4));
        assert_eq!(c.get_from(3, 0).style.fg, Colour::Indexed(4));
        assert_eq!(c.get_from(3, 0).style.bg, Colour::Indexed(1));
    }

    #[test]
    fn scroll_clamps_to_buffer_bounds() {
        let mut c = Canvas::new(5, 3, 6, true);
        c.scroll(100);
        assert_eq!(c.start_line(), 3);
        c.scroll(-100);
        assert_eq!(c.start_line(), 0);
    }

    #[test]
    fn wide_character_reserves_continuation_cell() {
        let mut c = Canvas::new(5, 2, 2, true);
        c.print_at("\u{6c49}", 0, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        assert_eq!(c.get_from(0, 0).ch, '\u{6c49}');
        assert!(c.get_from(1, 0).is_wide_continuation());
    }

    #[test]
    fn refresh_translates_rows_into_the_visible_window() {
        let mut c = Canvas::new(5, 2, 6, true);
        c.print_at("ab", 0, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        c.scroll(1);
        assert_eq!(c.start_line(), 1);
        c.print_at("hi", 0, 1, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        let runs = c.refresh();
        assert!(runs.iter().all(|r| r.y < 2));
        assert!(runs.iter().any(|r| r.y == 0 && r.text.starts_with('h')));
    }

    #[test]
    fn scrolling_to_already_flushed_content_still_reports_it() {
        let mut c = Canvas::new(5, 2, 6, true);
        c.print_at("ab", 0, 0, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        c.print_at("cd", 0, 1, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        c.refresh();
        c.scroll(1);
        let runs = c.refresh();
        assert!(!runs.is_empty(), "rows that scrolled into view must be repainted even if unchanged in the buffer");
    }

    #[test]
    fn force_update_causes_full_redraw_next_refresh() {
        let mut c = Canvas::new(3, 2, 2, true);
        c.refresh();
        c.force_update();
        let runs = c.refresh();
        assert!(!runs.is_empty());
    }
}
