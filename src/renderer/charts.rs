//! BarChart / VBarChart: bar geometry computed from sample functions, drawn
//! inside a bordered box with an optional axis (spec §4.4, testable
//! scenario 4).

use crate::cell::StyleTriple;
use crate::renderer::{Image, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    XAxis,
    YAxis,
    Both,
    None,
}

/// Horizontal bar chart: each sample function contributes one bar whose
/// length (in cells) is its current value, clamped to the available width.
pub struct BarChart {
    width: u16,
    height: u16,
    axis: Axis,
    functions: Vec<Box<dyn FnMut() -> f64>>,
}

impl BarChart {
    pub fn new(width: u16, height: u16, functions: Vec<Box<dyn FnMut() -> f64>>) -> Self {
        BarChart { width, height, axis: Axis::YAxis, functions }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    fn frame(&mut self) -> Image {
        let w = self.width.max(4) as usize;
        let h = self.height.max(3) as usize;
        let axis_col = if matches!(self.axis, Axis::YAxis | Axis::Both) { 1 } else { 0 };
        let inner_width = w.saturating_sub(2).saturating_sub(axis_col);

        let mut lines = Vec::with_capacity(h);
        lines.push(format!("\u{2554}{}\u{2557}", "\u{2550}".repeat(w - 2)));

        let mut body_rows = Vec::new();
        for (i, f) in self.functions.iter_mut().enumerate() {
            if i > 0 {
                body_rows.push(" ".repeat(inner_width));
            }
            let value = f().max(0.0) as usize;
            let bar_len = value.min(inner_width);
            body_rows.push(format!("{}{}", "#".repeat(bar_len), " ".repeat(inner_width - bar_len)));
        }
        while body_rows.len() < h - 2 {
            body_rows.push(" ".repeat(inner_width));
        }
        body_rows.truncate(h - 2);

        for row in body_rows {
            let axis_ch = if axis_col == 1 { "|" } else { "" };
            lines.push(format!("\u{2551}{}{}\u{2551}", axis_ch, row));
        }
        lines.push(format!("\u{255a}{}\u{255d}", "\u{2550}".repeat(w - 2)));
        Image::plain(lines, StyleTriple::default())
    }
}

impl Renderer for BarChart {
    fn max_width(&self) -> u16 {
        self.width
    }

    fn max_height(&self) -> u16 {
        self.height
    }

    fn rendered_text(&mut self) -> Image {
        self.frame()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.frame()))
    }
}

/// Vertical variant: bars grow upward from the bottom border instead of
/// rightward from the axis column.
pub struct VBarChart {
    width: u16,
    height: u16,
    functions: Vec<Box<dyn FnMut() -> f64>>,
}

impl VBarChart {
    pub fn new(width: u16, height: u16, functions: Vec<Box<dyn FnMut() -> f64>>) -> Self {
        VBarChart { width, height, functions }
    }

    fn frame(&mut self) -> Image {
        let w = self.width.max(4) as usize;
        let h = self.height.max(3) as usize;
        let inner_height = h - 2;
        let n = self.functions.len().max(1);
        let col_width = ((w - 2) / n).max(1);

        let values: Vec<usize> = self
            .functions
            .iter_mut()
            .map(|f| (f().max(0.0) as usize).min(inner_height))
            .collect();

        let mut grid = vec![vec![' '; w - 2]; inner_height];
        for (i, &value) in values.iter().enumerate() {
            let col_start = i * col_width;
            let col_end = ((i + 1) * col_width).min(w - 2);
            for row in (inner_height - value)..inner_height {
                for col in col_start..col_end {
                    grid[row][col] = '#';
                }
            }
        }

        let mut lines = Vec::with_capacity(h);
        lines.push(format!("\u{2554}{}\u{2557}", "\u{2550}".repeat(w - 2)));
        for row in grid {
            lines.push(format!("\u{2551}{}\u{2551}", row.into_iter().collect::<String>()));
        }
        lines.push(format!("\u{255a}{}\u{255d}", "\u{2550}".repeat(w - 2)));
        Image::plain(lines, StyleTriple::default())
    }
}

impl Renderer for VBarChart {
    fn max_width(&self) -> u16 {
        self.width
    }

    fn max_height(&self) -> u16 {
        self.height
    }

    fn rendered_text(&mut self) -> Image {
        self.frame()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable scenario 4.
    #[test]
    fn bar_chart_renders_double_box_with_axis_and_two_bars() {
        let mut chart = BarChart::new(17, 7, vec![Box::new(|| 10.0), Box::new(|| 5.0)]);
        let image = chart.rendered_text();
        assert_eq!(image.lines.len(), 7);
        assert!(image.lines[0].starts_with('\u{2554}'));
        assert!(image.lines[6].starts_with('\u{255a}'));

        let bar_rows: Vec<&String> = image.lines[1..6].iter().filter(|l| l.contains('#')).collect();
        assert_eq!(bar_rows.len(), 2);
        assert_eq!(bar_rows[0].matches('#').count(), 10);
        assert_eq!(bar_rows[1].matches('#').count(), 5);

        // Exactly one blank body row separates the two bars.
        let body: Vec<&String> = image.lines[1..6].to_vec();
        let first_bar_row = body.iter().position(|l| l.contains('#')).unwrap();
        let second_bar_row = body.iter().rposition(|l| l.contains('#')).unwrap();
        assert_eq!(second_bar_row - first_bar_row, 2);
    }
}
