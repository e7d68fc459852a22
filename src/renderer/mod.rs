//! Renderers: producers of styled text images (spec §4.4).
//!
//! Every renderer exposes `max_width`/`max_height` and `rendered_text`,
//! called once per frame by a consumer (an `Effect` or a `Widget`); it may
//! advance internal animation state. `images` exposes the full backing list
//! for renderers that have one (static and chained renderers); dynamic
//! renderers synthesize a single image per call and `images` yields just
//! that one image.

pub mod box_renderer;
pub mod chained;
pub mod charts;
pub mod dynamic;
pub mod fire;
pub mod kaleidoscope;
pub mod plasma;
pub mod players;
pub mod scale;
pub mod speech_bubble;
pub mod r#static;
pub mod typewriter;

use crate::cell::StyleTriple;

/// One rendered frame: a list of displayable lines and a parallel per-cell
/// style map (`style_map[row][col]`).
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub lines: Vec<String>,
    pub style_map: Vec<Vec<StyleTriple>>,
}

impl Image {
    pub fn new(lines: Vec<String>, style_map: Vec<Vec<StyleTriple>>) -> Self {
        Image { lines, style_map }
    }

    /// A plain-text image with uniform styling, the common case for
    /// hand-written static content.
    pub fn plain(lines: Vec<String>, style: StyleTriple) -> Self {
        let style_map = lines.iter().map(|l| vec![style; l.chars().count()]).collect();
        Image { lines, style_map }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

/// Common contract for every renderer (spec §4.4).
pub trait Renderer {
    fn max_width(&self) -> u16;
    fn max_height(&self) -> u16;
    /// Produce the current frame, possibly advancing animation state.
    fn rendered_text(&mut self) -> Image;
    /// The full sequence of images this renderer can produce. Static and
    /// chained renderers return their whole backing list; dynamic renderers
    /// return a single-element iterator over `rendered_text()`.
    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_>;
}
