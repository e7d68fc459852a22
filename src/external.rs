//! Interface seams for collaborators that are out of scope at the
//! implementation level: FIGlet font shaping and raster image decoding
//! (spec §1 "Out of scope").

use crate::cell::StyleTriple;

/// Shapes a string of text into a multi-line ASCII-art rendering. No
/// implementation ships in this crate; embedders wire up a FIGlet font
/// library and implement this trait over it.
pub trait FigletSource {
    fn render(&self, text: &str) -> Vec<String>;
}

/// Decodes a raster image into a grid of cells suitable for a renderer.
/// Grey-scale sources may leave `colours` empty and rely on a single `fg`.
pub trait ImageSource {
    fn decode(&self, path: &std::path::Path) -> std::io::Result<(Vec<String>, Vec<Vec<StyleTriple>>)>;
}
