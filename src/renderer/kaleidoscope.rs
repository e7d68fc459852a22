//! Kaleidoscope: wraps another renderer as its repeating "cell", sampling
//! it through a rotating, mirrored sector mapping (spec §4.4).

use crate::cell::StyleTriple;
use crate::renderer::{Image, Renderer};

pub struct Kaleidoscope {
    width: u16,
    height: u16,
    sectors: u32,
    rotation: f64,
    rotation_speed: f64,
    cell: Box<dyn Renderer>,
}

impl Kaleidoscope {
    pub fn new(width: u16, height: u16, sectors: u32, rotation_speed: f64, cell: Box<dyn Renderer>) -> Self {
        Kaleidoscope {
            width,
            height,
            sectors: sectors.max(1),
            rotation: 0.0,
            rotation_speed,
            cell,
        }
    }

    fn frame(&mut self) -> Image {
        let source = self.cell.rendered_text();
        self.rotation += self.rotation_speed;
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let sector_angle = std::f64::consts::TAU / self.sectors as f64;

        let mut lines = Vec::with_capacity(self.height as usize);
        let mut style_map = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width as usize);
            let mut row_styles = Vec::with_capacity(self.width as usize);
            for x in 0..self.width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let radius = (dx * dx + dy * dy).sqrt();
                let mut angle = dy.atan2(dx) + self.rotation;
                angle = angle.rem_euclid(sector_angle);
                if angle > sector_angle / 2.0 {
                    angle = sector_angle - angle;
                }
                let sx = (cx + radius * angle.cos()).round() as i64;
                let sy = (cy + radius * angle.sin()).round() as i64;
                let (ch, style) = sample(&source, sx, sy);
                line.push(ch);
                row_styles.push(style);
            }
            lines.push(line);
            style_map.push(row_styles);
        }
        Image::new(lines, style_map)
    }
}

fn sample(image: &Image, x: i64, y: i64) -> (char, StyleTriple) {
    if y < 0 || y as usize >= image.lines.len() {
        return (' ', StyleTriple::default());
    }
    let row: Vec<char> = image.lines[y as usize].chars().collect();
    if x < 0 || x as usize >= row.len() {
        return (' ', StyleTriple::default());
    }
    let style = image
        .style_map
        .get(y as usize)
        .and_then(|r| r.get(x as usize))
        .copied()
        .unwrap_or_default();
    (row[x as usize], style)
}

impl Renderer for Kaleidoscope {
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
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn samples_source_renderer_into_requested_dimensions() {
        let cell = StaticRenderer::new(vec!["abc\ndef".into()], StyleTriple::default());
        let mut k = Kaleidoscope::new(8, 4, 6, 0.1, Box::new(cell));
        let image = k.rendered_text();
        assert_eq!(image.lines.len(), 4);
        assert!(image.lines.iter().all(|l| l.chars().count() == 8));
    }
}
