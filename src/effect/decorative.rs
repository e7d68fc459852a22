//! Small decorative effects with self-contained per-frame update rules,
//! each deterministic under the shared seeded RNG (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::rng;

/// Scatters single-character "stars" that twinkle between a handful of
/// glyphs at random positions.
pub struct Stars {
    count: usize,
    glyphs: &'static [char],
}

impl Stars {
    pub fn new(count: usize) -> Self {
        Stars { count, glyphs: &['.', '+', '*'] }
    }
}

impl Effect for Stars {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        for _ in 0..self.count {
            let x = rng::gen_range(0, w.max(1) as i64) as i32;
            let y = rng::gen_range(0, h.max(1) as i64) as i32;
            let glyph = self.glyphs[rng::gen_range(0, self.glyphs.len() as i64) as usize];
            canvas.print_at(&glyph.to_string(), x, y, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        }
        UpdateOutcome::Continue
    }
}

/// A falling-character "digital rain" column effect.
pub struct Matrix {
    drops: Vec<i32>,
}

impl Matrix {
    pub fn new(width: u16) -> Self {
        Matrix { drops: vec![0; width as usize] }
    }
}

impl Effect for Matrix {
    fn reset(&mut self) {
        self.drops.iter_mut().for_each(|d| *d = 0);
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let h = canvas.height() as i32;
        for (x, drop) in self.drops.iter_mut().enumerate() {
            *drop += 1;
            if *drop > h + rng::gen_range(0, 10) as i32 {
                *drop = 0;
            }
            let glyph = (33u8 + rng::gen_range(0, 90) as u8) as char;
            canvas.print_at(&glyph.to_string(), x as i32, *drop % h, Colour::GREEN, Attr::NORMAL, Colour::BLACK, false);
        }
        UpdateOutcome::Continue
    }
}

/// Falling snowflakes drifting down the Canvas.
pub struct Snow {
    flakes: Vec<(f64, f64, f64)>,
}

impl Snow {
    pub fn new(count: usize, width: u16) -> Self {
        let flakes = (0..count)
            .map(|_| (rng::gen_range(0, width.max(1) as i64) as f64, 0.0, 0.2 + rng::gen_unit()))
            .collect();
        Snow { flakes }
    }
}

impl Effect for Snow {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let h = canvas.height() as f64;
        for flake in &mut self.flakes {
            flake.1 += flake.2;
            if flake.1 >= h {
                flake.1 = 0.0;
            }
            canvas.print_at("*", flake.0 as i32, flake.1 as i32, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        }
        UpdateOutcome::Continue
    }
}

/// Reveals (or clears) a rectangular region one column at a time.
pub struct Wipe {
    width: i32,
    height: i32,
    column: i32,
    reverse: bool,
}

impl Wipe {
    pub fn new(width: u16, height: u16, reverse: bool) -> Self {
        Wipe { width: width as i32, height: height as i32, column: 0, reverse }
    }
}

impl Effect for Wipe {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let x = if self.reverse { self.width - 1 - self.column } else { self.column };
        canvas.clear_buffer(Colour::Default, Attr::NORMAL, Colour::Default, x, 0, 1, self.height);
        self.column += 1;
        UpdateOutcome::Continue
    }

    fn stop_frame(&self) -> u64 {
        self.width as u64
    }
}

/// A static fill effect, typically placed first so later effects draw on
/// top of a known background colour.
pub struct Background {
    fg: Colour,
    bg: Colour,
}

impl Background {
    pub fn new(fg: Colour, bg: Colour) -> Self {
        Background { fg, bg }
    }
}

impl Effect for Background {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        canvas.clear_buffer(self.fg, Attr::NORMAL, self.bg, 0, 0, w, h);
        UpdateOutcome::Continue
    }

    fn frame_update_count(&self) -> u64 {
        0
    }
}

/// Randomly recolours cells to simulate static/noise.
pub struct RandomNoise {
    density: f64,
}

impl RandomNoise {
    pub fn new(density: f64) -> Self {
        RandomNoise { density: density.clamp(0.0, 1.0) }
    }
}

impl Effect for RandomNoise {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        for y in 0..h {
            for x in 0..w {
                if rng::gen_bool(self.density) {
                    let shade = rng::gen_range(0, 8) as u8;
                    canvas.print_at(" ", x, y, Colour::Default, Attr::NORMAL, Colour::Indexed(shade), false);
                }
            }
        }
        UpdateOutcome::Continue
    }
}

/// A digital clock reading the process wall clock once per tick interval.
pub struct Clock {
    x: i32,
    y: i32,
}

impl Clock {
    pub fn new(x: i32, y: i32) -> Self {
        Clock { x, y }
    }
}

impl Effect for Clock {
    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let total_seconds = frame_no / 20;
        let text = format!("{:02}:{:02}:{:02}", (total_seconds / 3600) % 24, (total_seconds / 60) % 60, total_seconds % 60);
        canvas.print_at(&text, self.x, self.y, Colour::WHITE, Attr::BOLD, Colour::BLACK, false);
        UpdateOutcome::Continue
    }

    fn frame_update_count(&self) -> u64 {
        20
    }
}

/// Renders an escape-time Julia set fractal, zooming in a little every
/// frame until `zoom_limit` is reached and the dive restarts.
pub struct Julia {
    width: u16,
    height: u16,
    c_re: f64,
    c_im: f64,
    zoom: f64,
    zoom_step: f64,
    zoom_limit: f64,
}

impl Julia {
    pub fn new(width: u16, height: u16) -> Self {
        Julia { width, height, c_re: -0.7, c_im: 0.27015, zoom: 1.0, zoom_step: 1.02, zoom_limit: 40.0 }
    }

    fn escape_count(&self, x0: f64, y0: f64) -> u32 {
        let (mut x, mut y) = (x0, y0);
        let mut i = 0;
        while x * x + y * y <= 4.0 && i < 32 {
            let next_x = x * x - y * y + self.c_re;
            y = 2.0 * x * y + self.c_im;
            x = next_x;
            i += 1;
        }
        i
    }
}

impl Effect for Julia {
    fn reset(&mut self) {
        self.zoom = 1.0;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let (w, h) = (self.width as i32, self.height as i32);
        for py in 0..h {
            for px in 0..w {
                let x0 = (px as f64 - w as f64 / 2.0) / (0.5 * self.zoom * w as f64);
                let y0 = (py as f64 - h as f64 / 2.0) / (0.5 * self.zoom * h as f64);
                let count = self.escape_count(x0, y0);
                let shade = if count >= 32 { 0 } else { 1 + (count % 7) as u8 };
                canvas.print_at(" ", px, py, Colour::Default, Attr::NORMAL, Colour::Indexed(shade), false);
            }
        }
        self.zoom *= self.zoom_step;
        if self.zoom >= self.zoom_limit {
            self.zoom = 1.0;
        }
        UpdateOutcome::Continue
    }
}

/// A rotating ASCII gear: spokes sweeping around a fixed hub, one step of
/// rotation per tick.
pub struct Cog {
    x: i32,
    y: i32,
    radius: i32,
    teeth: u32,
    angle: f64,
}

impl Cog {
    pub fn new(x: i32, y: i32, radius: i32, teeth: u32) -> Self {
        Cog { x, y, radius, teeth, angle: 0.0 }
    }
}

impl Effect for Cog {
    fn reset(&mut self) {
        self.angle = 0.0;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        canvas.print_at("+", self.x, self.y, Colour::WHITE, Attr::BOLD, Colour::BLACK, false);
        for tooth in 0..self.teeth {
            let theta = self.angle + tooth as f64 * std::f64::consts::TAU / self.teeth as f64;
            let px = self.x + (theta.cos() * self.radius as f64).round() as i32;
            let py = self.y + (theta.sin() * self.radius as f64 / 2.0).round() as i32;
            canvas.print_at("#", px, py, Colour::WHITE, Attr::NORMAL, Colour::BLACK, false);
        }
        self.angle += std::f64::consts::PI / 16.0;
        UpdateOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julia_zoom_resets_after_crossing_the_limit() {
        let mut julia = Julia::new(10, 6);
        julia.zoom = 39.9;
        let mut canvas = Canvas::new(10, 6, 6, true);
        julia.update(0, &mut canvas);
        assert_eq!(julia.zoom, 1.0);
    }

    #[test]
    fn cog_advances_its_rotation_angle_each_tick() {
        let mut cog = Cog::new(5, 3, 3, 8);
        let mut canvas = Canvas::new(10, 6, 6, true);
        cog.update(0, &mut canvas);
        assert!(cog.angle > 0.0);
    }

    #[test]
    fn wipe_reaches_stop_frame_after_crossing_full_width() {
        let wipe = Wipe::new(10, 4, false);
        assert_eq!(wipe.stop_frame(), 10);
    }

    #[test]
    fn clock_formats_elapsed_ticks_as_hh_mm_ss() {
        let mut clock = Clock::new(0, 0);
        let mut canvas = Canvas::new(20, 3, 3, true);
        clock.update(20, &mut canvas);
        let cell = canvas.get_from(0, 0);
        assert_eq!(cell.ch, '0');
    }

    #[test]
    fn background_fills_the_whole_canvas() {
        let mut bg = Background::new(Colour::RED, Colour::BLUE);
        let mut canvas = Canvas::new(5, 3, 3, true);
        bg.update(0, &mut canvas);
        let cell = canvas.get_from(2, 1);
        assert_eq!(cell.style.bg, Colour::BLUE);
    }
}
