//! Particle systems: an emitter spawns particles for `spawn` ticks; each
//! particle ages, moves under its own update rule, and is drawn from a
//! glyph/colour ramp indexed by its age (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: u32,
    pub life: u32,
}

impl Particle {
    fn position(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    fn alive(&self) -> bool {
        self.age < self.life
    }
}

/// A per-tick position/velocity update rule; the default is straight-line
/// motion, but callers can supply gravity, drag, or turbulence.
pub type UpdateFn = Box<dyn FnMut(&mut Particle)>;

pub struct ParticleEmitter {
    x: i32,
    y: i32,
    spawn_ticks: u64,
    glyph_ramp: Vec<char>,
    colour_ramp: Vec<Colour>,
    update_fn: UpdateFn,
    particles: Vec<Particle>,
    spawned: u64,
}

impl ParticleEmitter {
    pub fn new(x: i32, y: i32, spawn_ticks: u64, glyph_ramp: Vec<char>, colour_ramp: Vec<Colour>, update_fn: UpdateFn) -> Self {
        ParticleEmitter { x, y, spawn_ticks, glyph_ramp, colour_ramp, update_fn, particles: Vec::new(), spawned: 0 }
    }

    fn spawn_one(&mut self) {
        use crate::rng;
        let angle = rng::gen_unit() * std::f64::consts::TAU;
        let speed = 0.5 + rng::gen_unit();
        self.particles.push(Particle {
            x: self.x as f64,
            y: self.y as f64,
            vx: speed * angle.cos(),
            vy: speed * angle.sin(),
            age: 0,
            life: 10 + (rng::gen_range(0, 20)) as u32,
        });
    }

    fn ramp_index(&self, particle: &Particle, ramp_len: usize) -> usize {
        if ramp_len == 0 {
            return 0;
        }
        let frac = particle.age as f64 / particle.life.max(1) as f64;
        ((frac * (ramp_len - 1) as f64).round() as usize).min(ramp_len - 1)
    }
}

impl Effect for ParticleEmitter {
    fn reset(&mut self) {
        self.particles.clear();
        self.spawned = 0;
    }

    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for particle in &self.particles {
            let (x, y) = particle.position();
            canvas.clear_buffer(Colour::Default, Attr::NORMAL, Colour::Default, x, y, 1, 1);
        }

        if frame_no < self.spawn_ticks {
            self.spawn_one();
            self.spawned += 1;
        }

        for particle in &mut self.particles {
            (self.update_fn)(particle);
            particle.age += 1;
        }
        self.particles.retain(|p| p.alive());

        for particle in &self.particles {
            let glyph = *self.glyph_ramp.get(self.ramp_index(particle, self.glyph_ramp.len())).unwrap_or(&'*');
            let colour = *self
                .colour_ramp
                .get(self.ramp_index(particle, self.colour_ramp.len()))
                .unwrap_or(&Colour::WHITE);
            let (x, y) = particle.position();
            canvas.print_at(&glyph.to_string(), x, y, colour, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }

    fn stop_frame(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_spawning_after_spawn_ticks_elapse() {
        let mut emitter = ParticleEmitter::new(5, 5, 3, vec!['.', '*'], vec![Colour::WHITE], Box::new(|_p: &mut Particle| {}));
        let mut canvas = Canvas::new(20, 10, 10, true);
        for frame in 0..3 {
            emitter.update(frame, &mut canvas);
        }
        assert_eq!(emitter.spawned, 3);
        emitter.update(3, &mut canvas);
        assert_eq!(emitter.spawned, 3);
    }
}
