//! Effects: per-tick animation units driven by the [`crate::player::Player`]
//! loop (spec §4.5).
//!
//! Unlike the reference implementation, an `Effect` does not hold a
//! back-reference to its owning `Scene`/`Screen`; the player instead passes
//! the active `Canvas` into `update` each tick (spec §9 "Cyclic
//! references"), avoiding a shared mutable graph.

pub mod banner;
pub mod cycle;
pub mod decorative;
pub mod mirage;
pub mod particles;
pub mod print;
pub mod scroll;
pub mod sprite;

use crate::canvas::Canvas;
use crate::driver::Event;
use crate::error::UpdateOutcome;

/// Contract every concrete effect implements (spec §4.5).
pub trait Effect {
    /// Reset internal animation state, called on scene entry.
    fn reset(&mut self) {}

    /// Called by the player every tick this effect is due for an update
    /// (see [`Effect::frame_update_count`]).
    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome;

    /// Offer an input event to this effect; return `None` if consumed,
    /// `Some(event)` to let it fall through to the next effect.
    fn process_event(&mut self, event: Event) -> Option<Event> {
        Some(event)
    }

    /// Tick at which this effect naturally ends; 0 means "no natural end".
    fn stop_frame(&self) -> u64 {
        0
    }

    /// Tick at which this effect starts being updated.
    fn start_frame(&self) -> u64 {
        0
    }

    /// How often (in ticks) this effect wants `update` called; 1 means
    /// every tick.
    fn frame_update_count(&self) -> u64 {
        1
    }

    /// Called once when the owning scene is being torn down.
    fn on_scene_exit(&mut self) {}
}
