//! Scene: an ordered list of Effects with a duration policy (spec §3, §4.6,
//! testable property 7).

use crate::canvas::Canvas;
use crate::driver::Event;
use crate::effect::Effect;
use crate::error::UpdateOutcome;

/// How long a scene runs before the player advances to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    /// End on the tick equal to the maximum stop_frame among effects.
    DeriveFromEffects,
    /// Never end on its own; an explicit `NextScene`/`Stop` is required.
    Indefinite,
    /// End after exactly this many ticks.
    Fixed(u64),
}

pub struct Scene {
    name: Option<String>,
    effects: Vec<Box<dyn Effect>>,
    duration: Duration,
    clear_on_enter: bool,
}

impl Scene {
    pub fn new(effects: Vec<Box<dyn Effect>>, duration: Duration, clear_on_enter: bool, name: Option<String>) -> Self {
        Scene { name, effects, duration, clear_on_enter }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn clear_on_enter(&self) -> bool {
        self.clear_on_enter
    }

    /// Effective end tick, or `None` if the scene runs indefinitely.
    pub fn effective_duration(&self) -> Option<u64> {
        match self.duration {
            Duration::Indefinite => None,
            Duration::Fixed(n) => Some(n),
            Duration::DeriveFromEffects => {
                let max_stop = self.effects.iter().map(|e| e.stop_frame()).max().unwrap_or(0);
                if max_stop == 0 { None } else { Some(max_stop) }
            }
        }
    }

    /// Reset every effect, called on scene entry.
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    pub fn on_exit(&mut self) {
        for effect in &mut self.effects {
            effect.on_scene_exit();
        }
    }

    /// Route `event` through effects in order; the first effect that
    /// consumes it (returns `None`) stops propagation.
    pub fn process_event(&mut self, event: Event) -> Option<Event> {
        let mut current = Some(event);
        for effect in &mut self.effects {
            match current {
                Some(e) => current = effect.process_event(e),
                None => break,
            }
        }
        current
    }

    /// Update every effect whose schedule is due this tick, in list order
    /// (so later effects draw on top of earlier ones).
    pub fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for effect in &mut self.effects {
            let stop = effect.stop_frame();
            if frame_no < effect.start_frame() || (stop != 0 && frame_no >= stop) {
                continue;
            }
            let count = effect.frame_update_count();
            if count != 0 && frame_no % count != 0 {
                continue;
            }
            let outcome = effect.update(frame_no, canvas);
            if !outcome.is_continue() {
                return outcome;
            }
        }
        if let Some(end) = self.effective_duration() {
            if frame_no >= end {
                return UpdateOutcome::NextScene(None);
            }
        }
        UpdateOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateOutcome;

    struct FixedStop {
        stop: u64,
    }

    impl Effect for FixedStop {
        fn update(&mut self, _frame_no: u64, _canvas: &mut Canvas) -> UpdateOutcome {
            UpdateOutcome::Continue
        }

        fn stop_frame(&self) -> u64 {
            self.stop
        }
    }

    /// Testable property 7: `duration == 0` ends on `max(stop_frame)`.
    #[test]
    fn derived_duration_ends_on_max_stop_frame() {
        let effects: Vec<Box<dyn Effect>> = vec![Box::new(FixedStop { stop: 5 }), Box::new(FixedStop { stop: 9 })];
        let mut scene = Scene::new(effects, Duration::DeriveFromEffects, false, None);
        let mut canvas = Canvas::new(10, 5, 5, true);
        for frame in 0..9 {
            assert_eq!(scene.update(frame, &mut canvas), UpdateOutcome::Continue);
        }
        assert_eq!(scene.update(9, &mut canvas), UpdateOutcome::NextScene(None));
    }

    #[test]
    fn indefinite_duration_never_ends_on_its_own() {
        let mut scene = Scene::new(Vec::new(), Duration::Indefinite, false, None);
        let mut canvas = Canvas::new(10, 5, 5, true);
        for frame in 0..10_000 {
            assert_eq!(scene.update(frame, &mut canvas), UpdateOutcome::Continue);
        }
    }
}
