//! The fixed-rate tick loop that drives a sequence of [`Scene`]s against a
//! [`Screen`] (spec §4.6).

use std::time::Duration;

use log::{debug, info, warn};

use crate::driver::Driver;
use crate::error::{ResizeScreenError, UpdateOutcome};
use crate::scene::Scene;
use crate::screen::Screen;

/// Construction knobs that were keyword arguments on the reference `play`
/// call; defaults match it exactly (20Hz tick, `stop_on_resize = true`,
/// `repeat = true`, `allow_int = false`, `reduce_cpu = false`).
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub tick_rate: Duration,
    pub stop_on_resize: bool,
    pub repeat: bool,
    pub allow_int: bool,
    pub reduce_cpu: bool,
    pub start_scene: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            tick_rate: Duration::from_millis(50),
            stop_on_resize: true,
            repeat: true,
            allow_int: false,
            reduce_cpu: false,
            start_scene: None,
        }
    }
}

pub struct Player<D: Driver> {
    screen: Screen<D>,
    scenes: Vec<Scene>,
    config: PlayerConfig,
}

impl<D: Driver> Player<D> {
    pub fn new(screen: Screen<D>, scenes: Vec<Scene>, config: PlayerConfig) -> Self {
        Player { screen, scenes, config }
    }

    pub fn screen_mut(&mut self) -> &mut Screen<D> {
        &mut self.screen
    }

    fn scene_index_by_name(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name() == Some(name))
    }

    /// Run the tick loop until a scene requests a stop, the sequence of
    /// scenes is exhausted without `repeat`, or the terminal resizes with
    /// `stop_on_resize` set.
    pub fn run(&mut self) -> Result<String, ResizeScreenError> {
        if self.scenes.is_empty() {
            return Ok(String::new());
        }

        let mut current = self
            .config
            .start_scene
            .as_deref()
            .and_then(|n| self.scene_index_by_name(n))
            .unwrap_or(0);
        let mut frame_no: u64 = 0;
        let mut pending_change = true;

        loop {
            if pending_change {
                info!("entering scene {:?} ({})", self.scenes[current].name(), current);
                if self.scenes[current].clear_on_enter() {
                    self.screen.canvas_mut().force_update();
                }
                self.scenes[current].reset();
                frame_no = 0;
                pending_change = false;
            }

            if self.screen.has_resized() {
                self.screen.handle_resize();
                if self.config.stop_on_resize {
                    warn!("terminal resized, unwinding player");
                    return Err(ResizeScreenError {
                        message: "terminal resized".to_string(),
                        scene_name: self.scenes[current].name().map(str::to_string),
                    });
                }
            }

            while let Some(event) = self.screen.get_event() {
                if let Some(event) = self.scenes[current].process_event(event) {
                    debug!("event fell through scene: {:?}", event);
                }
            }

            let outcome = self.scenes[current].update(frame_no, self.screen.canvas_mut());
            match outcome {
                UpdateOutcome::Continue => {}
                UpdateOutcome::NextScene(name) => {
                    self.scenes[current].on_exit();
                    current = match name {
                        Some(n) => self.scene_index_by_name(&n).unwrap_or(current),
                        None => {
                            let next = current + 1;
                            if next >= self.scenes.len() {
                                if self.config.repeat {
                                    0
                                } else {
                                    return Ok("sequence complete".to_string());
                                }
                            } else {
                                next
                            }
                        }
                    };
                    pending_change = true;
                }
                UpdateOutcome::Stop(message) => {
                    self.scenes[current].on_exit();
                    return Ok(message);
                }
            }

            self.screen.refresh().map_err(|e| ResizeScreenError {
                message: e.to_string(),
                scene_name: self.scenes[current].name().map(str::to_string),
            })?;

            // `reduce_cpu` only skips the tick sleep while input is backed
            // up; an idle loop still sleeps normally even with the flag set.
            if !(self.config.reduce_cpu && self.screen.has_pending_input()) {
                std::thread::sleep(self.config.tick_rate);
            }

            frame_no += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellRun;
    use crate::driver::Event;
    use crate::effect::Effect;
    use crate::error::UpdateOutcome as Outcome;
    use crate::scene::Duration as SceneDuration;
    use std::io;

    struct FakeDriver {
        size: (u16, u16),
    }

    impl Driver for FakeDriver {
        fn read_input(&mut self) -> Vec<Event> {
            Vec::new()
        }
        fn write_cells(&mut self, _runs: &[CellRun]) -> io::Result<()> {
            Ok(())
        }
        fn size(&self) -> (u16, u16) {
            self.size
        }
        fn resized_since_last_call(&mut self) -> bool {
            false
        }
        fn colour_count(&self) -> u16 {
            8
        }
        fn unicode_aware(&self) -> bool {
            true
        }
        fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
            Ok(())
        }
        fn bell(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct StopAfter {
        ticks: u64,
    }

    impl Effect for StopAfter {
        fn update(&mut self, frame_no: u64, _canvas: &mut crate::canvas::Canvas) -> Outcome {
            if frame_no >= self.ticks {
                Outcome::Stop("done".to_string())
            } else {
                Outcome::Continue
            }
        }
    }

    #[test]
    fn run_exits_with_stop_message() {
        let screen = Screen::new(FakeDriver { size: (20, 10) });
        let scene = Scene::new(vec![Box::new(StopAfter { ticks: 2 })], SceneDuration::Indefinite, false, None);
        let mut player = Player::new(screen, vec![scene], PlayerConfig { tick_rate: Duration::from_millis(0), ..Default::default() });
        let result = player.run().unwrap();
        assert_eq!(result, "done");
    }

    #[test]
    fn empty_scene_list_returns_immediately() {
        let screen = Screen::new(FakeDriver { size: (20, 10) });
        let mut player: Player<FakeDriver> = Player::new(screen, Vec::new(), PlayerConfig::default());
        assert_eq!(player.run().unwrap(), "");
    }
}
