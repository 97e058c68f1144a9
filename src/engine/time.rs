pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Upper bound on ticks run per frame so a long stall cannot spiral.
const MAX_TICKS_PER_FRAME: usize = 8;

/// Fixed-timestep accumulator. Frames add real time; whole ticks are drained.
#[derive(Debug, Clone)]
pub struct FixedStep {
    pub step: f32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(PHYSICS_DT)
    }
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Add a frame delta and return how many ticks to simulate now.
    pub fn accumulate(&mut self, frame_dt: f32) -> usize {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= self.step {
            log::warn!(
                "dropping {:.3}s of simulation time after a long frame",
                self.accumulator
            );
            self.accumulator %= self.step;
        }
        ticks
    }

    /// How far into the next tick the current frame falls, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn drains_whole_ticks_and_keeps_remainder() {
        let mut step = FixedStep::new(0.1);
        assert_eq!(step.accumulate(0.25), 2);
        assert_relative_eq!(step.alpha(), 0.5, epsilon = 1e-4);
        assert_eq!(step.accumulate(0.06), 1);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut step = FixedStep::new(0.1);
        assert_eq!(step.accumulate(10.0), MAX_TICKS_PER_FRAME);
        assert!(step.alpha() < 1.0);
    }

    #[test]
    fn negative_frames_add_nothing() {
        let mut step = FixedStep::new(0.1);
        assert_eq!(step.accumulate(-5.0), 0);
        assert_eq!(step.alpha(), 0.0);
    }
}
