/// Default simulation cadence: 60 ticks per second (~17 ms).
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Cap on ticks per host frame, so a stalled tab does not fast-forward the level.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Fixed timestep accumulator.
/// Turns variable frame deltas from the host into whole level ticks.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial tick, e.g. after swapping in a restored level.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}
