/// Fixed timestep accumulator.
/// Game logic runs at a constant `dt` no matter how irregular the host's
/// `requestAnimationFrame` deltas are (Telegram webviews throttle hidden tabs).
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    /// Create an accumulator that runs at most `max_steps` ticks per frame.
    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or NaN deltas count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Drop backlog beyond the cap instead of spiralling.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// Forget any partial step, e.g. after the Mini-App was backgrounded.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
