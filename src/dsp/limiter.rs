/// Peak limiter: instant attack, exponential release.
///
/// Gain drops immediately whenever `|input| × gain` would exceed the ceiling
/// and recovers toward unity over the release time.
pub struct Limiter {
    ceiling: f32,
    release: f32,
    gain: f32,
}

impl Limiter {
    /// `threshold_db` is the output ceiling in dBFS (e.g. -1.0).
    pub fn new(threshold_db: f32) -> Self {
        Self {
            ceiling: db_to_gain(threshold_db),
            release: 0.1,
            gain: 1.0,
        }
    }

    pub fn process(&mut self, input: f32, sample_rate: f32) -> f32 {
        let coeff = (-1.0 / (self.release * sample_rate)).exp();
        self.gain = 1.0 - (1.0 - self.gain) * coeff;

        let peak = input.abs();
        if peak * self.gain > self.ceiling {
            self.gain = self.ceiling / peak;
        }
        input * self.gain
    }
}

/// Decibels to linear amplitude
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}
