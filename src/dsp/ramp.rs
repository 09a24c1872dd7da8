/*
Parameter Ramps
===============

A ramp moves a parameter from wherever it is now to a target over a fixed
time, then holds the target.

  Linear        value = start + (target - start) × t
                Used for gain: a note line's output fades to silence
                in a straight line over its lifetime.

  Exponential   value = start × (target / start)^t
                Used for frequency: equal time covers equal musical
                intervals, so a glide sounds even rather than rushing
                through the low notes.

t runs 0 → 1 over the ramp duration. Progress is tracked in seconds so
the same ramp works at any sample rate; elapsed time accumulates in f64
so a 48 s fade of one-sample steps still lands on time.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampCurve {
    Linear,
    Exponential,
}

#[derive(Debug, Clone)]
pub struct Ramp {
    curve: RampCurve,
    value: f32,
    start: f32,
    target: f32,
    duration: f64,
    elapsed: f64,
}

impl Ramp {
    pub fn linear(value: f32) -> Self {
        Self::new(RampCurve::Linear, value)
    }

    pub fn exponential(value: f32) -> Self {
        Self::new(RampCurve::Exponential, value)
    }

    fn new(curve: RampCurve, value: f32) -> Self {
        Self {
            curve,
            value,
            start: value,
            target: value,
            duration: 0.0,
            elapsed: 0.0,
        }
    }

    /// Start moving from the current value to `target` over `duration` seconds.
    ///
    /// A zero (or negative) duration jumps straight to the target.
    pub fn ramp_to(&mut self, target: f32, duration: f32) {
        self.start = self.value;
        self.target = target;
        self.elapsed = 0.0;
        self.duration = f64::from(duration.max(0.0));
        if self.duration == 0.0 {
            self.value = target;
        }
    }

    /// Jump to a value and cancel any ramp in flight.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.start = value;
        self.target = value;
        self.duration = 0.0;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.is_ramping() {
            self.elapsed = (self.elapsed + f64::from(dt)).min(self.duration);
            let t = (self.elapsed / self.duration) as f32;
            self.value = match self.curve {
                RampCurve::Linear => self.start + (self.target - self.start) * t,
                RampCurve::Exponential if self.start > 0.0 && self.target > 0.0 => {
                    self.start * (self.target / self.start).powf(t)
                }
                // Exponential ramps cannot cross or touch zero
                RampCurve::Exponential => self.start + (self.target - self.start) * t,
            };
            if self.elapsed >= self.duration {
                self.value = self.target;
            }
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_ramping(&self) -> bool {
        self.duration > 0.0 && self.elapsed < self.duration
    }
}
