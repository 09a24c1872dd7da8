//! Reverb - room simulation via delay networks
//!
//! Classic Schroeder layout: four parallel comb filters feed two allpass
//! filters in series.
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         ├──→ [Comb 3] ──┼──→ (+) ──→ [Allpass 1] ──→ [Allpass 2] ──→ Wet
//!         └──→ [Comb 4] ──┘
//! ```
//!
//! The decay time is given directly in seconds (RT60, time to fall 60 dB).
//! Each comb's feedback is derived from its own delay so all four die away
//! together:
//!
//! ```text
//! g = 10^(-3 · delay / decay)
//! ```

const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];
const ALLPASS_FEEDBACK: f32 = 0.5;

/// Feedback comb with one-pole damping in the loop
struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
    damp: f32,
    filter_state: f32,
}

impl CombFilter {
    fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
            damp: 0.3,
            filter_state: 0.0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];
        self.filter_state = output * (1.0 - self.damp) + self.filter_state * self.damp;
        self.buffer[self.write_pos] = input + self.filter_state * self.feedback;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }
}

struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl AllpassFilter {
    fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -ALLPASS_FEEDBACK * input + delayed;
        self.buffer[self.write_pos] = input + ALLPASS_FEEDBACK * output;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }
}

/// Schroeder reverb with a dry/wet blend.
pub struct SchroederReverb {
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
    wet: f32,
}

impl SchroederReverb {
    /// Build a reverb for `sample_rate` that decays over `decay` seconds.
    pub fn new(sample_rate: f32, decay: f32, wet: f32) -> Self {
        let to_samples = |ms: f32| (ms * sample_rate / 1000.0) as usize;
        let decay = decay.max(0.1);

        let combs = COMB_DELAYS_MS
            .iter()
            .map(|&ms| {
                let mut comb = CombFilter::new(to_samples(ms));
                let delay_secs = ms / 1000.0;
                comb.feedback = 10.0_f32.powf(-3.0 * delay_secs / decay).min(0.98);
                comb
            })
            .collect();
        let allpasses = ALLPASS_DELAYS_MS
            .iter()
            .map(|&ms| AllpassFilter::new(to_samples(ms)))
            .collect();

        Self {
            combs,
            allpasses,
            wet: wet.clamp(0.0, 1.0),
        }
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let mut wet = 0.0;
        for comb in &mut self.combs {
            wet += comb.process(input);
        }
        wet *= 0.25;

        for allpass in &mut self.allpasses {
            wet = allpass.process(wet);
        }

        input * (1.0 - self.wet) + wet * self.wet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_leaves_a_tail() {
        let mut reverb = SchroederReverb::new(48_000.0, 5.0, 1.0);
        reverb.process(1.0);

        let tail = (0..5_000).any(|_| reverb.process(0.0).abs() > 0.001);
        assert!(tail, "reverb should ring after an impulse");
    }

    #[test]
    fn long_decay_stays_stable() {
        let mut reverb = SchroederReverb::new(48_000.0, 30.0, 0.4);
        for _ in 0..20_000 {
            let out = reverb.process(0.1);
            assert!(out.is_finite());
            assert!(out.abs() < 10.0, "reverb output unstable: {out}");
        }
    }

    #[test]
    fn dry_setting_passes_input() {
        let mut reverb = SchroederReverb::new(48_000.0, 2.0, 0.0);
        assert_eq!(reverb.process(0.7), 0.7);
    }
}
