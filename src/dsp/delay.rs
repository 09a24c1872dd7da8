/// Longest delay the line can hold: 100ms at 192kHz
pub const MAX_DELAY_SAMPLES: usize = 19_200;

/// Circular delay line with fractional (linearly interpolated) reads.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new() -> Self {
        Self {
            buffer: vec![0.0; MAX_DELAY_SAMPLES],
            write_pos: 0,
        }
    }

    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % MAX_DELAY_SAMPLES;
    }

    /// Read `delay` samples behind the most recent write.
    pub fn read_interpolated(&self, delay: f32) -> f32 {
        let delay = delay.clamp(1.0, (MAX_DELAY_SAMPLES - 2) as f32);
        let whole = delay.floor() as usize;
        let frac = delay - whole as f32;

        let newest = (self.write_pos + MAX_DELAY_SAMPLES - 1) % MAX_DELAY_SAMPLES;
        let a = self.buffer[(newest + MAX_DELAY_SAMPLES - whole) % MAX_DELAY_SAMPLES];
        let b = self.buffer[(newest + MAX_DELAY_SAMPLES - whole - 1) % MAX_DELAY_SAMPLES];
        a + (b - a) * frac
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}
