//! Cascade of second-order IIR sections with state management
//!
//! Direct form II transposed, two delay elements per section

/// One second-order section, `a[0]` normalized to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    /// Numerator coefficients b0, b1, b2
    pub b: [f64; 3],

    /// Denominator coefficients 1, a1, a2
    pub a: [f64; 3],
}

impl Biquad {
    /// Create a section, dividing through by `a[0]`
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b: [b[0] / a0, b[1] / a0, b[2] / a0],
            a: [1.0, a[1] / a0, a[2] / a0],
        }
    }

    /// Gain at z = 1
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Delay-line contents after a unit step has settled
    ///
    /// Seeding the state with `x0 * steady_state()` starts the section as if
    /// the input had always been `x0`, which suppresses the start-up transient.
    pub fn steady_state(&self) -> [f64; 2] {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;

        let first = ((b1 - a1 * b0) + (b2 - a2 * b0)) / (1.0 + a1 + a2);
        let second = (1.0 + a1) * first - (b1 - a1 * b0);
        [first, second]
    }
}

/// Stateful section cascade
#[derive(Debug, Clone)]
pub struct SosCascade {
    sections: Vec<Biquad>,

    /// Delay line per section
    state: Vec<[f64; 2]>,
}

impl SosCascade {
    /// Create a cascade with cleared state
    pub fn new(sections: Vec<Biquad>) -> Self {
        let state = vec![[0.0; 2]; sections.len()];
        Self { sections, state }
    }

    /// Process single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut x = input;
        for (s, z) in self.sections.iter().zip(self.state.iter_mut()) {
            let y = s.b[0] * x + z[0];
            z[0] = s.b[1] * x - s.a[1] * y + z[1];
            z[1] = s.b[2] * x - s.a[2] * y;
            x = y;
        }
        x
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output samples (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (clear delay lines)
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|z| *z = [0.0; 2]);
    }

    /// Initial state that makes the whole cascade start in steady state for
    /// a unit step input
    ///
    /// Each section sees the step scaled by the DC gain of the sections in
    /// front of it.
    pub fn steady_state(&self) -> Vec<[f64; 2]> {
        let mut scale = 1.0;
        self.sections
            .iter()
            .map(|s| {
                let [z0, z1] = s.steady_state();
                let zi = [scale * z0, scale * z1];
                scale *= s.dc_gain();
                zi
            })
            .collect()
    }

    /// Seed the delay lines with `steady_state() * level`
    pub fn prime(&mut self, level: f64) {
        self.state = self
            .steady_state()
            .into_iter()
            .map(|[z0, z1]| [z0 * level, z1 * level])
            .collect();
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
