//! Butterworth IIR filter design
//!
//! Analog prototype -> frequency transform -> bilinear transform, kept in
//! zero/pole/gain form and then split into second-order sections.

use super::sos::Biquad;
use crate::error::{Result, WorkbenchError};
use num_complex::Complex64;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Imaginary parts below this are treated as real poles
const REAL_POLE_TOLERANCE: f64 = 1e-10;

/// Filter family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

impl FilterKind {
    /// Number of cutoff frequencies the family needs
    pub fn cutoff_count(&self) -> usize {
        match self {
            FilterKind::Lowpass | FilterKind::Highpass => 1,
            FilterKind::Bandpass => 2,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Lowpass => "Lowpass",
            FilterKind::Highpass => "Highpass",
            FilterKind::Bandpass => "Bandpass",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterKind {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lowpass" | "low" => Ok(FilterKind::Lowpass),
            "highpass" | "high" => Ok(FilterKind::Highpass),
            "bandpass" | "band" => Ok(FilterKind::Bandpass),
            other => Err(WorkbenchError::InvalidFilterSpec(format!(
                "unknown filter type '{}', expected Lowpass, Highpass or Bandpass",
                other
            ))),
        }
    }
}

/// User-facing filter request: family, cutoff(s) in Hz, order
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,

    /// One cutoff for Lowpass/Highpass, `[low, high]` for Bandpass (Hz)
    pub cutoffs_hz: Vec<f64>,

    /// Butterworth order (before the zero-phase doubling)
    pub order: usize,
}

impl FilterSpec {
    pub fn lowpass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Lowpass,
            cutoffs_hz: vec![cutoff_hz],
            order,
        }
    }

    pub fn highpass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Highpass,
            cutoffs_hz: vec![cutoff_hz],
            order,
        }
    }

    pub fn bandpass(low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Bandpass,
            cutoffs_hz: vec![low_hz, high_hz],
            order,
        }
    }

    /// Validate against a sample rate and normalize cutoffs by Nyquist
    ///
    /// # Errors
    /// `InvalidFilterSpec` when the order is zero, the cutoff count does not
    /// match the family, a cutoff is not strictly inside (0, Nyquist), or a
    /// bandpass has `low >= high`.
    pub fn normalize(&self, sample_rate: u32) -> Result<NormalizedBand> {
        let invalid = |msg: String| Err(WorkbenchError::InvalidFilterSpec(msg));

        if self.order == 0 {
            return invalid("filter order must be at least 1".into());
        }

        let expected = self.kind.cutoff_count();
        if self.cutoffs_hz.len() != expected {
            return invalid(format!(
                "{} filter needs {} cutoff frequenc{}, got {}",
                self.kind,
                expected,
                if expected == 1 { "y" } else { "ies" },
                self.cutoffs_hz.len()
            ));
        }

        let nyquist = 0.5 * sample_rate as f64;
        let mut normalized = Vec::with_capacity(expected);
        for &cutoff in &self.cutoffs_hz {
            if !(cutoff > 0.0 && cutoff < nyquist) {
                return invalid(format!(
                    "cutoff {} Hz must lie strictly between 0 and the Nyquist frequency ({} Hz)",
                    cutoff, nyquist
                ));
            }
            normalized.push(cutoff / nyquist);
        }

        match self.kind {
            FilterKind::Lowpass => Ok(NormalizedBand::Low(normalized[0])),
            FilterKind::Highpass => Ok(NormalizedBand::High(normalized[0])),
            FilterKind::Bandpass => {
                let (low, high) = (normalized[0], normalized[1]);
                if low >= high {
                    return invalid(format!(
                        "bandpass low cutoff ({} Hz) must be below high cutoff ({} Hz)",
                        self.cutoffs_hz[0], self.cutoffs_hz[1]
                    ));
                }
                Ok(NormalizedBand::Pass(low, high))
            }
        }
    }
}

/// Band edges normalized to (0, 1), where 1 is Nyquist
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizedBand {
    /// Passband below the edge
    Low(f64),
    /// Passband above the edge
    High(f64),
    /// Passband between the edges
    Pass(f64, f64),
}

/// Zero/pole/gain representation
#[derive(Debug, Clone)]
pub struct Zpk {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

impl Zpk {
    /// Poles minus zeros (zeros at infinity)
    fn relative_degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Finished digital Butterworth design
#[derive(Debug, Clone)]
pub struct ButterworthDesign {
    pub zpk: Zpk,
    pub sections: Vec<Biquad>,
}

impl ButterworthDesign {
    /// Expand the sections into transfer-function polynomials `(b, a)`
    ///
    /// Coefficients are in descending powers of z, with `a[0] == 1`.
    pub fn to_transfer_function(&self) -> (Vec<f64>, Vec<f64>) {
        let mut b = vec![1.0];
        let mut a = vec![1.0];
        for section in &self.sections {
            b = poly_mul(&b, &section.b);
            a = poly_mul(&a, &section.a);
        }

        // First-order sections carry a trailing zero coefficient
        let len = self.zpk.poles.len() + 1;
        b.truncate(len);
        a.truncate(len);
        (b, a)
    }

    /// Number of poles of the digital filter
    pub fn order(&self) -> usize {
        self.zpk.poles.len()
    }
}

/// Design a digital Butterworth filter
///
/// # Arguments
/// * `order` - Prototype order N (bandpass designs end up with 2N poles)
/// * `band` - Normalized band edges, from `FilterSpec::normalize`
pub fn butter(order: usize, band: NormalizedBand) -> Result<ButterworthDesign> {
    if order == 0 {
        return Err(WorkbenchError::InvalidFilterSpec(
            "filter order must be at least 1".into(),
        ));
    }

    let prototype = analog_prototype(order);

    // Pre-warp with fs = 2 so the bilinear transform lands on the requested edges
    let warp = |wn: f64| 4.0 * (PI * wn / 2.0).tan();

    let analog = match band {
        NormalizedBand::Low(wn) => lowpass_to_lowpass(&prototype, warp(wn)),
        NormalizedBand::High(wn) => lowpass_to_highpass(&prototype, warp(wn)),
        NormalizedBand::Pass(lo, hi) => {
            let (w1, w2) = (warp(lo), warp(hi));
            lowpass_to_bandpass(&prototype, (w1 * w2).sqrt(), w2 - w1)
        }
    };

    let zpk = bilinear(&analog, 2.0);
    let sections = zpk_to_sections(&zpk);

    log::debug!(
        "Designed order-{} Butterworth {:?}: {} poles in {} sections, gain {:e}",
        order,
        band,
        zpk.poles.len(),
        sections.len(),
        zpk.gain
    );

    Ok(ButterworthDesign { zpk, sections })
}

/// Analog lowpass prototype: N poles evenly spaced on the left unit semicircle
fn analog_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|i| {
            let m = 1.0 - n + 2.0 * i as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

fn lowpass_to_lowpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();

    Zpk {
        zeros: proto.zeros.iter().map(|&z| z * wo).collect(),
        poles: proto.poles.iter().map(|&p| p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

fn lowpass_to_highpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo / z).collect();
    let poles: Vec<Complex64> = proto.poles.iter().map(|&p| wo / p).collect();

    // Zeros at infinity move to the origin
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

    let num: Complex64 = proto.zeros.iter().map(|&z| -z).product();
    let den: Complex64 = proto.poles.iter().map(|&p| -p).product();

    Zpk {
        zeros,
        poles,
        gain: proto.gain * (num / den).re,
    }
}

fn lowpass_to_bandpass(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let wo_sq = Complex64::new(wo * wo, 0.0);

    // Each root r splits into r*bw/2 +- sqrt((r*bw/2)^2 - wo^2)
    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.iter().map(|&r| r * (bw / 2.0)).collect();
        let upper = scaled.iter().map(|&r| r + (r * r - wo_sq).sqrt());
        let lower = scaled.iter().map(|&r| r - (r * r - wo_sq).sqrt());
        upper.chain(lower).collect()
    };

    let mut zeros = split(&proto.zeros);
    let poles = split(&proto.poles);
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

    Zpk {
        zeros,
        poles,
        gain: proto.gain * bw.powi(degree as i32),
    }
}

/// Bilinear transform s -> z; zeros at infinity map to z = -1
fn bilinear(analog: &Zpk, fs: f64) -> Zpk {
    let degree = analog.relative_degree();
    let fs2 = Complex64::new(2.0 * fs, 0.0);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let poles = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
    zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

    let num: Complex64 = analog.zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = analog.poles.iter().map(|&p| fs2 - p).product();

    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

/// Split a digital ZPK design into second-order sections
///
/// One section per conjugate pole pair; real poles are paired up and an odd
/// one out becomes a first-order section. Butterworth zeros all sit on the
/// real axis, so they are handed out two per section, alternating ends of
/// the sorted list (a bandpass section then gets one zero at +1 and one at
/// -1). The overall gain goes on the first section.
fn zpk_to_sections(zpk: &Zpk) -> Vec<Biquad> {
    let mut complex_poles: Vec<Complex64> = zpk
        .poles
        .iter()
        .copied()
        .filter(|p| p.im > REAL_POLE_TOLERANCE)
        .collect();
    let mut real_poles: Vec<f64> = zpk
        .poles
        .iter()
        .filter(|p| p.im.abs() <= REAL_POLE_TOLERANCE)
        .map(|p| p.re)
        .collect();

    complex_poles.sort_by(|a, b| a.norm().total_cmp(&b.norm()));
    real_poles.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

    let mut zeros: Vec<f64> = zpk.zeros.iter().map(|z| z.re).collect();
    zeros.sort_by(f64::total_cmp);
    let mut zeros: VecDeque<f64> = zeros.into();

    let mut take_zero = |from_front: bool| -> Option<f64> {
        if from_front {
            zeros.pop_front()
        } else {
            zeros.pop_back()
        }
    };

    let mut sections = Vec::new();

    for p in complex_poles {
        let a = [1.0, -2.0 * p.re, p.norm_sqr()];
        let b = zero_pair_poly(take_zero(true), take_zero(false));
        sections.push(Biquad::new(b, a));
    }

    for pair in real_poles.chunks(2) {
        let (b, a) = if let [p1, p2] = *pair {
            (
                zero_pair_poly(take_zero(true), take_zero(false)),
                [1.0, -(p1 + p2), p1 * p2],
            )
        } else {
            (zero_pair_poly(take_zero(true), None), [1.0, -pair[0], 0.0])
        };
        sections.push(Biquad::new(b, a));
    }

    if let Some(first) = sections.first_mut() {
        for coeff in first.b.iter_mut() {
            *coeff *= zpk.gain;
        }
    }

    sections
}

/// Numerator polynomial with up to two real zeros
fn zero_pair_poly(z1: Option<f64>, z2: Option<f64>) -> [f64; 3] {
    match (z1, z2) {
        (Some(z1), Some(z2)) => [1.0, -(z1 + z2), z1 * z2],
        (Some(z), None) | (None, Some(z)) => [1.0, -z, 0.0],
        (None, None) => [1.0, 0.0, 0.0],
    }
}

fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}

/// Calculate frequency response of a section cascade
///
/// # Arguments
/// * `sections` - Second-order sections
/// * `frequencies` - Normalized frequencies (units of π rad/sample, 1 = Nyquist)
///
/// # Returns
/// Complex frequency response H(e^jω)
pub fn frequency_response(sections: &[Biquad], frequencies: &[f64]) -> Vec<Complex64> {
    frequencies
        .iter()
        .map(|&omega| {
            let z1 = Complex64::from_polar(1.0, -omega * PI);
            let z2 = z1 * z1;

            sections.iter().fold(Complex64::new(1.0, 0.0), |acc, s| {
                let num = s.b[0] + z1 * s.b[1] + z2 * s.b[2];
                let den = s.a[0] + z1 * s.a[1] + z2 * s.a[2];
                acc * num / den
            })
        })
        .collect()
}

/// Calculate magnitude response in dB
pub fn magnitude_response_db(sections: &[Biquad], frequencies: &[f64]) -> Vec<f64> {
    frequency_response(sections, frequencies)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-300).log10())
        .collect()
}
