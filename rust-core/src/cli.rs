//! Command-line argument parsing.

use clap::Parser;
use filter_workbench::render::PlotStyle;
use filter_workbench::{FilterKind, FilterRequest, FilterSpec, PipelineConfig};
use std::path::PathBuf;

/// Cutoff range accepted from the command line (Hz)
const CUTOFF_RANGE_HZ: std::ops::RangeInclusive<f64> = 100.0..=5000.0;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "filter-workbench")]
#[command(about = "Apply a zero-phase Butterworth filter to a WAV file and plot the result", long_about = None)]
pub struct Args {
    /// WAV file to filter
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Filter type: lowpass, highpass or bandpass
    #[arg(long, value_name = "TYPE", default_value = "lowpass")]
    pub filter: FilterKind,

    /// Cutoff frequency in Hz (give two for bandpass: low then high)
    #[arg(long = "cutoff", value_name = "HZ", value_parser = parse_cutoff)]
    pub cutoffs: Vec<f64>,

    /// Filter order
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub order: u8,

    /// Also compute and plot the Fourier spectra
    #[arg(long)]
    pub fourier: bool,

    /// Directory for the filtered audio and plots
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Upper edge of the spectrum plots (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 5000.0)]
    pub max_freq: f64,

    /// Plot width in pixels
    #[arg(long, value_name = "PX", default_value_t = 900)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, value_name = "PX", default_value_t = 400)]
    pub height: u32,
}

/// Parse a cutoff, rounded to whole Hz and limited to the UI range
fn parse_cutoff(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    let rounded = value.round();

    if !CUTOFF_RANGE_HZ.contains(&rounded) {
        return Err(format!(
            "cutoff must be between {} and {} Hz",
            CUTOFF_RANGE_HZ.start(),
            CUTOFF_RANGE_HZ.end()
        ));
    }
    Ok(rounded)
}

impl Args {
    /// Cutoffs to use, falling back to 1000 Hz (and 2000 Hz for bandpass)
    pub fn cutoffs(&self) -> Vec<f64> {
        if !self.cutoffs.is_empty() {
            return self.cutoffs.clone();
        }

        match self.filter {
            FilterKind::Bandpass => vec![1000.0, 2000.0],
            FilterKind::Lowpass | FilterKind::Highpass => vec![1000.0],
        }
    }

    /// Build the immutable request for this invocation
    pub fn to_request(&self) -> FilterRequest {
        let spec = FilterSpec {
            kind: self.filter,
            cutoffs_hz: self.cutoffs(),
            order: self.order as usize,
        };

        FilterRequest::new(self.input.clone(), spec).with_spectrum(self.fourier)
    }

    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            spectrum_max_hz: self.max_freq,
            plot_style: PlotStyle::with_size(self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["filter-workbench", "in.wav"]).unwrap();
        let request = args.to_request();

        assert_eq!(request.spec, FilterSpec::lowpass(1000.0, 4));
        assert!(!request.compute_spectrum);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert_eq!(args.to_config().spectrum_max_hz, 5000.0);
    }

    #[test]
    fn test_bandpass_defaults_and_explicit_cutoffs() {
        let args = Args::try_parse_from(["filter-workbench", "in.wav", "--filter", "bandpass"]).unwrap();
        assert_eq!(args.to_request().spec, FilterSpec::bandpass(1000.0, 2000.0, 4));

        let args = Args::try_parse_from([
            "filter-workbench",
            "in.wav",
            "--filter",
            "Bandpass",
            "--cutoff",
            "499.6",
            "--cutoff",
            "1500",
            "--order",
            "6",
            "--fourier",
        ])
        .unwrap();
        let request = args.to_request();
        assert_eq!(request.spec, FilterSpec::bandpass(500.0, 1500.0, 6));
        assert!(request.compute_spectrum);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["filter-workbench", "in.wav", "--cutoff", "50"]).is_err());
        assert!(Args::try_parse_from(["filter-workbench", "in.wav", "--order", "9"]).is_err());
        assert!(Args::try_parse_from(["filter-workbench", "in.wav", "--order", "0"]).is_err());
        assert!(Args::try_parse_from(["filter-workbench", "in.wav", "--filter", "notch"]).is_err());
    }
}
