//! Time- and frequency-domain line plots rendered to PNG bytes
//!
//! Drawing goes through plotters' bitmap backend into an RGB buffer that is
//! then PNG-encoded in memory. No text is drawn so no system fonts are needed.

use crate::audio::Signal;
use crate::error::{Result, WorkbenchError};
use crate::spectrum::Spectrum;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use std::ops::Range;

/// Plot appearance
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Blank border around the plot area in pixels
    pub margin: u32,

    /// Grid cells along each axis
    pub grid_divisions: usize,

    pub line_color: RGBColor,
    pub grid_color: RGBColor,
    pub background: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            margin: 20,
            grid_divisions: 10,
            line_color: RGBColor(31, 119, 180),
            grid_color: RGBColor(220, 220, 220),
            background: WHITE,
        }
    }
}

impl PlotStyle {
    /// Default style at a different size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> WorkbenchError {
    WorkbenchError::Render(e.to_string())
}

/// Render amplitude over time (seconds)
pub fn render_waveform(signal: &Signal, style: &PlotStyle) -> Result<Vec<u8>> {
    let points: Vec<(f64, f64)> = signal
        .time_axis()
        .into_iter()
        .zip(signal.samples().iter().copied())
        .collect();

    let extent = signal.peak_amplitude().max(1e-6) * 1.05;
    let duration = signal.duration_secs();

    draw_line_plot(&points, 0.0..duration, -extent..extent, style)
}

/// Render magnitude over frequency, x axis fixed to `[0, max_hz]`
pub fn render_spectrum(spectrum: &Spectrum, max_hz: f64, style: &PlotStyle) -> Result<Vec<u8>> {
    let window = spectrum.restrict(max_hz);
    let points: Vec<(f64, f64)> = window
        .frequencies_hz()
        .iter()
        .copied()
        .zip(window.magnitudes().iter().copied())
        .collect();

    let top = window.peak().map_or(0.0, |(_, m)| m).max(1e-9) * 1.05;

    draw_line_plot(&points, 0.0..max_hz, 0.0..top, style)
}

/// Reduce a long trace to a min/max envelope with two points per bucket
///
/// Keeps the visual extent of dense audio traces while bounding the number
/// of segments plotters has to rasterize.
fn envelope(points: &[(f64, f64)], buckets: usize) -> Vec<(f64, f64)> {
    if buckets == 0 || points.len() <= 4 * buckets {
        return points.to_vec();
    }

    let chunk = points.len().div_ceil(buckets);
    let mut reduced = Vec::with_capacity(2 * buckets);

    for group in points.chunks(chunk) {
        let lo = group.iter().min_by(|a, b| a.1.total_cmp(&b.1));
        let hi = group.iter().max_by(|a, b| a.1.total_cmp(&b.1));

        if let (Some(&lo), Some(&hi)) = (lo, hi) {
            if lo.0 <= hi.0 {
                reduced.extend([lo, hi]);
            } else {
                reduced.extend([hi, lo]);
            }
        }
    }

    reduced
}

fn draw_line_plot(
    points: &[(f64, f64)],
    x_range: Range<f64>,
    y_range: Range<f64>,
    style: &PlotStyle,
) -> Result<Vec<u8>> {
    let (width, height) = (style.width, style.height);
    if width == 0 || height == 0 {
        return Err(WorkbenchError::Render(format!(
            "plot size must be non-zero, got {}x{}",
            width, height
        )));
    }

    let trace = envelope(points, width as usize);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&style.background).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(style.margin)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(render_err)?;

        let grid = style.grid_color.stroke_width(1);
        let divisions = style.grid_divisions.max(1);
        let step_x = (x_range.end - x_range.start) / divisions as f64;
        let step_y = (y_range.end - y_range.start) / divisions as f64;

        chart
            .draw_series((0..=divisions).map(|i| {
                let x = x_range.start + i as f64 * step_x;
                PathElement::new(vec![(x, y_range.start), (x, y_range.end)], grid)
            }))
            .map_err(render_err)?;
        chart
            .draw_series((0..=divisions).map(|i| {
                let y = y_range.start + i as f64 * step_y;
                PathElement::new(vec![(x_range.start, y), (x_range.end, y)], grid)
            }))
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(trace, style.line_color.stroke_width(1)))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(render_err)?;

    Ok(png)
}
