use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use filter_workbench::{apply_filter, compute_fourier, FilterSpec, Signal};
use std::hint::black_box;

const SAMPLE_RATE: u32 = 44100;

/// Two tones, one either side of the 1 kHz default cutoff
fn two_tone(duration_secs: f64) -> Signal {
    let n = (duration_secs * SAMPLE_RATE as f64) as usize;
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            0.5 * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 0.25 * (2.0 * std::f64::consts::PI * 3000.0 * t).sin()
        })
        .collect();
    Signal::new(samples, SAMPLE_RATE).unwrap_or_else(|e| panic!("bench signal: {e}"))
}

fn bench_filtfilt(c: &mut Criterion) {
    let signal = two_tone(1.0);
    let mut group = c.benchmark_group("apply_filter");

    for order in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("lowpass", order), &order, |b, &order| {
            let spec = FilterSpec::lowpass(1000.0, order);
            b.iter(|| apply_filter(black_box(&signal), &spec))
        });
        group.bench_with_input(BenchmarkId::new("bandpass", order), &order, |b, &order| {
            let spec = FilterSpec::bandpass(1000.0, 2000.0, order);
            b.iter(|| apply_filter(black_box(&signal), &spec))
        });
    }

    group.finish();
}

fn bench_fourier(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_fourier");

    for secs in [0.5, 1.0, 5.0] {
        let signal = two_tone(secs);
        group.bench_with_input(BenchmarkId::from_parameter(signal.len()), &signal, |b, signal| {
            b.iter(|| compute_fourier(black_box(signal)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filtfilt, bench_fourier);
criterion_main!(benches);
