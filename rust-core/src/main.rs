mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use filter_workbench::process_audio;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let request = args.to_request();
    let config = args.to_config();

    let response = process_audio(&request, &config)
        .with_context(|| format!("Failed to process {}", request.input.display()))?;

    if let (Some(original), Some(filtered)) = (&response.original_spectrum, &response.filtered_spectrum) {
        if let (Some((f0, m0)), Some((f1, m1))) = (original.peak(), filtered.peak()) {
            log::info!("Spectral peak: original {:.1} Hz ({:.4}), filtered {:.1} Hz ({:.4})", f0, m0, f1, m1);
        }
    }

    let written = response
        .write_to(&args.out_dir)
        .with_context(|| format!("Failed to write outputs to {}", args.out_dir.display()))?;

    for path in written {
        println!("{}", path.display());
    }

    Ok(())
}
