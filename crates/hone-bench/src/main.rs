//! hone-bench: CLI tool for skeletonization parameter experimentation
//! and diagnostics.
//!
//! Plays the role of the engine's external collaborator: decodes an
//! image file, binarizes it (Otsu by default, or a fixed threshold),
//! runs the thinning engine, and prints detailed per-tick diagnostics.
//! Useful for:
//!
//! - Comparing polarities and border levels on real scans
//! - Measuring per-tick durations on large rasters
//! - Inspecting how quickly a shape collapses to its skeleton
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin hone-bench -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use hone_thin::diagnostics::{Clock, ThinDiagnostics, skeletonize_with_diagnostics};
use hone_thin::{GrayImage, Level, Polarity, StepHistory};

/// Skeletonization parameter experimentation and diagnostics for hone.
///
/// Decodes and binarizes the given image, thins it to convergence, and
/// prints per-tick timing and removal diagnostics.
#[derive(Parser)]
#[command(name = "hone-bench", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Which level represents the shapes to thin.
    #[arg(long, value_enum, default_value_t = PolarityArg::Dark)]
    polarity: PolarityArg,

    /// Level forced onto the outer 1-pixel frame after every tick.
    #[arg(long, value_enum, default_value_t = BorderArg::Background)]
    border: BorderArg,

    /// Binarization threshold (0-255). Defaults to Otsu's method.
    #[arg(long)]
    threshold: Option<u8>,

    /// Write the selected history step as a PNG.
    #[arg(long)]
    save: Option<PathBuf>,

    /// 1-indexed history step to save (clamped). Defaults to the
    /// converged skeleton.
    #[arg(long)]
    step: Option<usize>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

/// Polarity selection.
#[derive(Clone, Copy, ValueEnum)]
enum PolarityArg {
    /// Thin dark shapes on a light background.
    Dark,
    /// Thin light shapes on a dark background.
    Light,
}

impl From<PolarityArg> for Polarity {
    fn from(arg: PolarityArg) -> Self {
        match arg {
            PolarityArg::Dark => Self::DarkObject,
            PolarityArg::Light => Self::LightObject,
        }
    }
}

/// Border level selection.
#[derive(Clone, Copy, ValueEnum)]
enum BorderArg {
    /// Frame the raster with background pixels.
    Background,
    /// Frame the raster with object pixels.
    Object,
}

impl From<BorderArg> for Level {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Background => Self::Background,
            BorderArg::Object => Self::Object,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let decoded = match image::open(&cli.image_path) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };
    let gray = decoded.to_luma8();

    let threshold = cli
        .threshold
        .unwrap_or_else(|| imageproc::contrast::otsu_level(&gray));
    let binary = imageproc::contrast::threshold(
        &gray,
        threshold,
        imageproc::contrast::ThresholdType::Binary,
    );

    let polarity = Polarity::from(cli.polarity);
    let border = Level::from(cli.border);

    eprintln!(
        "Image: {} ({}x{})",
        cli.image_path.display(),
        gray.width(),
        gray.height(),
    );
    eprintln!("Threshold: {threshold}  Polarity: {polarity:?}  Border: {border:?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match skeletonize_with_diagnostics(&binary, polarity, border, &StdClock) {
            Ok((history, diagnostics)) => {
                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                // Write the PNG on the first run only.
                if run == 0
                    && let Some(ref save_path) = cli.save
                {
                    save_step(&history, cli.step, save_path);
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Skeletonization error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Save the selected history step (default: the converged skeleton).
fn save_step(history: &StepHistory, step: Option<usize>, path: &Path) {
    let snapshot: &GrayImage = match step {
        Some(index) => history.step(index),
        None => history.final_step(),
    };
    match snapshot.save(path) {
        Ok(()) => {
            eprintln!(
                "Step {} written to {}",
                step.map_or(history.len(), |index| index.clamp(1, history.len())),
                path.display(),
            );
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", path.display());
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[ThinDiagnostics]) {
    debug_assert!(!all_diagnostics.is_empty(), "no diagnostics to summarize");

    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    let mean_tick_ms = {
        let tick_durations: Vec<f64> = all_diagnostics
            .iter()
            .flat_map(|d| d.ticks.iter())
            .map(|t| t.duration.as_secs_f64() * 1000.0)
            .collect();
        if tick_durations.is_empty() {
            0.0
        } else {
            tick_durations.iter().sum::<f64>() / tick_durations.len() as f64
        }
    };
    println!("Mean tick duration: {mean_tick_ms:.3}ms");
}
