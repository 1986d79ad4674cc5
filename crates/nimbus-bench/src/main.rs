use std::path::PathBuf;
use std::process;

use clap::Parser;
use nimbus_bench::report;
use nimbus_bench::runner::BenchmarkRunner;
use nimbus_bench::scenes;

/// CPU benchmark for the volumetric cloud kernel.
#[derive(Parser, Debug)]
#[command(name = "cloud-bench")]
struct Args {
    /// Frames rendered per scene
    #[arg(long, default_value = "30")]
    frames: u32,

    /// Frame width in pixels
    #[arg(long, default_value = "320")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "180")]
    height: u32,

    /// RON parameter file used for every scene instead of the scene presets
    #[arg(long)]
    params: Option<PathBuf>,

    /// Load baseline JSON for comparison
    #[arg(long)]
    baseline: Option<PathBuf>,

    /// Save current results as JSON baseline
    #[arg(long)]
    output: Option<PathBuf>,

    /// Regression threshold percentage
    #[arg(long, default_value = "10")]
    regression_threshold: f64,

    /// Write the last frame of each scene as PNG into this directory
    #[arg(long)]
    png_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut runner = match BenchmarkRunner::new(args.frames, args.width, args.height) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Failed to initialize benchmark: {e}");
            process::exit(1);
        }
    };

    if let Some(ref path) = args.params {
        match nimbus_config::load_params_from_path(path) {
            Ok(params) => {
                log::info!("Using parameters from {}", path.display());
                runner = runner.with_params(params);
            }
            Err(e) => {
                log::error!("{e}");
                process::exit(1);
            }
        }
    }
    if let Some(dir) = args.png_dir {
        runner = runner.with_png_dir(dir);
    }

    let mut results = Vec::new();
    for config in &scenes::standard_scenes() {
        match runner.run_scene(config) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Scene '{}' failed: {e}", config.name);
                process::exit(1);
            }
        }
    }

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = args.output {
        let baseline = report::Baseline {
            timestamp: bench_timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("Failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = args.baseline {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, args.regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, args.regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Seconds since the Unix epoch, tagged for the baseline file.
fn bench_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
