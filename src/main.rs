use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use cache_sift::cli::Args;
use cache_sift::constants::EXIT_CODE_SETUP_FAILED;
use cache_sift::utils::{format_duration, setup_logging};
use cache_sift::{DedupeConfig, FileOutcome, RunReport};

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("💥 {:#}", e);
            ExitCode::from(EXIT_CODE_SETUP_FAILED)
        }
    }
}

fn execute(args: Args) -> Result<u8> {
    let mut config = match &args.config {
        Some(path) => DedupeConfig::from_file(path)?,
        None => DedupeConfig::default(),
    };
    if let Some(base_dir) = args.base_dir {
        config.base_directory = base_dir;
    }
    if args.verbose {
        config.logging.verbosity = "verbose".to_string();
    }
    config.validate()?;

    if let Some(path) = &args.write_config {
        config.to_file(path)?;
        println!("📝 Configuration written to {}", path.display());
        return Ok(0);
    }

    setup_logging(&config.logging.verbosity)?;

    let report = cache_sift::run(&config);
    print_summary(&report);

    Ok(report.exit_code())
}

fn print_summary(report: &RunReport) {
    println!("\n📊 Cache deduplication summary");
    println!("=======================================");
    for file in &report.files {
        match &file.outcome {
            FileOutcome::Deduplicated(stats) => println!(
                "✨ {} ({}): {} read, {} kept, {} duplicates removed in {}",
                file.name,
                stats.strategy,
                stats.total_records,
                stats.unique_records,
                stats.duplicates_removed,
                format_duration(stats.processing_time_ms as f64 / 1000.0)
            ),
            FileOutcome::Skipped => println!("⚠️ {}: not found at {}, skipped", file.name, file.path.display()),
            FileOutcome::Failed(e) if e.is_configuration_error() => {
                println!("🛠️ {}: configuration error, original left untouched ({})", file.name, e)
            }
            FileOutcome::Failed(e) => println!("💥 {}: failed, original left untouched ({})", file.name, e),
        }
    }
    println!(
        "⏱️ Processing time: {}",
        format_duration(report.processing_time_ms as f64 / 1000.0)
    );
}
