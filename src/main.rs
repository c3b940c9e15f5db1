use anyhow::Result;
use capture_validator::{
    AppError, CaptureRecord, CaptureValidator, ReferenceClock, ValidationError, ValidatorConfig,
};
use clap::Parser;
use log::info;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Check that a photo carries a fresh, in-region GPS capture.
#[derive(Parser, Debug)]
#[command(name = "capture-validator", version, about)]
struct Args {
    /// Image file to validate
    file: PathBuf,

    /// Clock the timezone-less EXIF timestamp is compared against (local or utc)
    #[arg(long)]
    clock: Option<ReferenceClock>,

    /// Maximum capture age in hours
    #[arg(long)]
    max_age_hours: Option<i64>,
}

#[derive(Serialize, Debug)]
struct ValidationReport {
    file_path: String,
    file_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<CaptureRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ValidationError>,
}

fn run(args: Args) -> Result<bool, AppError> {
    let mut config = ValidatorConfig::new()?;

    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    if let Some(clock) = args.clock {
        config.reference_clock = clock;
    }
    if let Some(hours) = args.max_age_hours {
        config.freshness_window_hours = hours;
    }
    log::debug!("Validator configuration: {:?}", config);

    let bytes = std::fs::read(&args.file)?;
    let file_hash = format!("{:x}", Sha256::digest(&bytes));
    log::debug!("Read {} bytes from {:?} ({})", bytes.len(), args.file, file_hash);

    let validator = CaptureValidator::new(config);
    let outcome = validator.validate(&bytes);
    let accepted = outcome.is_ok();
    match &outcome {
        Ok(_) => info!("Accepted {:?}", args.file),
        Err(e) => log::warn!("Rejected {:?}: {:?} {}", args.file, e.kind, e),
    }

    let (record, error) = match outcome {
        Ok(record) => (Some(record), None),
        Err(e) => (None, Some(e)),
    };
    let report = ValidationReport {
        file_path: args.file.to_string_lossy().to_string(),
        file_hash,
        record,
        error,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(accepted)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !run(args)? {
        std::process::exit(2);
    }
    Ok(())
}
