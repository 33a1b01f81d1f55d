// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parkgate — license-plate admission gate for parking lots.
//
// Entry point. Initialises logging, resolves configuration once, and runs the
// requested command. Errors travel back here as `ParkgateError` and are turned
// into an operator message and a non-zero exit status.

mod cli;
mod pipeline;
mod services;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use parkgate_core::GateConfig;
use parkgate_core::error::Result;
use parkgate_core::human_errors::humanize_error;
use parkgate_ledger::AdmissionLog;
use parkgate_ocr::OcrSpaceClient;

use cli::{Cli, Command};
use pipeline::Admission;
use services::data_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, class = ?e.class(), "run aborted");
            eprintln!("{}", humanize_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Check {
            image,
            save_debug,
            local_models,
        } => {
            let admission = match local_models {
                Some(dir) => check_offline(&config, &image, save_debug.as_deref(), &dir).await?,
                None => {
                    let client = OcrSpaceClient::new(&config.ocr)?;
                    let log = open_log(&config)?;
                    pipeline::check_plate(&config, &image, &client, &log, save_debug.as_deref())
                        .await?
                }
            };
            print_admission(&admission);
        }

        Command::Evaluate { plate } => {
            let (plate, verdict) = pipeline::evaluate_text(&plate)?;
            println!("{}", verdict.reason().description());
            println!("Plate Number: {plate}");
            println!("Decision: {} ({})", verdict.decision(), verdict.reason());
        }

        Command::History { plate, limit } => {
            let log = open_log(&config)?;
            let entries = match plate {
                Some(plate) => log.entries_for_plate(&plate)?,
                None => log.recent_entries(limit)?,
            };
            if entries.is_empty() {
                println!("No admissions logged.");
                return Ok(());
            }
            for entry in &entries {
                println!(
                    "{:>6}  {}  {:<10} {:<5}  {}",
                    entry.id, entry.entry_time, entry.plate_number, entry.decision, entry.reason
                );
            }
            println!("{} of {} logged admissions", entries.len(), log.count()?);
        }
    }

    Ok(())
}

#[cfg(feature = "local-ocr")]
async fn check_offline(
    config: &GateConfig,
    image: &Path,
    debug_dir: Option<&Path>,
    model_dir: &Path,
) -> Result<Admission> {
    let engine = parkgate_ocr::LocalOcrEngine::new(&parkgate_ocr::local::ModelPaths::from_dir(model_dir))?;
    let log = open_log(config)?;
    pipeline::check_plate(config, image, &engine, &log, debug_dir).await
}

#[cfg(not(feature = "local-ocr"))]
async fn check_offline(
    _config: &GateConfig,
    _image: &Path,
    _debug_dir: Option<&Path>,
    _model_dir: &Path,
) -> Result<Admission> {
    Err(parkgate_core::ParkgateError::Config(
        "this build has no offline OCR; rebuild with `--features local-ocr`".into(),
    ))
}

fn open_log(config: &GateConfig) -> Result<AdmissionLog> {
    AdmissionLog::open(data_dir::database_path(config))
}

fn print_admission(admission: &Admission) {
    tracing::debug!(raw_text = %admission.raw_text, "gate run complete");
    println!("{}", admission.verdict.reason().description());
    println!("Plate Number: {}", admission.record.plate_number);
    println!(
        "Decision: {} ({})",
        admission.record.decision, admission.record.reason
    );
}
