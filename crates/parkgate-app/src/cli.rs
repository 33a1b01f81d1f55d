// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parkgate_core::GateConfig;
use parkgate_core::error::Result;

#[derive(Debug, Parser)]
#[command(name = "parkgate")]
#[command(about = "Parkgate — license-plate admission gate for parking lots")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Admission database (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a plate image, decide whether the vehicle may enter, and log it
    Check {
        /// Picture of the license plate
        image: PathBuf,

        /// Also write the resized and binarized images into this directory
        #[arg(long, value_name = "DIR")]
        save_debug: Option<PathBuf>,

        /// Recognise text offline with the ocrs models in this directory
        /// (requires the `local-ocr` build feature)
        #[arg(long, value_name = "DIR")]
        local_models: Option<PathBuf>,
    },
    /// Apply the admission rules to a plate number (no OCR, nothing logged)
    Evaluate {
        plate: String,
    },
    /// Show logged admissions
    History {
        /// Only entries for this plate, oldest first
        #[arg(long)]
        plate: Option<String>,

        /// Number of recent entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
}

impl Cli {
    /// Build the run configuration: defaults, then the config file, then the
    /// environment, then command-line flags.
    pub fn resolve_config(&self) -> Result<GateConfig> {
        let config = match &self.config {
            Some(path) => GateConfig::load(path)?,
            None => GateConfig::default(),
        };
        Ok(self.apply_flags(config.with_env_overrides()))
    }

    fn apply_flags(&self, mut config: GateConfig) -> GateConfig {
        if let Some(database) = &self.database {
            config.database_path = Some(database.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_check() {
        let cli = Cli::try_parse_from(["parkgate", "check", "13.png", "--save-debug", "out"]).unwrap();
        match cli.command {
            Command::Check {
                image, save_debug, ..
            } => {
                assert_eq!(image, PathBuf::from("13.png"));
                assert_eq!(save_debug, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["parkgate", "history", "--database", "gate.db", "-l", "5"])
            .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("gate.db")));
        assert!(matches!(cli.command, Command::History { limit: 5, plate: None }));
    }

    #[test]
    fn check_requires_image() {
        assert!(Cli::try_parse_from(["parkgate", "check"]).is_err());
    }

    #[test]
    fn database_flag_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "database_path": "/from/file.db" }}"#).unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["parkgate", "--config", &config_path, "evaluate", "1234599"])
            .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/from/file.db")));

        let cli = Cli::try_parse_from([
            "parkgate",
            "--config",
            &config_path,
            "--database",
            "/from/flag.db",
            "evaluate",
            "1234599",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/from/flag.db")));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["parkgate", "--config", "/nonexistent/gate.json", "evaluate", "1"])
            .unwrap();
        assert!(cli.resolve_config().is_err());
    }
}
