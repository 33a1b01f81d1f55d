// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution.

use std::path::PathBuf;

use parkgate_core::GateConfig;

const DATABASE_FILE: &str = "admissions.db";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = base_dir(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .join("parkgate");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Admission database location: the configured path, or `<data dir>/admissions.db`.
pub fn database_path(config: &GateConfig) -> PathBuf {
    config
        .database_path
        .clone()
        .unwrap_or_else(|| data_dir().join(DATABASE_FILE))
}

fn base_dir(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| !p.as_os_str().is_empty()) {
        return xdg;
    }
    if let Some(home) = home {
        return home.join(".local").join("share");
    }
    // Last resort
    PathBuf::from("/tmp")
}
