//! Locating external engine binaries.
//!
//! An explicit path (or bare program name) from configuration wins;
//! otherwise each candidate name is looked up on `PATH` in order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::AppError;

pub const WEASYPRINT_CANDIDATES: &[&str] = &["weasyprint"];

pub const CHROMIUM_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

pub fn locate_binary(
    engine: &'static str,
    explicit: Option<&Path>,
    candidates: &[&str],
) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return which::which(path).map_err(|_| AppError::EngineNotFound {
            engine,
            tried: path.display().to_string(),
        });
    }

    for name in candidates {
        if let Ok(found) = which::which(name) {
            debug!("{engine}: using {}", found.display());
            return Ok(found);
        }
    }

    Err(AppError::EngineNotFound {
        engine,
        tried: candidates.join(", "),
    })
}
