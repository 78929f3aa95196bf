use std::path::PathBuf;

use thiserror::Error;

use crate::loader::ValidationReport;

/// Application-level error type.
/// Every variant is fatal; `exit_code` maps it to the process status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid resume data structure:\n{0}")]
    Validation(ValidationReport),

    #[error("Invalid JSON format in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{kind} not found: {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("{engine} executable not found (tried: {tried})")]
    EngineNotFound { engine: &'static str, tried: String },

    #[error("{engine} failed ({status}): {stderr}")]
    Engine {
        engine: &'static str,
        status: String,
        stderr: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Validation failures exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(_) => 2,
            _ => 1,
        }
    }
}
