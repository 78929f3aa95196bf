//! Loader — reads a résumé JSON file, validates it and converts it to the
//! typed model. A document that fails validation never reaches the renderer.

pub mod validation;

use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::Resume;

pub use validation::{validate_document, ValidationReport};

/// Loads and validates the résumé at `path`.
pub fn load_resume(path: &Path) -> Result<Resume, AppError> {
    ensure_file(path, "JSON file")?;

    let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let resume = parse_document(&raw, path)?;

    info!(
        "JSON loaded and validated: {} sections, {} items found",
        resume.sections.len(),
        resume.content_item_count()
    );
    Ok(resume)
}

/// Parses and validates a résumé from a JSON string.
#[cfg(test)]
pub fn parse_resume(raw: &str) -> Result<Resume, AppError> {
    parse_document(raw, Path::new("<input>"))
}

fn parse_document(raw: &str, origin: &Path) -> Result<Resume, AppError> {
    let doc: serde_json::Value =
        serde_json::from_str(raw).map_err(|source| AppError::InvalidJson {
            path: origin.to_path_buf(),
            source,
        })?;

    let report = validate_document(&doc);
    if !report.passed() {
        return Err(AppError::Validation(report));
    }

    // The schema check above covers everything serde enforces, so a failure
    // here means the two have drifted apart.
    serde_json::from_value(doc).map_err(|e| AppError::Internal(e.into()))
}

/// Fails unless `path` exists and is a regular file.
pub fn ensure_file(path: &Path, kind: &'static str) -> Result<(), AppError> {
    if !path.exists() {
        return Err(AppError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(AppError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}
