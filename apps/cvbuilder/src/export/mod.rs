//! Exporter — turns rendered HTML on disk into PDF and PNG artifacts by
//! delegating to external engines. Engine failures are fatal; there is no
//! retry and no fallback to another engine.

pub mod discovery;
pub mod engines;

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, PdfEngineKind};
use crate::errors::AppError;

pub use engines::{Chromium, WeasyPrint};

// ────────────────────────────────────────────────────────────────────────────
// Trait definitions
// ────────────────────────────────────────────────────────────────────────────

/// Converts an HTML file into a PDF file.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    fn name(&self) -> &'static str;
    async fn render_pdf(&self, html: &Path, pdf: &Path) -> Result<(), AppError>;
}

/// Captures a PNG screenshot of an HTML file.
#[async_trait]
pub trait ScreenshotEngine: Send + Sync {
    fn name(&self) -> &'static str;
    async fn capture_png(&self, html: &Path, png: &Path) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

/// Which derivative formats a run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// `None` skips PDF export.
    pub pdf: Option<PdfEngineKind>,
    pub png: bool,
}

/// Which artifacts an export run actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exported {
    pub pdf: bool,
    pub png: bool,
}

/// The set of engines configured for one run. Both are optional; an
/// exporter with neither produces HTML only.
#[derive(Default)]
pub struct Exporter {
    pdf: Option<Box<dyn PdfEngine>>,
    screenshot: Option<Box<dyn ScreenshotEngine>>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pdf(mut self, engine: impl PdfEngine + 'static) -> Self {
        self.pdf = Some(Box::new(engine));
        self
    }

    pub fn with_screenshot(mut self, engine: impl ScreenshotEngine + 'static) -> Self {
        self.screenshot = Some(Box::new(engine));
        self
    }

    /// Resolves every requested engine up front, so a missing binary fails
    /// the run before anything is rendered.
    pub fn from_config(config: &Config, options: ExportOptions) -> Result<Self, AppError> {
        let mut exporter = Exporter::new();

        exporter = match options.pdf {
            Some(PdfEngineKind::WeasyPrint) => {
                exporter.with_pdf(WeasyPrint::locate(config.weasyprint_bin.as_deref())?)
            }
            Some(PdfEngineKind::Chromium) => exporter.with_pdf(Chromium::locate(
                config.chromium_bin.as_deref(),
                config.window_size,
            )?),
            None => exporter,
        };

        if options.png {
            exporter = exporter.with_screenshot(Chromium::locate(
                config.chromium_bin.as_deref(),
                config.window_size,
            )?);
        }

        Ok(exporter)
    }

    pub fn produces_pdf(&self) -> bool {
        self.pdf.is_some()
    }

    pub fn produces_png(&self) -> bool {
        self.screenshot.is_some()
    }

    /// Runs the configured engines in order: PDF first, then PNG.
    pub async fn export(&self, html: &Path, pdf: &Path, png: &Path) -> Result<Exported, AppError> {
        let mut exported = Exported::default();

        if let Some(engine) = &self.pdf {
            engine.render_pdf(html, pdf).await?;
            info!("PDF rendered with {}", engine.name());
            exported.pdf = true;
        }

        if let Some(engine) = &self.screenshot {
            engine.capture_png(html, png).await?;
            info!("Screenshot captured with {}", engine.name());
            exported.png = true;
        }

        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct Recording {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl PdfEngine for Recording {
        fn name(&self) -> &'static str {
            "recording-pdf"
        }

        async fn render_pdf(&self, _html: &Path, pdf: &Path) -> Result<(), AppError> {
            self.calls.lock().unwrap().push("pdf");
            fs::write(pdf, b"%PDF").map_err(|e| AppError::io(pdf, e))
        }
    }

    #[async_trait]
    impl ScreenshotEngine for Recording {
        fn name(&self) -> &'static str {
            "recording-png"
        }

        async fn capture_png(&self, _html: &Path, png: &Path) -> Result<(), AppError> {
            self.calls.lock().unwrap().push("png");
            fs::write(png, b"PNG").map_err(|e| AppError::io(png, e))
        }
    }

    #[tokio::test]
    async fn test_no_engines_exports_nothing() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new();
        let out = exporter
            .export(
                &dir.path().join("a.html"),
                &dir.path().join("a.pdf"),
                &dir.path().join("a.png"),
            )
            .await
            .unwrap();
        assert_eq!(out, Exported::default());
        assert!(!exporter.produces_pdf());
        assert!(!exporter.produces_png());
    }

    #[tokio::test]
    async fn test_pdf_runs_before_png() {
        let dir = tempdir().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let exporter = Exporter::new()
            .with_screenshot(Recording {
                calls: calls.clone(),
            })
            .with_pdf(Recording {
                calls: calls.clone(),
            });

        let out = exporter
            .export(
                &dir.path().join("a.html"),
                &dir.path().join("a.pdf"),
                &dir.path().join("a.png"),
            )
            .await
            .unwrap();
        assert_eq!(out, Exported { pdf: true, png: true });
        assert_eq!(*calls.lock().unwrap(), vec!["pdf", "png"]);
        assert!(dir.path().join("a.pdf").is_file());
        assert!(dir.path().join("a.png").is_file());
    }

    #[test]
    fn test_from_config_without_formats_needs_no_binaries() {
        let config = Config::from_vars(|_| None).unwrap();
        let exporter = Exporter::from_config(
            &config,
            ExportOptions {
                pdf: None,
                png: false,
            },
        )
        .unwrap();
        assert!(!exporter.produces_pdf());
    }

    #[test]
    fn test_from_config_reports_missing_engine() {
        let config = Config::from_vars(|k| {
            (k == "CVBUILDER_WEASYPRINT").then(|| "/nonexistent/weasyprint".to_string())
        })
        .unwrap();
        let err = Exporter::from_config(
            &config,
            ExportOptions {
                pdf: Some(PdfEngineKind::WeasyPrint),
                png: false,
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, AppError::EngineNotFound { engine: "weasyprint", .. }));
    }
}
