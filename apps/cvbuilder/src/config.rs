use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; CLI flags override what is read here.
#[derive(Debug, Clone)]
pub struct Config {
    pub pdf_engine: PdfEngineKind,
    /// Explicit weasyprint binary; `PATH` lookup when unset.
    pub weasyprint_bin: Option<PathBuf>,
    /// Explicit Chromium/Chrome binary; `PATH` lookup when unset.
    pub chromium_bin: Option<PathBuf>,
    pub window_size: WindowSize,
    pub rust_log: String,
}

/// Which external engine turns HTML into PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PdfEngineKind {
    #[default]
    #[value(name = "weasyprint")]
    WeasyPrint,
    Chromium,
}

impl FromStr for PdfEngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weasyprint" => Ok(PdfEngineKind::WeasyPrint),
            "chromium" | "chrome" => Ok(PdfEngineKind::Chromium),
            other => bail!("unknown PDF engine '{other}' (expected weasyprint or chromium)"),
        }
    }
}

/// Headless browser viewport used for PNG screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize {
            width: 1200,
            height: 1600,
        }
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

impl FromStr for WindowSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once([',', 'x'])
            .with_context(|| format!("window size '{s}' must look like 1200,1600"))?;
        let width: u32 = w.trim().parse().context("window width must be a number")?;
        let height: u32 = h.trim().parse().context("window height must be a number")?;
        if width == 0 || height == 0 {
            bail!("window size '{s}' must be non-zero");
        }
        Ok(WindowSize { width, height })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            pdf_engine: non_empty("CVBUILDER_PDF_ENGINE")
                .map(|v| v.parse::<PdfEngineKind>())
                .transpose()
                .context("CVBUILDER_PDF_ENGINE is invalid")?
                .unwrap_or_default(),
            weasyprint_bin: non_empty("CVBUILDER_WEASYPRINT").map(PathBuf::from),
            chromium_bin: non_empty("CVBUILDER_CHROMIUM").map(PathBuf::from),
            window_size: non_empty("CVBUILDER_WINDOW_SIZE")
                .map(|v| v.parse::<WindowSize>())
                .transpose()
                .context("CVBUILDER_WINDOW_SIZE is invalid")?
                .unwrap_or_default(),
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
