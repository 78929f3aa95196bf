//! Process wrappers for the external HTML → PDF/PNG engines.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use url::Url;

use crate::config::WindowSize;
use crate::errors::AppError;
use crate::export::discovery::{locate_binary, CHROMIUM_CANDIDATES, WEASYPRINT_CANDIDATES};
use crate::export::{PdfEngine, ScreenshotEngine};

/// A program plus the arguments placed before the engine's own arguments.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    pub program: PathBuf,
    pub leading_args: Vec<OsString>,
}

impl EngineCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        EngineCommand {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Runs the command with `args` appended and checks that `output` exists
    /// afterwards. Non-zero exits carry the engine's stderr verbatim.
    async fn run(
        &self,
        engine: &'static str,
        args: Vec<OsString>,
        output: &Path,
    ) -> Result<(), AppError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        debug!("{engine}: {:?} {:?} {:?}", self.program, self.leading_args, args);

        let out = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::EngineNotFound {
                    engine,
                    tried: self.program.display().to_string(),
                }
            } else {
                AppError::io(&self.program, e)
            }
        })?;

        if !out.status.success() {
            return Err(AppError::Engine {
                engine,
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        if !output.is_file() {
            return Err(AppError::Engine {
                engine,
                status: out.status.to_string(),
                stderr: format!("no output written to {}", output.display()),
            });
        }

        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeasyPrint
// ────────────────────────────────────────────────────────────────────────────

/// `weasyprint <html> <pdf>`.
#[derive(Debug, Clone)]
pub struct WeasyPrint {
    command: EngineCommand,
}

impl WeasyPrint {
    pub const NAME: &'static str = "weasyprint";

    pub fn new(command: EngineCommand) -> Self {
        WeasyPrint { command }
    }

    pub fn locate(explicit: Option<&Path>) -> Result<Self, AppError> {
        let program = locate_binary(Self::NAME, explicit, WEASYPRINT_CANDIDATES)?;
        Ok(Self::new(EngineCommand::new(program)))
    }
}

#[async_trait]
impl PdfEngine for WeasyPrint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn render_pdf(&self, html: &Path, pdf: &Path) -> Result<(), AppError> {
        let args = vec![html.as_os_str().to_owned(), pdf.as_os_str().to_owned()];
        self.command.run(Self::NAME, args, pdf).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Chromium (headless)
// ────────────────────────────────────────────────────────────────────────────

/// Headless Chromium: `--print-to-pdf` for PDF, `--screenshot` for PNG.
#[derive(Debug, Clone)]
pub struct Chromium {
    command: EngineCommand,
    window_size: WindowSize,
}

impl Chromium {
    pub const NAME: &'static str = "chromium";

    pub fn new(command: EngineCommand, window_size: WindowSize) -> Self {
        Chromium {
            command,
            window_size,
        }
    }

    pub fn locate(explicit: Option<&Path>, window_size: WindowSize) -> Result<Self, AppError> {
        let program = locate_binary(Self::NAME, explicit, CHROMIUM_CANDIDATES)?;
        Ok(Self::new(EngineCommand::new(program), window_size))
    }

    fn pdf_args(page_url: &str, pdf: &Path) -> Vec<OsString> {
        let mut print_to = OsString::from("--print-to-pdf=");
        print_to.push(pdf);
        vec![
            "--headless".into(),
            "--disable-gpu".into(),
            "--no-pdf-header-footer".into(),
            print_to,
            page_url.into(),
        ]
    }

    fn screenshot_args(page_url: &str, png: &Path, window_size: WindowSize) -> Vec<OsString> {
        let mut shot = OsString::from("--screenshot=");
        shot.push(png);
        vec![
            "--headless".into(),
            "--disable-gpu".into(),
            format!("--window-size={window_size}").into(),
            shot,
            page_url.into(),
        ]
    }
}

/// Chromium resolves pages by URL, and writes its outputs relative to its
/// own working directory, so every path handed to it is made absolute.
fn file_url(html: &Path) -> Result<Url, AppError> {
    let abs = std::fs::canonicalize(html).map_err(|e| AppError::io(html, e))?;
    Url::from_file_path(&abs).map_err(|()| AppError::NotAFile(abs))
}

fn absolute(path: &Path) -> Result<PathBuf, AppError> {
    std::path::absolute(path).map_err(|e| AppError::io(path, e))
}

#[async_trait]
impl PdfEngine for Chromium {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn render_pdf(&self, html: &Path, pdf: &Path) -> Result<(), AppError> {
        let pdf = absolute(pdf)?;
        let args = Self::pdf_args(file_url(html)?.as_str(), &pdf);
        self.command.run(Self::NAME, args, &pdf).await
    }
}

#[async_trait]
impl ScreenshotEngine for Chromium {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn capture_png(&self, html: &Path, png: &Path) -> Result<(), AppError> {
        let png = absolute(png)?;
        let args = Self::screenshot_args(file_url(html)?.as_str(), &png, self.window_size);
        self.command.run(Self::NAME, args, &png).await
    }
}
