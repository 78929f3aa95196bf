//! Resume generation — runs one input through the whole pipeline.
//!
//! Flow: load_resume → Renderer::from_path → render → resolve engines →
//!       stage → export → publish.
//!
//! Artifacts are first written to a hidden staging directory inside the
//! output directory and only moved into place once every requested format
//! has been produced. A failed run leaves no new files behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AppError;
use crate::export::Exporter;
use crate::loader::load_resume;
use crate::render::Renderer;

const OUTPUT_SUFFIX: &str = "_resume";

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub template: PathBuf,
    /// Defaults to the current directory. Created if missing.
    pub output_dir: Option<PathBuf>,
}

/// Absolute paths of the files a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub html: PathBuf,
    pub pdf: Option<PathBuf>,
    pub png: Option<PathBuf>,
}

/// `<dir>/<base>.html`, `.pdf`, `.png`.
#[derive(Debug, Clone)]
struct ArtifactPaths {
    html: PathBuf,
    pdf: PathBuf,
    png: PathBuf,
}

impl ArtifactPaths {
    fn new(dir: &Path, base: &str) -> Self {
        ArtifactPaths {
            html: dir.join(format!("{base}.html")),
            pdf: dir.join(format!("{base}.pdf")),
            png: dir.join(format!("{base}.png")),
        }
    }
}

/// `<input stem>_resume`, e.g. `johndoe.json` → `johndoe_resume`.
pub fn output_base_name(input: &Path) -> Result<String, AppError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::NotAFile(input.to_path_buf()))?;
    Ok(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Runs one résumé through the pipeline.
///
/// `exporter` is only called once the input has been validated and
/// rendered, so a bad input is reported as such even when an engine is
/// missing.
pub async fn generate_resume(
    request: &GenerateRequest,
    exporter: impl FnOnce() -> Result<Exporter, AppError>,
) -> Result<GeneratedArtifacts, AppError> {
    // Step 1: Load and validate
    let resume = load_resume(&request.input)?;

    // Step 2: Template
    let renderer = Renderer::from_path(&request.template)?;

    // Step 3: Render
    let html = renderer.render(&resume)?;
    info!(
        "Rendered {} bytes of HTML from {}",
        html.len(),
        renderer.template_name()
    );

    // Step 4: Resolve engines
    let exporter = exporter()?;
    info!(
        "Export: pdf={} png={}",
        exporter.produces_pdf(),
        exporter.produces_png()
    );

    // Step 5: Stage
    let output_dir = request
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir).map_err(|e| AppError::io(&output_dir, e))?;

    let base = output_base_name(&request.input)?;
    let staging = tempfile::Builder::new()
        .prefix(".cvbuilder-")
        .tempdir_in(&output_dir)
        .map_err(|e| AppError::io(&output_dir, e))?;
    let staged = ArtifactPaths::new(staging.path(), &base);
    fs::write(&staged.html, html).map_err(|e| AppError::io(&staged.html, e))?;

    // Step 6: Export
    let exported = exporter
        .export(&staged.html, &staged.pdf, &staged.png)
        .await?;

    // Step 7: Publish. HTML goes last so it only appears once the derived
    // formats are in place.
    let target = ArtifactPaths::new(&output_dir, &base);
    let mut moves: Vec<(&Path, &Path)> = Vec::with_capacity(3);
    if exported.pdf {
        moves.push((staged.pdf.as_path(), target.pdf.as_path()));
    }
    if exported.png {
        moves.push((staged.png.as_path(), target.png.as_path()));
    }
    moves.push((staged.html.as_path(), target.html.as_path()));
    publish_all(&moves)?;

    staging
        .close()
        .map_err(|e| AppError::io(&output_dir, e))?;

    let html_path = absolute(&target.html)?;
    info!("HTML resume generated: {}", html_path.display());
    let pdf_path = exported.pdf.then(|| absolute(&target.pdf)).transpose()?;
    if let Some(p) = &pdf_path {
        info!("PDF resume generated: {}", p.display());
    }
    let png_path = exported.png.then(|| absolute(&target.png)).transpose()?;
    if let Some(p) = &png_path {
        info!("Screenshot generated: {}", p.display());
    }

    Ok(GeneratedArtifacts {
        html: html_path,
        pdf: pdf_path,
        png: png_path,
    })
}

/// Moves every staged file over its final name, in order.
///
/// Targets that exist but are not regular files fail the whole batch before
/// anything moves. If a move still fails, files already moved by this call
/// are removed again.
fn publish_all(moves: &[(&Path, &Path)]) -> Result<(), AppError> {
    for (_, target) in moves {
        if target.exists() && !target.is_file() {
            return Err(AppError::NotAFile(target.to_path_buf()));
        }
    }

    let mut published: Vec<&Path> = Vec::with_capacity(moves.len());
    for (staged, target) in moves {
        if let Err(e) = fs::rename(staged, target) {
            for done in &published {
                let _ = fs::remove_file(done);
            }
            return Err(AppError::io(*target, e));
        }
        published.push(target);
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf, AppError> {
    fs::canonicalize(path).map_err(|e| AppError::io(path, e))
}
