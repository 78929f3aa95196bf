use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, PdfEngineKind};
use crate::export::ExportOptions;
use crate::pipeline::GenerateRequest;

const EXAMPLES: &str = "\
Examples:
  cvbuilder -i resume.json -t template.html
  cvbuilder -i resume.json -t template.html -o ./output
  cvbuilder -i resume.json -t template.html --png --pdf-engine chromium";

/// Generate HTML and PDF resumes from JSON data using Jinja-style templates.
#[derive(Debug, Parser)]
#[command(name = "cvbuilder", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Path to JSON resume data file
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to HTML template file
    #[arg(short, long, value_name = "PATH")]
    pub template: PathBuf,

    /// Output directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also capture a PNG screenshot with headless Chromium
    #[arg(long)]
    pub png: bool,

    /// Skip PDF export
    #[arg(long)]
    pub no_pdf: bool,

    /// PDF engine, overrides CVBUILDER_PDF_ENGINE
    #[arg(long, value_enum, value_name = "ENGINE", conflicts_with = "no_pdf")]
    pub pdf_engine: Option<PdfEngineKind>,
}

impl Cli {
    pub fn request(&self) -> GenerateRequest {
        GenerateRequest {
            input: self.input.clone(),
            template: self.template.clone(),
            output_dir: self.output.clone(),
        }
    }

    pub fn export_options(&self, config: &Config) -> ExportOptions {
        ExportOptions {
            pdf: (!self.no_pdf).then(|| self.pdf_engine.unwrap_or(config.pdf_engine)),
            png: self.png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_vars(|_| None).unwrap()
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["cvbuilder", "-i", "a.json", "-t", "t.html", "-o", "out"])
            .unwrap();
        let req = cli.request();
        assert_eq!(req.input, PathBuf::from("a.json"));
        assert_eq!(req.template, PathBuf::from("t.html"));
        assert_eq!(req.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_output_is_optional() {
        let cli = Cli::try_parse_from(["cvbuilder", "--input", "a.json", "--template", "t.html"])
            .unwrap();
        assert_eq!(cli.request().output_dir, None);
    }

    #[test]
    fn test_input_and_template_required() {
        assert!(Cli::try_parse_from(["cvbuilder", "-t", "t.html"]).is_err());
        assert!(Cli::try_parse_from(["cvbuilder", "-i", "a.json"]).is_err());
    }

    #[test]
    fn test_default_exports_pdf_with_configured_engine() {
        let cli = Cli::try_parse_from(["cvbuilder", "-i", "a.json", "-t", "t.html"]).unwrap();
        let opts = cli.export_options(&config());
        assert_eq!(opts.pdf, Some(PdfEngineKind::WeasyPrint));
        assert!(!opts.png);
    }

    #[test]
    fn test_engine_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "cvbuilder",
            "-i",
            "a.json",
            "-t",
            "t.html",
            "--pdf-engine",
            "chromium",
            "--png",
        ])
        .unwrap();
        let opts = cli.export_options(&config());
        assert_eq!(opts.pdf, Some(PdfEngineKind::Chromium));
        assert!(opts.png);
    }

    #[test]
    fn test_no_pdf() {
        let cli =
            Cli::try_parse_from(["cvbuilder", "-i", "a.json", "-t", "t.html", "--no-pdf"]).unwrap();
        assert_eq!(cli.export_options(&config()).pdf, None);
    }

    #[test]
    fn test_no_pdf_conflicts_with_engine() {
        assert!(Cli::try_parse_from([
            "cvbuilder",
            "-i",
            "a.json",
            "-t",
            "t.html",
            "--no-pdf",
            "--pdf-engine",
            "weasyprint",
        ])
        .is_err());
    }
}
