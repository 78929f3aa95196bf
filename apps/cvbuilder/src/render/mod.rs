//! Renderer — binds a validated [`Resume`] into a Jinja-style template.
//!
//! All layout lives in the template. Top-level variables are `name`,
//! `summary`, `contact_info` and `sections`; optional fields that are absent
//! in the input are undefined in the template, so `{% if item.title %}` is
//! the way to guard them. Templates ending in `.html`, `.htm` or `.xml` are
//! auto-escaped.

use std::path::Path;

use minijinja::{path_loader, Environment};
use tracing::info;

use crate::errors::AppError;
use crate::loader::ensure_file;
use crate::models::Resume;

pub struct Renderer {
    env: Environment<'static>,
    template_name: String,
}

impl Renderer {
    /// Loads the template at `path`. Other files in the same directory are
    /// reachable through `{% include %}` and `{% extends %}`.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        ensure_file(path, "Template file")?;

        let template_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::NotAFile(path.to_path_buf()))?
            .to_string();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => ".".into(),
        };

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));

        // Compile eagerly so syntax errors surface before any output is staged.
        env.get_template(&template_name)?;
        info!("Template loaded: {}", path.display());

        Ok(Renderer { env, template_name })
    }

    /// Builds a renderer from an in-memory template. `name` picks the escaping
    /// mode the same way a file name would.
    #[cfg(test)]
    pub fn from_source(name: &str, source: &str) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.add_template_owned(name.to_string(), source.to_string())?;
        Ok(Renderer {
            env,
            template_name: name.to_string(),
        })
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn render(&self, resume: &Resume) -> Result<String, AppError> {
        let template = self.env.get_template(&self.template_name)?;
        Ok(template.render(resume)?)
    }
}
