//! Handlebars Template Renderer
//!
//! Templates are embedded into the binary (see [`builtin`]) and may be
//! overridden or extended from a local directory. Rendering runs in strict
//! mode, so a placeholder missing from the context is an error rather than
//! an empty string, and output is never HTML-escaped.

pub mod builtin;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;

use crate::domain::ports::{RenderError, TemplateRenderer};
use crate::domain::value_objects::{ContentHash, Context};
use crate::error::BundleResult;

/// Extension stripped from template file names
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Where a template's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    File(PathBuf),
    Inline,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("inline"),
        }
    }
}

/// Catalog entry for a registered template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    pub source: TemplateSource,
    /// Digest of the template text; changes whenever the template does
    pub hash: ContentHash,
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    catalog: BTreeMap<String, TemplateInfo>,
}

impl HandlebarsRenderer {
    /// Renderer with no templates registered
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            registry,
            catalog: BTreeMap::new(),
        }
    }

    /// Renderer preloaded with the built-in deploy templates
    pub fn with_builtins() -> Result<Self, RenderError> {
        let mut renderer = Self::new();
        for (name, text) in builtin::BUILTIN_TEMPLATES {
            renderer.register(name, text, TemplateSource::Builtin)?;
        }
        Ok(renderer)
    }

    /// Register `text` under `name`, replacing any earlier template
    pub fn register(
        &mut self,
        name: &str,
        text: &str,
        source: TemplateSource,
    ) -> Result<(), RenderError> {
        self.registry
            .register_template_string(name, text)
            .map_err(|e| RenderError::Syntax {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        self.catalog.insert(
            name.to_string(),
            TemplateInfo {
                name: name.to_string(),
                source,
                hash: ContentHash::from_content(text.as_bytes()),
            },
        );
        Ok(())
    }

    /// Register every file in `dir` (non-recursive)
    ///
    /// `nginx.conf.hbs` and `nginx.conf` both register as `nginx.conf`;
    /// hidden files are skipped. Returns the number of templates loaded.
    pub fn load_directory(&mut self, dir: &Path) -> BundleResult<usize> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut loaded = 0;
        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            let name = file_name
                .strip_suffix(&format!(".{}", TEMPLATE_EXTENSION))
                .unwrap_or(file_name)
                .to_string();
            let text = fs::read_to_string(&path)?;
            tracing::debug!(template = %name, path = %path.display(), "loaded template");
            self.register(&name, &text, TemplateSource::File(path.clone()))?;
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Catalog entry for `name`
    pub fn info(&self, name: &str) -> Option<&TemplateInfo> {
        self.catalog.get(name)
    }

    /// All registered templates, sorted by name
    pub fn templates(&self) -> impl Iterator<Item = &TemplateInfo> {
        self.catalog.values()
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template_name: &str, context: &Context) -> Result<String, RenderError> {
        if !self.catalog.contains_key(template_name) {
            return Err(RenderError::TemplateNotFound {
                name: template_name.to_string(),
            });
        }
        self.registry
            .render(template_name, context)
            .map_err(|e| RenderError::Render {
                name: template_name.to_string(),
                message: e.to_string(),
            })
    }

    fn has_template(&self, template_name: &str) -> bool {
        self.catalog.contains_key(template_name)
    }
}
