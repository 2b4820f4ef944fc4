//! Bundle rendering.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use minijinja::Environment;
use serde::Serialize;

use crate::domain::model::SourceFile;

/// Built-in bundle layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum BundleFormat {
    /// `<file>` tagged headers, one block per file.
    Tagged,
    /// Markdown with fenced code blocks.
    Markdown,
}

impl BundleFormat {
    fn template_name(&self) -> &'static str {
        match self {
            BundleFormat::Tagged => "tagged",
            BundleFormat::Markdown => "markdown",
        }
    }
}

impl FromStr for BundleFormat {
    type Err = BundleFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tagged" | "tag" | "plain" => Ok(BundleFormat::Tagged),
            "markdown" | "md" => Ok(BundleFormat::Markdown),
            other => Err(BundleFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`BundleFormat`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BundleFormatParseError {
    #[error("unknown bundle format '{0}'")]
    UnknownFormat(String),
}

/// Renders collected files into a single text blob with structural headers.
///
/// Rendering embeds nothing run-specific, so identical inputs always produce
/// identical bundles.
pub struct BundleRenderer {
    env: Environment<'static>,
}

impl BundleRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("tagged", TAGGED_TEMPLATE)
            .map_err(|err| anyhow!("failed to register tagged template: {err}"))?;
        env.add_template("markdown", MARKDOWN_TEMPLATE)
            .map_err(|err| anyhow!("failed to register markdown template: {err}"))?;
        Ok(Self { env })
    }

    /// Render files in the walker's discovery order. Header paths are
    /// project-root-relative, absolute when a file lies outside the root.
    pub fn render(&self, files: &[SourceFile], root: &Path, format: BundleFormat) -> Result<String> {
        let context = BundleContext {
            files: files
                .iter()
                .map(|file| BundleEntry {
                    path: display_path(root, &file.path),
                    contents: &file.contents,
                })
                .collect(),
        };

        let template = self
            .env
            .get_template(format.template_name())
            .map_err(|err| anyhow!("missing bundle template: {err}"))?;
        template
            .render(context)
            .map_err(|err| anyhow!("failed to render bundle: {err}"))
    }
}

/// Path label used in bundle headers and file listings.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[derive(Serialize)]
struct BundleContext<'a> {
    files: Vec<BundleEntry<'a>>,
}

#[derive(Serialize)]
struct BundleEntry<'a> {
    path: String,
    contents: &'a str,
}

const TAGGED_TEMPLATE: &str = r#"{% for file in files %}
<file>{{ file.path }}</file>
{{ file.contents }}
{% endfor %}"#;

const MARKDOWN_TEMPLATE: &str = r#"{% for file in files %}
## {{ file.path }}

```
{{ file.contents }}
```

{% endfor %}"#;
