//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
const WORKSPACE_CONFIG_FILE: &str = ".depclip.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: Resolver,
    #[serde(default)]
    pub ignore: Ignore,
    #[serde(default)]
    pub export: Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolver {
    #[serde(default = "Resolver::default_alias")]
    pub alias: String,
}

impl Resolver {
    fn default_alias() -> String {
        "@".into()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            alias: Self::default_alias(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ignore {
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub globs: Vec<String>,
}

impl Default for Ignore {
    fn default() -> Self {
        Self {
            paths: vec![
                ".git/".into(),
                "node_modules/".into(),
                "dist/".into(),
                "target/".into(),
                "__pycache__/".into(),
            ],
            globs: vec!["*.lock".into(), "*.min.js".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Export {
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    copy: Option<bool>,
}

impl Export {
    fn default_template() -> &'static str {
        "tagged"
    }

    pub fn template(&self) -> String {
        self.template
            .clone()
            .unwrap_or_else(|| Self::default_template().to_owned())
    }

    pub fn copy(&self) -> bool {
        self.copy.unwrap_or(true)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    alias: Option<String>,
    template: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            alias: env::var("DEPCLIP_ALIAS").ok(),
            template: env::var("DEPCLIP_TEMPLATE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(alias: &str, template: &str) -> Self {
        Self {
            alias: Some(alias.to_owned()),
            template: Some(template.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user config, the workspace file at
    /// the project root, and env overrides.
    pub fn load(project_root: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = Some(project_root.join(WORKSPACE_CONFIG_FILE));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            resolver: merge_resolver(self.resolver, other.resolver),
            ignore: merge_ignore(self.ignore, other.ignore),
            export: merge_export(self.export, other.export),
        }
    }
}

fn merge_resolver(base: Resolver, overlay: Resolver) -> Resolver {
    Resolver {
        alias: if overlay.alias != Resolver::default_alias() {
            overlay.alias
        } else {
            base.alias
        },
    }
}

fn merge_ignore(base: Ignore, overlay: Ignore) -> Ignore {
    let mut paths: BTreeSet<String> = base.paths.into_iter().collect();
    paths.extend(overlay.paths);

    let mut globs: BTreeSet<String> = base.globs.into_iter().collect();
    globs.extend(overlay.globs);

    Ignore {
        paths: paths.into_iter().collect(),
        globs: globs.into_iter().collect(),
    }
}

fn merge_export(mut base: Export, overlay: Export) -> Export {
    if let Some(value) = overlay.template {
        base.template = Some(value);
    }
    if let Some(value) = overlay.copy {
        base.copy = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("depclip/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(alias) = env.alias {
        config.resolver.alias = alias;
    }
    if let Some(template) = env.template {
        config.export.template = Some(template);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.resolver.alias, "@");
        assert_eq!(config.export.template(), "tagged");
        assert!(config.export.copy());
        assert!(config.ignore.paths.contains(&"node_modules/".into()));
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[resolver]
alias = "~"
[ignore]
paths = ["generated/"]
"#,
        )?;

        let workspace = temp.path().join(".depclip.toml");
        fs::write(
            &workspace,
            r#"
[export]
template = "markdown"
copy = false
[ignore]
globs = ["*.cache"]
"#,
        )?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;

        assert_eq!(config.resolver.alias, "~");
        assert_eq!(config.export.template(), "markdown");
        assert!(!config.export.copy());
        assert!(config.ignore.paths.contains(&"generated/".into()));
        assert!(config.ignore.globs.contains(&"*.cache".into()));
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("#", "markdown");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.resolver.alias, "#");
        assert_eq!(config.export.template(), "markdown");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        assert!(Config::from_file(&file).is_err());
        Ok(())
    }
}
