//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the per-directory config, looked up from the working directory upwards
pub const PROJECT_CONFIG_FILE: &str = ".modelgen.yaml";

/// modelgen configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Renderer used when `render` is called without a format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_renderer: Option<String>,

    /// Also register the extended element types (week, search, buttons, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_types: Option<bool>,

    /// Prefix for CSS classes in HTML output instead of the model id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_prefix: Option<String>,

    /// Author recorded by the interactive modeler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/modelgen/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Nearest .modelgen.yaml
        if let Some(project_path) = Self::project_config_path() {
            if let Some(project) = Self::read_file(&project_path) {
                config.merge(project);
            }
        }

        // 4. Environment variables
        config.merge_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "modelgen")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Find the nearest project config, starting at the working directory
    pub fn project_config_path() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|path| path.is_file())
    }

    fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable config: {}", e);
                None
            }
        }
    }

    /// Apply MODELGEN_* overrides from an environment lookup
    fn merge_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(renderer) = var("MODELGEN_RENDERER") {
            self.default_renderer = Some(renderer);
        }
        if let Some(extended) = var("MODELGEN_EXTENDED_TYPES") {
            self.extended_types = Some(matches!(
                extended.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }
        if let Some(author) = var("MODELGEN_AUTHOR") {
            self.author = Some(author);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_renderer.is_some() {
            self.default_renderer = other.default_renderer;
        }
        if other.extended_types.is_some() {
            self.extended_types = other.extended_types;
        }
        if other.css_prefix.is_some() {
            self.css_prefix = other.css_prefix;
        }
        if other.author.is_some() {
            self.author = other.author;
        }
    }

    /// Renderer to use when none is given
    pub fn default_renderer(&self) -> &str {
        self.default_renderer.as_deref().unwrap_or("html")
    }

    /// Whether extended element types are enabled
    pub fn extended_types(&self) -> bool {
        self.extended_types.unwrap_or(false)
    }

    /// Get the author name, falling back to the login name
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}
