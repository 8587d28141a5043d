//! Configuration management for treegen
//!
//! Loads the optional `treegen.yml` from the project root. Every knob has a
//! default, so the tool works with no configuration at all; an unparsable
//! file degrades to the defaults rather than failing the run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for treegen
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TreegenConfig {
    /// Output layout
    pub output: OutputConfig,

    /// Ignore-rule sources
    pub rules: RulesConfig,
}

/// Where generated files land, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Docs directory name
    pub docs_dir: String,

    /// Tool directory name inside the docs directory
    pub tool_dir: String,

    /// Rendered outline file name inside the docs directory
    pub structure_file: String,
}

/// Ignore-rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Whether `.gitignore` contributes exclude patterns
    pub use_gitignore: bool,

    /// Patterns written into a freshly scaffolded exclude file
    pub default_ignore_patterns: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            tool_dir: "treegen".to_string(),
            structure_file: "project_structure.txt".to_string(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            default_ignore_patterns: vec![
                ".vs".to_string(),
                ".vscode".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
                "treegen".to_string(),
            ],
        }
    }
}

impl TreegenConfig {
    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: TreegenConfig = serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find a configuration file in the project root
    pub fn find_config_file(root: &Path) -> Option<PathBuf> {
        for name in ["treegen.yml", ".treegen.yml"] {
            let candidate = root.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }

    /// Load configuration from the project root or fall back to defaults
    pub fn load_or_default(root: &Path) -> Self {
        if let Some(path) = Self::find_config_file(root) {
            match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring config file: {e:#}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output.docs_dir.trim().is_empty() {
            anyhow::bail!("output.docs_dir cannot be empty");
        }
        if self.output.tool_dir.trim().is_empty() {
            anyhow::bail!("output.tool_dir cannot be empty");
        }
        if self.output.structure_file.trim().is_empty() {
            anyhow::bail!("output.structure_file cannot be empty");
        }
        Ok(())
    }
}
