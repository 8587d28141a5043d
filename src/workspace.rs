//! Project workspace layout
//!
//! Resolves where treegen's files live under a project root, scaffolds the
//! default rule files on first use, and writes the rendered outline with a
//! replace-by-rename so a failed write never leaves a half-written file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TreegenConfig;
use crate::logging::RunLog;

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const EXCLUDE_FILE: &str = ".treegen_ignore";
pub const INCLUDE_FILE: &str = ".treegen_include";
pub const LOG_FILE: &str = "treegen_logs.txt";

/// On-disk layout of treegen's files for one project root
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    tool_dir: PathBuf,
    output_path: PathBuf,
    default_ignore_patterns: Vec<String>,
}

impl Workspace {
    pub fn new<P: AsRef<Path>>(root: P, config: &TreegenConfig) -> Self {
        let root = root.as_ref().to_path_buf();
        let docs_dir = root.join(&config.output.docs_dir);
        Self {
            tool_dir: docs_dir.join(&config.output.tool_dir),
            output_path: docs_dir.join(&config.output.structure_file),
            default_ignore_patterns: config.rules.default_ignore_patterns.clone(),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.root.join(GITIGNORE_FILE)
    }

    pub fn exclude_path(&self) -> PathBuf {
        self.tool_dir.join(EXCLUDE_FILE)
    }

    pub fn include_path(&self) -> PathBuf {
        self.tool_dir.join(INCLUDE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.tool_dir.join(LOG_FILE)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Create the docs and tool directories if they are not there yet
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.tool_dir).with_context(|| {
            format!(
                "Failed to create tool directory: {}",
                self.tool_dir.display()
            )
        })?;
        Ok(())
    }

    /// Write default rule files, returning the paths actually created.
    ///
    /// Existing files are left untouched unless `force` is set.
    pub fn scaffold_rule_files(&self, force: bool, log: &RunLog) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();

        let exclude_path = self.exclude_path();
        if force || !exclude_path.exists() {
            let mut content = self.default_ignore_patterns.join("\n");
            content.push('\n');
            fs::write(&exclude_path, content)
                .with_context(|| format!("Failed to create {}", exclude_path.display()))?;
            log.info(&format!(
                "Created {}. Extend it with more ignore patterns.",
                exclude_path.display()
            ));
            created.push(exclude_path);
        }

        let include_path = self.include_path();
        if force || !include_path.exists() {
            fs::write(&include_path, "")
                .with_context(|| format!("Failed to create {}", include_path.display()))?;
            log.info(&format!(
                "Created {}. Add patterns to override exclusions.",
                include_path.display()
            ));
            created.push(include_path);
        }

        Ok(created)
    }

    /// Write the rendered outline, replacing any previous file atomically
    pub fn write_output(&self, content: &str, log: &RunLog) -> Result<()> {
        let tmp = self.output_path.with_extension("txt.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.output_path) {
            let _ = fs::remove_file(&tmp);
            return Err(e)
                .with_context(|| format!("Failed to replace {}", self.output_path.display()));
        }
        log.info(&format!(
            "Folder structure written to: {}",
            self.output_path.display()
        ));
        Ok(())
    }
}
