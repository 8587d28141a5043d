//! Ignore-rule resolution
//!
//! Merges the version-control ignore file and the tool exclude file into one
//! gitignore-dialect matcher, dropping any pattern that the tool include file
//! covers. The merged matcher is evaluated against bare entry names at each
//! traversal level, so separator-free patterns apply at any depth while
//! patterns containing `/` only ever match their own level.

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;

use crate::config::TreegenConfig;
use crate::logging::RunLog;
use crate::workspace::Workspace;

/// Override patterns loaded from the tool include file
pub struct IncludeSet {
    matcher: Gitignore,
    len: usize,
}

impl IncludeSet {
    /// Load include patterns; a missing file yields an empty set
    pub fn load(root: &Path, path: &Path, log: &RunLog) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut len = 0;
        if let Some(patterns) = read_patterns(path, log) {
            for pattern in &patterns {
                match builder.add_line(None, pattern) {
                    Ok(_) => len += 1,
                    Err(e) => log.error(&format!(
                        "Invalid pattern '{}' in {}: {}",
                        pattern,
                        path.display(),
                        e
                    )),
                }
            }
        }
        let matcher = builder.build().context("Failed to build include matcher")?;
        Ok(Self { matcher, len })
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Test a raw exclude pattern against the include globs.
    ///
    /// The pattern string is evaluated as if it were a literal path, so an
    /// include line of `*.log` swallows an exclude line of `debug.log` but
    /// not one of `*.log~`. Exclusion overrides are decided once here, at
    /// load time, never re-derived per path while rendering.
    pub fn covers(&self, pattern: &str) -> bool {
        self.matcher.matched(Path::new(pattern), false).is_ignore()
    }
}

/// The effective exclude set applied during rendering
pub struct RuleSet {
    matcher: Gitignore,
    len: usize,
}

impl RuleSet {
    /// Resolve the effective exclude rules for a project root
    pub fn resolve(workspace: &Workspace, config: &TreegenConfig, log: &RunLog) -> Result<RuleSet> {
        let include = IncludeSet::load(workspace.root(), &workspace.include_path(), log)?;
        if !include.is_empty() {
            tracing::debug!("Include overrides active for {}", workspace.root().display());
        }

        let mut builder = GitignoreBuilder::new(workspace.root());
        let mut len = 0;
        if config.rules.use_gitignore {
            len += add_filtered(&mut builder, &workspace.gitignore_path(), &include, log);
        }
        len += add_filtered(&mut builder, &workspace.exclude_path(), &include, log);

        let matcher = builder.build().context("Failed to build ignore matcher")?;
        Ok(RuleSet { matcher, len })
    }

    /// Number of effective exclude patterns
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a bare entry name is excluded at the current level
    pub fn is_ignored(&self, name: &str, is_dir: bool) -> bool {
        self.matcher.matched(Path::new(name), is_dir).is_ignore()
    }
}

/// Add one rule file's patterns, skipping any the include set covers
fn add_filtered(
    builder: &mut GitignoreBuilder,
    path: &Path,
    include: &IncludeSet,
    log: &RunLog,
) -> usize {
    let Some(patterns) = read_patterns(path, log) else {
        return 0;
    };
    let mut added = 0;
    for pattern in &patterns {
        if include.covers(pattern) {
            tracing::debug!("Pattern '{}' overridden by include file", pattern);
            continue;
        }
        match builder.add_line(None, pattern) {
            Ok(_) => added += 1,
            Err(e) => log.error(&format!(
                "Invalid pattern '{}' in {}: {}",
                pattern,
                path.display(),
                e
            )),
        }
    }
    added
}

/// Read the surviving pattern lines of a rule file.
///
/// Lines are trimmed (which also strips trailing carriage returns); blank
/// lines and `#` comments are dropped. Returns `None` when the file is
/// missing or unreadable, logging the former at INFO and the latter at ERROR.
fn read_patterns(path: &Path, log: &RunLog) -> Option<Vec<String>> {
    if !path.exists() {
        log.info(&format!("Rule file does not exist: {}", path.display()));
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log.error(&format!(
                "Failed to read rule file {}: {}",
                path.display(),
                e
            ));
            return None;
        }
    };
    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    Some(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(temp: &TempDir) -> (Workspace, TreegenConfig, RunLog) {
        let config = TreegenConfig::default();
        let workspace = Workspace::new(temp.path(), &config);
        workspace.ensure_layout().unwrap();
        let log = RunLog::create(workspace.log_path()).unwrap();
        (workspace, config, log)
    }

    #[test]
    fn no_rule_files_means_empty_exclude_set() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(rules.is_empty());
        assert!(!rules.is_ignored("node_modules", true));
        assert!(!rules.is_ignored("anything.txt", false));

        // All three candidate files were reported as absent, informationally.
        let logged = fs::read_to_string(workspace.log_path()).unwrap();
        assert_eq!(logged.matches("Rule file does not exist").count(), 3);
        assert!(!logged.contains("[ERROR]"));
    }

    #[test]
    fn gitignore_patterns_exclude_by_basename() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(
            workspace.gitignore_path(),
            "# build output\n\nnode_modules\n*.log\n",
        )
        .unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("debug.log", false));
        assert!(!rules.is_ignored("src", true));
        assert!(!rules.is_ignored("build output", true));
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "node_modules\r\ntarget\r\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("target", true));
    }

    #[test]
    fn tool_exclude_file_merges_with_gitignore() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "node_modules\n").unwrap();
        fs::write(workspace.exclude_path(), "build\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("build", true));
    }

    #[test]
    fn include_file_overrides_exclusion() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "node_modules\nbuild\n").unwrap();
        fs::write(workspace.include_path(), "build\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(rules.is_ignored("node_modules", true));
        assert!(!rules.is_ignored("build", true));
    }

    #[test]
    fn include_globs_cover_literal_patterns() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.exclude_path(), "debug.log\ntrace.out\n").unwrap();
        fs::write(workspace.include_path(), "*.log\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(!rules.is_ignored("debug.log", false));
        assert!(rules.is_ignored("trace.out", false));
    }

    #[test]
    fn separator_patterns_never_match_bare_names() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "src/generated\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(!rules.is_ignored("generated", true));
        assert!(!rules.is_ignored("src", true));
    }

    #[test]
    fn directory_only_patterns_spare_files() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "build/\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(rules.is_ignored("build", true));
        assert!(!rules.is_ignored("build", false));
    }

    #[test]
    fn gitignore_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let (workspace, mut config, log) = setup(&temp);
        config.rules.use_gitignore = false;
        fs::write(workspace.gitignore_path(), "node_modules\n").unwrap();
        fs::write(workspace.exclude_path(), "build\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert!(!rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("build", true));
    }

    #[test]
    fn empty_include_set_keeps_every_pattern() {
        let temp = TempDir::new().unwrap();
        let (workspace, config, log) = setup(&temp);
        fs::write(workspace.gitignore_path(), "node_modules\nbuild\n").unwrap();
        fs::write(workspace.include_path(), "# only comments in here\n\n").unwrap();

        let rules = RuleSet::resolve(&workspace, &config, &log).unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("build", true));
    }
}
