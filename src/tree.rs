//! Deterministic tree rendering
//!
//! Walks a directory depth-first and serializes it as an indented outline:
//! `[name]` lines for directories, `- name` lines for files, two spaces of
//! indent per nesting level. Directories come before files at every level and
//! both groups are byte-order sorted, so identical trees always render to
//! identical bytes no matter how the filesystem lists them.

use std::fs;
use std::path::Path;

use crate::logging::RunLog;
use crate::rules::RuleSet;

/// Counters accumulated over one render pass
#[derive(Debug, Default, Clone)]
pub struct RenderStats {
    pub dirs_rendered: usize,
    pub files_rendered: usize,
    pub entries_ignored: usize,
    pub entries_skipped: usize,
}

/// A non-fatal problem surfaced to the caller
#[derive(Debug)]
pub struct Warning {
    pub message: String,
}

/// Outcome of one render pass
#[derive(Debug)]
pub struct RenderResult {
    /// Rendered outline; `None` only when the root itself could not be listed
    pub text: Option<String>,
    pub stats: RenderStats,
    pub warnings: Vec<Warning>,
}

pub struct TreeRenderer<'a> {
    rules: &'a RuleSet,
    log: &'a RunLog,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(rules: &'a RuleSet, log: &'a RunLog) -> Self {
        Self { rules, log }
    }

    /// Render the outline for `root`
    pub fn render(&self, root: &Path) -> RenderResult {
        let mut stats = RenderStats::default();
        let mut warnings = Vec::new();
        let text = self.render_level(root, 0, &mut stats, &mut warnings);
        RenderResult {
            text,
            stats,
            warnings,
        }
    }

    fn render_level(
        &self,
        dir: &Path,
        depth: usize,
        stats: &mut RenderStats,
        warnings: &mut Vec<Warning>,
    ) -> Option<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                let message = format!("Error reading directory {}: {}", dir.display(), e);
                self.log.error(&message);
                warnings.push(Warning { message });
                return None;
            }
        };

        let mut directories = Vec::new();
        let mut files = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let message = format!("Error reading entry in {}: {}", dir.display(), e);
                    self.log.error(&message);
                    warnings.push(Warning { message });
                    stats.entries_skipped += 1;
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();

            // Stat follows symlinks; broken links land in the error arm.
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) => {
                    let message =
                        format!("Error getting stats for {}: {}", entry.path().display(), e);
                    self.log.error(&message);
                    warnings.push(Warning { message });
                    stats.entries_skipped += 1;
                    continue;
                }
            };

            if self.rules.is_ignored(&name, metadata.is_dir()) {
                self.log.info(&format!("Ignoring: {name}"));
                stats.entries_ignored += 1;
                continue;
            }

            if metadata.is_dir() {
                directories.push(name);
            } else if metadata.is_file() {
                files.push(name);
            }
            // Sockets, devices and other special entries are dropped.
        }

        directories.sort();
        files.sort();

        let indent = "  ".repeat(depth);
        let mut rendered = String::new();

        for name in &directories {
            rendered.push_str(&format!("{indent}[{name}]\n"));
            stats.dirs_rendered += 1;
            if let Some(subtree) = self.render_level(&dir.join(name), depth + 1, stats, warnings) {
                rendered.push_str(&subtree);
            }
        }

        for name in &files {
            rendered.push_str(&format!("{indent}- {name}\n"));
            stats.files_rendered += 1;
        }

        Some(rendered)
    }
}
