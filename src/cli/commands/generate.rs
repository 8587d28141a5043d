//! Generate the project structure outline
//!
//! The main operation: resolve the effective ignore rules for the project
//! root, walk the tree, and write the outline into the docs directory.

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::TreegenConfig;
use crate::logging::RunLog;
use crate::rules::RuleSet;
use crate::tree::TreeRenderer;
use crate::workspace::Workspace;

/// Execute the generate command
pub async fn execute(path: Option<PathBuf>, output: &Output) -> Result<()> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        anyhow::bail!("Project root is not a directory: {}", root.display());
    }

    if let Some(config_path) = TreegenConfig::find_config_file(&root) {
        output.verbose(&format!("Using configuration: {}", config_path.display()));
    }
    let config = TreegenConfig::load_or_default(&root);
    let workspace = Workspace::new(&root, &config);

    workspace.ensure_layout()?;
    let log = RunLog::create(workspace.log_path())?;
    for created in workspace.scaffold_rule_files(false, &log)? {
        output.info(&format!("Created {}", created.display()));
    }

    let spinner = output.spinner("Generating folder structure...");
    let rules = RuleSet::resolve(&workspace, &config, &log)?;
    let renderer = TreeRenderer::new(&rules, &log);
    let result = renderer.render(workspace.root());
    spinner.finish_and_clear();

    for warning in &result.warnings {
        output.warning(&warning.message);
    }

    let Some(text) = result.text else {
        output.error("Could not read the project root; no outline was written.");
        anyhow::bail!("Failed to list project root: {}", workspace.root().display());
    };

    if let Err(e) = workspace.write_output(&text, &log) {
        log.error(&format!(
            "Error writing to file {}: {}",
            workspace.output_path().display(),
            e
        ));
        output.error(&format!("Error writing outline: {e:#}"));
        return Err(e);
    }

    output.success(&format!(
        "Folder structure generated at {}",
        workspace.output_path().display()
    ));

    if output.is_verbose() {
        output.blank_line();
        output.summary_stats("Directories:", result.stats.dirs_rendered);
        output.summary_stats("Files:", result.stats.files_rendered);
        output.summary_stats("Ignored entries:", result.stats.entries_ignored);
        if result.stats.entries_skipped > 0 {
            output.summary_stats("Skipped entries:", result.stats.entries_skipped);
        }
        output.summary_stats("Exclude patterns:", rules.len());
    }

    Ok(())
}
