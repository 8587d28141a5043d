//! Initialize treegen in a project
//!
//! Sets up the docs layout and the default rule files without rendering
//! anything, so the rules can be tuned before the first generate run.

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::TreegenConfig;
use crate::logging::RunLog;
use crate::workspace::Workspace;

/// Execute the init command
pub async fn execute(path: Option<PathBuf>, force: bool, output: &Output) -> Result<()> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        anyhow::bail!("Project root is not a directory: {}", root.display());
    }

    let config = TreegenConfig::load_or_default(&root);
    let workspace = Workspace::new(&root, &config);

    output.header("Initializing treegen");
    workspace.ensure_layout()?;
    let log = RunLog::create(workspace.log_path())?;
    let created = workspace.scaffold_rule_files(force, &log)?;

    if created.is_empty() {
        output.info("Rule files already present; use --force to rewrite them");
    } else {
        for path in &created {
            output.list_item(&format!("created {}", path.display()));
        }
    }
    output.success("Run 'treegen generate' to render the project outline");

    Ok(())
}
