//! Version command implementation

use anyhow::Result;

use crate::cli::Output;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    output.header("Treegen Version Information");
    output.key_value(
        "Version:",
        &format!("{} v{}", crate::PKG_NAME, crate::VERSION),
        true,
    );
    output.key_value("Description:", crate::PKG_DESCRIPTION, false);
    output.key_value("Rust edition:", "2024", false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        false,
    );
    output.blank_line();
    output.success("Run 'treegen --help' for usage information");

    Ok(())
}
