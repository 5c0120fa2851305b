use crate::println_pad;
use crate::utils::open_workspace;
use colored::Colorize;
use miette::Result;

pub fn list_overrides(config_path: &str) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let overrides = workspace.session.overrides();

    if overrides.is_empty() {
        println_pad!("{}", "No overrides recorded.".bright_yellow());
        return Ok(());
    }

    println_pad!(
        "{} {}",
        "📌 Overrides:".bright_blue().bold(),
        format!("({})", overrides.len()).dimmed()
    );
    for (path, source) in overrides.entries() {
        println_pad!(
            "   {} {} {}",
            path.as_str().bright_white(),
            "->".dimmed(),
            source.as_str().bright_cyan()
        );
    }

    Ok(())
}

pub fn reset_overrides(config_path: &str) -> Result<()> {
    let mut workspace = open_workspace(config_path)?;
    let removed = workspace.session.overrides().len();
    workspace.session.overrides_mut().clear();
    workspace.save()?;

    println_pad!(
        "{} {}",
        "🧹 Removed overrides:".bright_green().bold(),
        removed.to_string().bright_cyan()
    );
    Ok(())
}
