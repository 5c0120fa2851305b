use crate::println_pad;
use crate::utils::open_workspace;
use colored::Colorize;
use miette::Result;

pub fn list_sources(config_path: &str, path: &str) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let session = &workspace.session;
    let sources = session.index().sources_for(path);

    if sources.is_empty() {
        println_pad!("{} {}", "No sources found for:".bright_yellow(), path);
        return Ok(());
    }

    let chosen = session.overrides().get(path);
    let status = if session.index().is_contested(path) {
        "contested".bright_red()
    } else {
        "single source".bright_green()
    };
    println_pad!("{} {} {}", "🖼️ Texture:".bright_blue().bold(), path.bright_cyan().bold(), format!("({})", status).dimmed());

    for (position, source) in sources.iter().enumerate() {
        let marker = if chosen == Some(source.id()) {
            "✓".bright_green()
        } else if chosen.is_none() && position == 0 {
            "•".bright_cyan()
        } else {
            " ".normal()
        };
        let official = if source.is_official() { " [official]" } else { "" };
        println_pad!(
            "   {} {} {}{}",
            marker,
            source.display_name().bright_white().bold(),
            format!("({})", source.id()).dimmed(),
            official.bright_magenta()
        );
    }

    if chosen.is_none() {
        println_pad!("\n{}", "No override recorded; the first source is used.".dimmed());
    }

    Ok(())
}
