use crate::println_pad;
use crate::utils::open_workspace;
use colored::Colorize;
use cyt_core::Interception;
use miette::{IntoDiagnostic, Result};

pub struct ResolveArgs {
    pub path: String,
    pub output: Option<String>,
}

pub fn resolve_path(config_path: &str, args: ResolveArgs) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let session = &workspace.session;

    // Without an override the host loads from the highest-precedence source.
    let host_lookup = |path: &str| {
        session
            .index()
            .default_source(path)
            .and_then(|source| source.fetch_asset(path).ok())
    };

    let resolved = match session.intercept(&args.path) {
        Interception::Substituted { source, asset } => {
            println_pad!(
                "{} {} {} {}",
                "🔀 Override:".bright_magenta().bold(),
                args.path.bright_cyan(),
                "->".dimmed(),
                source.to_string().bright_white().bold()
            );
            Some(asset)
        }
        Interception::Stale { source } => {
            println_pad!(
                "{} {} {}",
                "⚠️  Stale override:".bright_yellow().bold(),
                source.to_string().bright_white(),
                "no longer provides this texture; using default resolution".bright_yellow()
            );
            host_lookup(&args.path)
        }
        Interception::PassThrough => {
            let default = session
                .index()
                .default_source(&args.path)
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            println_pad!(
                "{} {} {}",
                "➡️  Default:".bright_blue().bold(),
                args.path.bright_cyan(),
                format!("(from {})", default).dimmed()
            );
            host_lookup(&args.path)
        }
    };

    let Some(bytes) = resolved else {
        println_pad!("{}", "Texture not found in any package.".bright_red());
        return Ok(());
    };

    println_pad!("   {} {}", "Size:".bright_white(), format!("{} bytes", bytes.len()).bright_cyan());
    if let Some(output) = args.output {
        std::fs::write(&output, &bytes).into_diagnostic()?;
        println_pad!("   {} {}", "Written to:".bright_white(), output.dimmed());
    }

    Ok(())
}
