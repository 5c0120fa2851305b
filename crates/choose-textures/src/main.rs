use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    list_contested, list_overrides, list_sources, pick_source, reset_overrides, resolve_path,
    ContestedArgs, EntityKind, PickArgs, ResolveArgs,
};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The path to the configuration file
    #[arg(short, long, global = true, default_value = cyt_core::config::CONFIG_FILE_NAME)]
    config: String,

    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the packages that provide a texture path
    Sources {
        /// The texture path, without extension
        path: String,
    },
    /// List definitions whose texture is provided by more than one package
    Contested {
        /// Which definitions to list
        #[arg(value_enum)]
        kind: EntityKind,

        /// Only show definitions whose label contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Use a package's textures for every graphic of a definition
    Pick {
        #[arg(value_enum)]
        kind: EntityKind,

        /// The definition name
        def_name: String,

        /// The id of the package to use
        source_id: String,
    },
    /// Resolve a texture path the way the game would
    Resolve {
        /// The texture path, without extension
        path: String,

        /// Write the resolved texture to this file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show recorded overrides
    Overrides,
    /// Remove every recorded override
    Reset,
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(args.verbose);

    let config_path = args.config;

    match args.command {
        Commands::Sources { path } => list_sources(&config_path, &path),
        Commands::Contested { kind, search } => list_contested(
            &config_path,
            ContestedArgs { kind, search },
        ),
        Commands::Pick {
            kind,
            def_name,
            source_id,
        } => pick_source(
            &config_path,
            PickArgs {
                kind,
                def_name,
                source_id,
            },
        ),
        Commands::Resolve { path, output } => {
            resolve_path(&config_path, ResolveArgs { path, output })
        }
        Commands::Overrides => list_overrides(&config_path),
        Commands::Reset => reset_overrides(&config_path),
    }
}
