use super::EntityKind;
use crate::println_pad;
use crate::utils::open_workspace;
use colored::Colorize;
use cyt_core::{
    DefDatabase, EntityDef, PathSetStrategy, PawnKindPathSets, Picker, Session, ThingPathSets,
};
use miette::Result;

pub struct ContestedArgs {
    pub kind: EntityKind,
    pub search: String,
}

pub fn list_contested(config_path: &str, args: ContestedArgs) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let defs = workspace.load_defs()?;

    match args.kind {
        EntityKind::Things => print_entries(
            Picker::open(ThingPathSets, defs.things(), &workspace.session),
            &workspace.session,
            &args.search,
        ),
        EntityKind::Pawns => print_entries(
            Picker::open(PawnKindPathSets, defs.pawn_kinds(), &workspace.session),
            &workspace.session,
            &args.search,
        ),
    }

    Ok(())
}

fn print_entries<S>(mut picker: Picker<'_, S>, session: &Session, search: &str)
where
    S: PathSetStrategy,
    S::Def: EntityDef,
{
    let entries = picker.entries(search).to_vec();
    if entries.is_empty() {
        println_pad!("{}", "No contested textures found.".bright_yellow());
        return;
    }

    println_pad!(
        "{} {}",
        "⚔️  Contested textures:".bright_magenta().bold(),
        format!("({} of {})", entries.len(), picker.contested_count()).dimmed()
    );

    for entry in &entries {
        let representative = entry
            .default_set
            .representative
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default();
        println_pad!(
            "\n   {} {} {}",
            entry.label.bright_cyan().bold(),
            format!("[{}]", entry.def_name).dimmed(),
            representative.bright_white()
        );

        for tile in picker.tiles(entry, session) {
            let marker = if tile.chosen {
                "✓".bright_green()
            } else {
                "•".bright_cyan()
            };
            println_pad!(
                "      {} {} {}",
                marker,
                tile.display_name.bright_white(),
                format!("({})", tile.source).dimmed()
            );
        }
    }
}
