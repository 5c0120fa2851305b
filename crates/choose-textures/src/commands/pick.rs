use super::EntityKind;
use crate::errors::CliError;
use crate::println_pad;
use crate::utils::open_workspace;
use colored::Colorize;
use cyt_core::{
    DefDatabase, EntityDef, PathSetStrategy, PawnKindPathSets, Picker, Session, SourceId,
    ThingPathSets,
};
use miette::Result;

pub struct PickArgs {
    pub kind: EntityKind,
    pub def_name: String,
    pub source_id: String,
}

pub fn pick_source(config_path: &str, args: PickArgs) -> Result<()> {
    let mut workspace = open_workspace(config_path)?;
    let defs = workspace.load_defs()?;
    let source = SourceId::new(args.source_id.clone());

    let (written, reinit) = match args.kind {
        EntityKind::Things => {
            let picker = Picker::open(ThingPathSets, defs.things(), &workspace.session);
            apply(picker, &args.def_name, &source, &mut workspace.session)?
        }
        EntityKind::Pawns => {
            let picker = Picker::open(PawnKindPathSets, defs.pawn_kinds(), &workspace.session);
            apply(picker, &args.def_name, &source, &mut workspace.session)?
        }
    };

    workspace.save()?;

    println_pad!(
        "{} {} {} {}",
        "✅ Using".bright_green().bold(),
        args.source_id.bright_cyan().bold(),
        "for".bright_green(),
        args.def_name.bright_white().bold()
    );
    println_pad!(
        "   {} {}",
        "Overrides written:".bright_white(),
        written.to_string().bright_cyan()
    );
    println_pad!(
        "   {} {}",
        "Graphics to re-initialize:".bright_white(),
        reinit.join(", ")
    );
    println_pad!(
        "   {} {}",
        "Saved to:".bright_white(),
        workspace.settings.path().as_str().dimmed()
    );

    Ok(())
}

fn apply<S>(
    mut picker: Picker<'_, S>,
    def_name: &str,
    source: &SourceId,
    session: &mut Session,
) -> Result<(usize, Vec<String>)>
where
    S: PathSetStrategy,
    S::Def: EntityDef,
{
    let entry = picker
        .find(def_name)
        .cloned()
        .ok_or_else(|| CliError::entity_not_found(def_name.to_string()))?;

    let offered = picker
        .tiles(&entry, session)
        .iter()
        .any(|tile| &tile.source == source);
    if !offered {
        return Err(CliError::source_not_found(source.to_string()).into());
    }

    let written = picker
        .select(&entry, source, session)
        .map_err(CliError::from)?;
    Ok((written, picker.close()))
}
