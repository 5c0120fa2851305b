mod contested;
mod overrides;
mod pick;
mod resolve;
mod sources;

pub use contested::{list_contested, ContestedArgs};
pub use overrides::{list_overrides, reset_overrides};
pub use pick::{pick_source, PickArgs};
pub use resolve::{resolve_path, ResolveArgs};
pub use sources::list_sources;

/// Which kind of definition a command works on.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Items, buildings, plants and other things
    Things,
    /// Animals and other pawn kinds
    Pawns,
}
