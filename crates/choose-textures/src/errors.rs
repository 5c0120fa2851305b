use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Configuration file not found")]
    #[diagnostic(
        code(config::not_found),
        help("Create a choose-textures.toml listing your package directories, or pass --config")
    )]
    ConfigNotFound { search_path: PathBuf },

    #[error("No packages configured")]
    #[diagnostic(
        code(config::no_packages),
        help("Add package directories in load order: packages = [\"Data/Core\", \"Mods/MyMod\"]")
    )]
    NoPackages,

    #[error("No definition catalog configured")]
    #[diagnostic(
        code(config::no_defs),
        help("Point `defs` at a JSON file with `things`, `pawnKinds` and `bodyTypes`")
    )]
    NoDefinitions,

    #[error("Invalid package directory: {path}")]
    #[diagnostic(
        code(package::invalid),
        help("Each package must be a directory, optionally with a package.json and a Textures/ folder")
    )]
    InvalidPackage {
        path: PathBuf,
        #[source]
        source: cyt_core::Error,
    },

    #[error("Definition not contested: {def_name}")]
    #[diagnostic(
        code(entity::not_found),
        help("Run `choose-textures contested <kind>` to list definitions with more than one source")
    )]
    EntityNotFound { def_name: String },

    #[error("Package does not provide this texture: {source_id}")]
    #[diagnostic(
        code(source::not_found),
        help("Pick one of the packages listed for this definition")
    )]
    SourceNotFound { source_id: String },

    #[error("{source}")]
    #[diagnostic(code(core::error))]
    Core {
        #[from]
        source: cyt_core::Error,
    },
}

impl CliError {
    pub fn config_not_found(search_path: PathBuf) -> Self {
        Self::ConfigNotFound { search_path }
    }

    pub fn invalid_package(path: PathBuf, source: cyt_core::Error) -> Self {
        Self::InvalidPackage { path, source }
    }

    pub fn entity_not_found(def_name: String) -> Self {
        Self::EntityNotFound { def_name }
    }

    pub fn source_not_found(source_id: String) -> Self {
        Self::SourceNotFound { source_id }
    }
}
