//! Command-line interface for generating kmstyle map styles.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::info;

mod build;
mod error;
mod index;
mod source;

use build::{BuildArgs, run_build};
pub use error::CliError;
use index::{IndexArgs, run_index};

pub(crate) const ARG_LAYERS_DIR: &str = "layers-dir";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_LANGUAGES: &str = "languages";
pub(crate) const ARG_FLAVORS: &str = "flavors";
pub(crate) const ARG_NAME_PREFIX: &str = "name-prefix";
pub(crate) const ARG_TILES_URL: &str = "tiles-url";
pub(crate) const ARG_DEM_TILES_URL: &str = "dem-tiles-url";
pub(crate) const ARG_GLYPHS_URL: &str = "glyphs-url";
pub(crate) const ARG_SPRITE_BASE_URL: &str = "sprite-base-url";
pub(crate) const ENV_LAYERS_DIR: &str = "KMSTYLE_CMDS_BUILD_LAYERS_DIR";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "styles";

/// Run the kmstyle CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Build(args) => {
            let outcome = run_build(args)?;
            info!("generated {} styles", outcome.documents.len());
        }
        Command::Index(args) => {
            let index = run_index(args)?;
            info!("index lists {} styles", index.len());
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "kmstyle",
    about = "Generate MapLibre styles for Japanese OpenStreetMap basemaps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Patch base layers and write one style per language and flavor.
    Build(BuildArgs),
    /// Rebuild `styles.json` from the documents in an output directory.
    Index(IndexArgs),
}

#[cfg(test)]
mod tests;
