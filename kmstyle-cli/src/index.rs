//! Index command implementation for the kmstyle CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use kmstyle_core::{INDEX_FILE_NAME, StyleIndex};
use kmstyle_fs::{json_file_stems, write_synced};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_OUTPUT_DIR, CliError, DEFAULT_OUTPUT_DIR};

/// CLI arguments for the `index` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rebuild styles.json by listing the style documents already \
                 present in the output directory. Names are sorted; the index \
                 file itself is skipped.",
    about = "Rebuild the style index from an output directory"
)]
#[ortho_config(prefix = "KMSTYLE")]
pub(crate) struct IndexArgs {
    /// Directory holding generated style documents.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
}

impl IndexArgs {
    fn into_output_dir(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(merged
            .output_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)))
    }
}

pub(crate) fn run_index(args: IndexArgs) -> Result<StyleIndex, CliError> {
    let output_dir = args.into_output_dir()?;
    rebuild_index(&output_dir)
}

/// Enumerate `output_dir` and rewrite its index.
pub(crate) fn rebuild_index(output_dir: &Utf8Path) -> Result<StyleIndex, CliError> {
    let stems = json_file_stems(output_dir).map_err(|source| CliError::ListOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let index = StyleIndex::from_file_stems(stems);
    write_index(output_dir, &index)?;
    Ok(index)
}

/// Serialise `index` into `<output_dir>/styles.json`.
pub(crate) fn write_index(output_dir: &Utf8Path, index: &StyleIndex) -> Result<(), CliError> {
    let payload =
        serde_json::to_vec(index).map_err(|source| CliError::serialise(INDEX_FILE_NAME, source))?;
    let path = output_dir.join(INDEX_FILE_NAME);
    write_synced(&path, &payload).map_err(|source| CliError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    info!("indexed {} styles in {path}", index.len());
    Ok(())
}
