//! Build command implementation for the kmstyle CLI.

use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use kmstyle_core::{Flavor, Language, LayerSource, StyleConfig, StyleIndex, TagError, build_style};
use kmstyle_fs::{dir_is_dir, ensure_dir, write_synced};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::index::write_index;
use crate::source::FileLayerSource;
use crate::{
    ARG_DEM_TILES_URL, ARG_FLAVORS, ARG_GLYPHS_URL, ARG_LANGUAGES, ARG_LAYERS_DIR,
    ARG_NAME_PREFIX, ARG_OUTPUT_DIR, ARG_SPRITE_BASE_URL, ARG_TILES_URL, CliError,
    DEFAULT_OUTPUT_DIR, ENV_LAYERS_DIR,
};

const DEFAULT_LANGUAGES: &str = "ja,en";

/// CLI arguments for the `build` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Patch the base layer lists exported for each language and \
                 flavor, then write one style document per pair plus a \
                 styles.json index. Options can come from CLI flags, \
                 configuration files, or KMSTYLE_* environment variables.",
    about = "Generate style documents for every language and flavor"
)]
#[ortho_config(prefix = "KMSTYLE")]
pub(crate) struct BuildArgs {
    /// Directory holding `<language>-<flavor>.json` base layer lists.
    #[arg(long = ARG_LAYERS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) layers_dir: Option<Utf8PathBuf>,
    /// Directory receiving the generated styles (default `styles`).
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Comma-separated label languages (default `ja,en`).
    #[arg(long = ARG_LANGUAGES, value_name = "csv")]
    #[serde(default)]
    pub(crate) languages: Option<String>,
    /// Comma-separated flavors (default: all five).
    #[arg(long = ARG_FLAVORS, value_name = "csv")]
    #[serde(default)]
    pub(crate) flavors: Option<String>,
    /// Prefix of style names (default `osm`; empty for none).
    #[arg(long = ARG_NAME_PREFIX, value_name = "text")]
    #[serde(default)]
    pub(crate) name_prefix: Option<String>,
    /// TileJSON URL of the vector source.
    #[arg(long = ARG_TILES_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) tiles_url: Option<String>,
    /// Tile URL template of the raster DEM source.
    #[arg(long = ARG_DEM_TILES_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) dem_tiles_url: Option<String>,
    /// Glyph URL template.
    #[arg(long = ARG_GLYPHS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) glyphs_url: Option<String>,
    /// Sprite base URL; the flavor is appended.
    #[arg(long = ARG_SPRITE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) sprite_base_url: Option<String>,
}

impl BuildArgs {
    pub(crate) fn into_config(self) -> Result<BuildConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BuildConfig::try_from(merged)
    }
}

/// Resolved `build` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BuildConfig {
    pub(crate) layers_dir: Utf8PathBuf,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) languages: Vec<Language>,
    pub(crate) flavors: Vec<Flavor>,
    pub(crate) style: StyleConfig,
}

impl BuildConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match dir_is_dir(&self.layers_dir) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::NotADirectory {
                field: ARG_LAYERS_DIR,
                path: self.layers_dir.clone(),
            }),
            Err(source) => Err(CliError::InspectPath {
                field: ARG_LAYERS_DIR,
                path: self.layers_dir.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<BuildArgs> for BuildConfig {
    type Error = CliError;

    fn try_from(args: BuildArgs) -> Result<Self, Self::Error> {
        let layers_dir = args.layers_dir.ok_or(CliError::MissingArgument {
            field: ARG_LAYERS_DIR,
            env: ENV_LAYERS_DIR,
        })?;
        let output_dir = args
            .output_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR));
        let languages = parse_list(
            args.languages.as_deref().unwrap_or(DEFAULT_LANGUAGES),
            ARG_LANGUAGES,
        )?;
        let flavors = match args.flavors.as_deref() {
            Some(raw) => parse_list(raw, ARG_FLAVORS)?,
            None => Flavor::ALL.to_vec(),
        };

        let mut style = StyleConfig::default();
        if let Some(prefix) = args.name_prefix {
            style.name_prefix = Some(prefix).filter(|p| !p.is_empty());
        }
        if let Some(url) = args.tiles_url {
            style.vector_url = url;
        }
        if let Some(url) = args.dem_tiles_url {
            style.dem_tiles_url = url;
        }
        if let Some(url) = args.glyphs_url {
            style.glyphs_url = url;
        }
        if let Some(url) = args.sprite_base_url {
            style.sprite_base_url = url;
        }

        Ok(Self {
            layers_dir,
            output_dir,
            languages,
            flavors,
            style,
        })
    }
}

/// Parse a comma-separated list, dropping blanks and repeats.
fn parse_list<T>(raw: &str, field: &'static str) -> Result<Vec<T>, CliError>
where
    T: FromStr<Err = TagError> + PartialEq,
{
    let mut values = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let value = item
            .parse::<T>()
            .map_err(|source| CliError::InvalidTag { field, source })?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    if values.is_empty() {
        return Err(CliError::EmptySelection { field });
    }
    Ok(values)
}

/// Files produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildOutcome {
    pub(crate) documents: Vec<Utf8PathBuf>,
    pub(crate) index: StyleIndex,
}

pub(crate) fn run_build(args: BuildArgs) -> Result<BuildOutcome, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let source = FileLayerSource::new(config.layers_dir.clone());
    run_build_with(&config, &source)
}

/// Build every (language, flavor) pair from `source`, then write the index.
///
/// Pairs are processed one at a time and each document is synced before the
/// next pair starts. The first failure aborts the run before the index is
/// written; documents already written stay in place.
pub(crate) fn run_build_with(
    config: &BuildConfig,
    source: &dyn LayerSource,
) -> Result<BuildOutcome, CliError> {
    ensure_dir(&config.output_dir).map_err(|source| CliError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let mut documents = Vec::new();
    let mut index = StyleIndex::default();
    for language in &config.languages {
        for &flavor in &config.flavors {
            let document = build_style(source, &config.style, language, flavor)?;
            let name = config.style.style_name(language, flavor);
            let payload = serde_json::to_vec(&document)
                .map_err(|err| CliError::serialise(name.as_str(), err))?;
            let path = write_document(&config.output_dir, &name.file_name(), &payload)?;
            info!("wrote {name} ({} layers) to {path}", document.layers.len());
            documents.push(path);
            index.push(name);
        }
    }

    write_index(&config.output_dir, &index)?;
    Ok(BuildOutcome { documents, index })
}

fn write_document(
    output_dir: &Utf8Path,
    file_name: &str,
    payload: &[u8],
) -> Result<Utf8PathBuf, CliError> {
    let path = output_dir.join(file_name);
    write_synced(&path, payload).map_err(|source| CliError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BuildConfig, CliError> {
    let merged = BuildArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BuildConfig::try_from(merged)
}
