//! Base layer lists read from files exported by the basemap generator.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use kmstyle_core::{Flavor, Language, Layer, LayerList, LayerSource, LayerSourceError};
use kmstyle_fs::{file_is_file, open_utf8_file};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Either a bare layer array or a style-shaped object with a `layers` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum BaseLayers {
    List(Vec<Value>),
    Style { layers: Vec<Value> },
}

impl BaseLayers {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::List(records) | Self::Style { layers: records } => records,
        }
    }
}

/// Reads `<language>-<flavor>.json` files from one directory.
#[derive(Debug, Clone)]
pub(crate) struct FileLayerSource {
    dir: Utf8PathBuf,
}

impl FileLayerSource {
    pub(crate) fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn path_for(&self, language: &Language, flavor: Flavor) -> Utf8PathBuf {
        self.dir.join(format!("{language}-{flavor}.json"))
    }

    fn read(path: &Utf8Path) -> Result<LayerList, LayerSourceError> {
        let location = || path.to_string();
        let file = open_utf8_file(path).map_err(|source| LayerSourceError::Read {
            location: location(),
            source,
        })?;
        let base: BaseLayers =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                LayerSourceError::Parse {
                    location: location(),
                    source,
                }
            })?;
        let layers = base
            .into_records()
            .into_iter()
            .map(Layer::try_from)
            .collect::<Result<Vec<_>, _>>()
            .and_then(LayerList::new)
            .map_err(|source| LayerSourceError::Layer {
                location: location(),
                source,
            })?;
        Ok(layers)
    }

    fn missing(&self, language: &Language, flavor: Flavor) -> LayerSourceError {
        LayerSourceError::Missing {
            language: language.clone(),
            flavor,
            location: self.path_for(language, flavor).to_string(),
        }
    }
}

impl LayerSource for FileLayerSource {
    fn layers(
        &self,
        source_id: &str,
        flavor: Flavor,
        language: &Language,
    ) -> Result<LayerList, LayerSourceError> {
        let path = self.path_for(language, flavor);
        match file_is_file(&path) {
            Ok(true) => {}
            Ok(false) => return Err(self.missing(language, flavor)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.missing(language, flavor));
            }
            Err(source) => {
                return Err(LayerSourceError::Read {
                    location: path.to_string(),
                    source,
                });
            }
        }
        debug!("loading `{source_id}` layers for {language}-{flavor} from {path}");
        Self::read(&path)
    }
}
