//! Where base layer lists come from.
//!
//! The base layers are generated by an external basemap library for a given
//! source id, flavor and language. [`LayerSource`] abstracts that step so the
//! pipeline can run against files on disk, fixtures, or anything else that
//! yields a [`LayerList`].

use std::collections::HashMap;

use thiserror::Error;

use crate::{Flavor, Language, LayerError, LayerList};

/// Errors returned by [`LayerSource::layers`].
#[derive(Debug, Error)]
pub enum LayerSourceError {
    /// No layers exist for the requested combination.
    #[error("no base layers for {language}-{flavor} at {location}")]
    Missing {
        /// Requested language.
        language: Language,
        /// Requested flavor.
        flavor: Flavor,
        /// Where the layers were expected.
        location: String,
    },
    /// Reading the layers failed.
    #[error("failed to read base layers from {location}")]
    Read {
        /// Where the layers were read from.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The layers could not be decoded.
    #[error("failed to parse base layers from {location}")]
    Parse {
        /// Where the layers were read from.
        location: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded records do not form a valid layer list.
    #[error("invalid base layers in {location}")]
    Layer {
        /// Where the layers were read from.
        location: String,
        /// Underlying layer error.
        #[source]
        source: LayerError,
    },
}

/// Produce the base layer list for one style.
pub trait LayerSource {
    /// Layers for `source_id`, drawn in `flavor`, labelled in `language`.
    fn layers(
        &self,
        source_id: &str,
        flavor: Flavor,
        language: &Language,
    ) -> Result<LayerList, LayerSourceError>;
}

/// In-memory [`LayerSource`] returning prepared lists.
///
/// Lists registered for a specific pair win over the fallback list.
///
/// # Examples
/// ```
/// use kmstyle_core::{Flavor, Language, Layer, LayerList, LayerSource, MemoryLayerSource};
///
/// let water = LayerList::new(vec![Layer::new("water", "fill")]).unwrap();
/// let source = MemoryLayerSource::uniform(water.clone());
/// let ja = Language::new("ja").unwrap();
/// assert_eq!(source.layers("osm", Flavor::Light, &ja).unwrap(), water);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLayerSource {
    fallback: Option<LayerList>,
    pairs: HashMap<(Language, Flavor), LayerList>,
}

impl MemoryLayerSource {
    /// Serve `layers` for every pair.
    #[must_use]
    pub fn uniform(layers: LayerList) -> Self {
        Self {
            fallback: Some(layers),
            pairs: HashMap::new(),
        }
    }

    /// Serve `layers` for one pair.
    #[must_use]
    pub fn with_pair(mut self, language: Language, flavor: Flavor, layers: LayerList) -> Self {
        self.pairs.insert((language, flavor), layers);
        self
    }
}

impl LayerSource for MemoryLayerSource {
    fn layers(
        &self,
        _source_id: &str,
        flavor: Flavor,
        language: &Language,
    ) -> Result<LayerList, LayerSourceError> {
        self.pairs
            .get(&(language.clone(), flavor))
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| LayerSourceError::Missing {
                language: language.clone(),
                flavor,
                location: "memory".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layer;
    use rstest::rstest;

    fn list(id: &str) -> LayerList {
        LayerList::new(vec![Layer::new(id, "fill")]).unwrap()
    }

    #[rstest]
    fn pair_specific_lists_win() {
        let ja = Language::new("ja").unwrap();
        let source =
            MemoryLayerSource::uniform(list("fallback")).with_pair(ja.clone(), Flavor::Dark, list("dark"));
        let dark = source.layers("osm", Flavor::Dark, &ja).unwrap();
        assert!(dark.contains("dark"));
        let light = source.layers("osm", Flavor::Light, &ja).unwrap();
        assert!(light.contains("fallback"));
    }

    #[rstest]
    fn empty_source_reports_missing_pair() {
        let en = Language::new("en").unwrap();
        let err = MemoryLayerSource::default()
            .layers("osm", Flavor::White, &en)
            .unwrap_err();
        assert_eq!(err.to_string(), "no base layers for en-white at memory");
    }
}
