//! Facade crate for kmstyle, the regional map style generator.
//!
//! This crate re-exports the core domain types: the layer model, the patch
//! pipeline, and the style assembler.
//!
//! ```
//! use kmstyle::{Flavor, Language, Layer, LayerList, MemoryLayerSource, StyleConfig, build_style};
//!
//! let base = LayerList::new(vec![Layer::new("water", "fill")]).unwrap();
//! let source = MemoryLayerSource::uniform(base);
//! let ja = Language::new("ja").unwrap();
//! let style = build_style(&source, &StyleConfig::default(), &ja, Flavor::Light).unwrap();
//! assert_eq!(style.layers.ids().collect::<Vec<_>>(), ["hillshade", "water"]);
//! ```

#![forbid(unsafe_code)]

pub use kmstyle_core::{
    BuildError, Derivation, Flavor, INDEX_FILE_NAME, Language, Layer, LayerError, LayerList,
    LayerSource, LayerSourceError, MemoryLayerSource, PatchContext, PatchError, STYLE_VERSION,
    SourceDescriptor, SourceKind, StyleConfig, StyleDocument, StyleIndex, StyleName, TagError,
    apply_patches, build_style, filter, palette, patch,
};
