//! Core domain types for building regional map styles.
//!
//! Base layer lists come from a [`LayerSource`]. The patch stages in
//! [`patch`] specialise them for Japanese cartography (JR rail lines,
//! motorways, stations, hillshading) and [`build_style`] wraps the result in
//! a [`StyleDocument`].
#![forbid(unsafe_code)]

pub mod filter;
mod flavor;
mod index;
mod layer;
pub mod palette;
pub mod patch;
mod source;
mod style;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use flavor::{Flavor, Language, TagError};
pub use index::{INDEX_FILE_NAME, StyleIndex};
pub use layer::{Derivation, Layer, LayerError, LayerList};
pub use patch::{PatchContext, PatchError, apply_patches};
pub use source::{LayerSource, LayerSourceError, MemoryLayerSource};
pub use style::{
    BuildError, STYLE_VERSION, SourceDescriptor, SourceKind, StyleConfig, StyleDocument,
    StyleName, build_style,
};
