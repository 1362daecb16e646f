//! Style layers and the ordered lists that hold them.
//!
//! A [`Layer`] is an opaque JSON object with a mandatory string `id`. The
//! pipeline only reads and rewrites a handful of well-known keys (`filter`,
//! `paint`, `source`, `source-layer`); everything else round-trips untouched.
//! A [`LayerList`] keeps layers in paint order and guarantees that ids stay
//! unique.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const KEY_ID: &str = "id";
const KEY_TYPE: &str = "type";
const KEY_FILTER: &str = "filter";
const KEY_PAINT: &str = "paint";
const KEY_LAYOUT: &str = "layout";
const KEY_SOURCE: &str = "source";
const KEY_SOURCE_LAYER: &str = "source-layer";

/// Errors raised while reading layer records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// The record was not a JSON object.
    #[error("layer record must be a JSON object")]
    NotAnObject,
    /// The record had no string `id`.
    #[error("layer record is missing a string `id`")]
    MissingId,
    /// Two layers in one list shared an id.
    #[error("duplicate layer id `{id}`")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
}

/// A single rendering rule in a style document.
///
/// # Examples
///
/// ```
/// use kmstyle_core::Layer;
/// use serde_json::json;
///
/// let layer = Layer::new("water", "fill").with_source("osm", "water");
/// assert_eq!(layer.id(), "water");
/// assert_eq!(layer.source_layer(), Some("water"));
/// assert_eq!(layer.get("type"), Some(&json!("fill")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Layer {
    id: String,
    fields: Map<String, Value>,
}

impl Layer {
    /// Create a layer with the given id and `type`.
    pub fn new(id: impl Into<String>, kind: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(KEY_TYPE.to_owned(), Value::from(kind));
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Set `source` and `source-layer`.
    #[must_use]
    pub fn with_source(mut self, source: &str, source_layer: &str) -> Self {
        self.insert(KEY_SOURCE, Value::from(source));
        self.insert(KEY_SOURCE_LAYER, Value::from(source_layer));
        self
    }

    /// Set an arbitrary top-level key.
    #[must_use]
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the `filter` expression.
    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.set_filter(filter);
        self
    }

    /// Set one `paint` property.
    #[must_use]
    pub fn with_paint(mut self, property: &str, value: Value) -> Self {
        self.set_paint(property, value);
        self
    }

    /// Set one `layout` property.
    #[must_use]
    pub fn with_layout(mut self, property: &str, value: Value) -> Self {
        self.set_layout(property, value);
        self
    }

    /// The layer identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the layer identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Read any top-level key other than `id`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert or replace a top-level key.
    ///
    /// Writing `id` renames the layer and only accepts a string; any other
    /// value is refused and `false` is returned with the layer unchanged.
    pub fn insert(&mut self, key: &str, value: Value) -> bool {
        if key == KEY_ID {
            let Value::String(id) = value else {
                return false;
            };
            self.id = id;
            return true;
        }
        self.fields.insert(key.to_owned(), value);
        true
    }

    /// The `source` reference, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.fields.get(KEY_SOURCE).and_then(Value::as_str)
    }

    /// The `source-layer` reference, if any.
    #[must_use]
    pub fn source_layer(&self) -> Option<&str> {
        self.fields.get(KEY_SOURCE_LAYER).and_then(Value::as_str)
    }

    /// The `filter` expression, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&Value> {
        self.fields.get(KEY_FILTER)
    }

    /// Mutable access to the `filter` expression.
    pub fn filter_mut(&mut self) -> Option<&mut Value> {
        self.fields.get_mut(KEY_FILTER)
    }

    /// Replace the `filter` expression.
    pub fn set_filter(&mut self, filter: Value) {
        self.fields.insert(KEY_FILTER.to_owned(), filter);
    }

    /// Read one `paint` property.
    #[must_use]
    pub fn paint(&self, property: &str) -> Option<&Value> {
        self.fields
            .get(KEY_PAINT)
            .and_then(Value::as_object)
            .and_then(|paint| paint.get(property))
    }

    /// Set one `paint` property, creating the `paint` object when needed.
    pub fn set_paint(&mut self, property: &str, value: Value) {
        self.set_nested(KEY_PAINT, property, value);
    }

    /// Read one `layout` property.
    #[must_use]
    pub fn layout(&self, property: &str) -> Option<&Value> {
        self.fields
            .get(KEY_LAYOUT)
            .and_then(Value::as_object)
            .and_then(|layout| layout.get(property))
    }

    /// Set one `layout` property, creating the `layout` object when needed.
    pub fn set_layout(&mut self, property: &str, value: Value) {
        self.set_nested(KEY_LAYOUT, property, value);
    }

    fn set_nested(&mut self, section: &str, property: &str, value: Value) {
        let entry = self
            .fields
            .entry(section.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(property.to_owned(), value);
        }
    }
}

impl TryFrom<Map<String, Value>> for Layer {
    type Error = LayerError;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.remove(KEY_ID) {
            Some(Value::String(id)) => id,
            _ => return Err(LayerError::MissingId),
        };
        Ok(Self { id, fields })
    }
}

impl TryFrom<Value> for Layer {
    type Error = LayerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Self::try_from(fields),
            _ => Err(LayerError::NotAnObject),
        }
    }
}

impl From<Layer> for Map<String, Value> {
    fn from(layer: Layer) -> Self {
        let mut map = Self::with_capacity(layer.fields.len() + 1);
        map.insert(KEY_ID.to_owned(), Value::String(layer.id));
        map.extend(layer.fields);
        map
    }
}

/// Outcome of [`LayerList::derive_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// The clone was inserted at the given index.
    Inserted(usize),
    /// A layer with the target id already exists; nothing changed.
    AlreadyPresent,
    /// The layer to clone from does not exist; nothing changed.
    SourceMissing,
}

/// Layers in paint order with unique ids.
///
/// Later layers draw over earlier ones. Every mutating method refuses to
/// introduce a second layer with an existing id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerList {
    layers: Vec<Layer>,
}

impl LayerList {
    /// Build a list, rejecting duplicate ids.
    pub fn new(layers: Vec<Layer>) -> Result<Self, LayerError> {
        let mut seen = HashSet::with_capacity(layers.len());
        for layer in &layers {
            if !seen.insert(layer.id()) {
                return Err(LayerError::DuplicateId {
                    id: layer.id().to_owned(),
                });
            }
        }
        Ok(Self { layers })
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate layers in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Layer ids in paint order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(Layer::id)
    }

    /// Index of the layer with `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    /// Index of the last layer matching `predicate`.
    pub fn last_position(&self, predicate: impl Fn(&Layer) -> bool) -> Option<usize> {
        self.layers.iter().rposition(predicate)
    }

    /// Whether a layer with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Borrow the layer with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Mutably borrow the layer with `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    /// Insert `layer` at `index` (clamped to the list length).
    ///
    /// Returns `false` and leaves the list untouched when the id is taken.
    pub fn insert(&mut self, index: usize, layer: Layer) -> bool {
        if self.contains(layer.id()) {
            return false;
        }
        let at = index.min(self.layers.len());
        self.layers.insert(at, layer);
        true
    }

    /// Insert `layer` directly before `anchor`.
    ///
    /// Returns `None` when the anchor is absent, otherwise whether the layer
    /// was inserted.
    pub fn insert_before(&mut self, anchor: &str, layer: Layer) -> Option<bool> {
        let index = self.position(anchor)?;
        Some(self.insert(index, layer))
    }

    /// Replace the layer `id` with `replacements`, keeping its position.
    ///
    /// Replacements whose ids already exist elsewhere in the list are
    /// dropped. Returns `false` when `id` is absent.
    pub fn replace(&mut self, id: &str, replacements: Vec<Layer>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.layers.remove(index);
        let mut seen: HashSet<String> = self.ids().map(str::to_owned).collect();
        let fresh: Vec<Layer> = replacements
            .into_iter()
            .filter(|layer| seen.insert(layer.id().to_owned()))
            .collect();
        self.layers.splice(index..index, fresh);
        true
    }

    /// Clone `source_id` as `new_id`, let `mutate` specialise it, and insert
    /// it directly after the source layer.
    pub fn derive_layer(
        &mut self,
        source_id: &str,
        new_id: &str,
        mutate: impl FnOnce(&mut Layer),
    ) -> Derivation {
        if self.contains(new_id) {
            return Derivation::AlreadyPresent;
        }
        let Some(index) = self.position(source_id) else {
            return Derivation::SourceMissing;
        };
        let Some(source) = self.layers.get(index) else {
            return Derivation::SourceMissing;
        };
        let mut derived = source.clone();
        derived.set_id(new_id);
        mutate(&mut derived);
        // `mutate` may not rename the clone onto an existing id.
        if derived.id() != new_id && self.contains(derived.id()) {
            return Derivation::AlreadyPresent;
        }
        self.layers.insert(index + 1, derived);
        Derivation::Inserted(index + 1)
    }
}

impl TryFrom<Vec<Layer>> for LayerList {
    type Error = LayerError;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        Self::new(layers)
    }
}

impl From<LayerList> for Vec<Layer> {
    fn from(list: LayerList) -> Self {
        list.layers
    }
}

impl<'a> IntoIterator for &'a LayerList {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
