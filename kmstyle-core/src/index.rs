//! The `styles.json` index listing every generated style.

use serde::{Deserialize, Serialize};

use crate::StyleName;

/// File name of the index document.
pub const INDEX_FILE_NAME: &str = "styles.json";

/// Ordered list of generated style names.
///
/// # Examples
/// ```
/// use kmstyle_core::{Flavor, Language, StyleIndex, StyleName};
///
/// let ja = Language::new("ja").unwrap();
/// let mut index = StyleIndex::default();
/// index.push(StyleName::new(Some("osm"), &ja, Flavor::Light));
/// assert_eq!(serde_json::to_string(&index).unwrap(), r#"["osm-ja-light"]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleIndex {
    names: Vec<StyleName>,
}

impl StyleIndex {
    /// Build an index from names found by enumerating an output directory.
    ///
    /// The index file itself is skipped and the result is sorted, since
    /// directory order is not stable.
    pub fn from_file_stems<I, S>(stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index_stem = INDEX_FILE_NAME.trim_end_matches(".json");
        let mut names: Vec<StyleName> = stems
            .into_iter()
            .map(Into::into)
            .filter(|stem: &String| stem != index_stem)
            .map(StyleName::from)
            .collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Record a produced style, ignoring repeats.
    pub fn push(&mut self, name: StyleName) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// Names in index order.
    #[must_use]
    pub fn names(&self) -> &[StyleName] {
        &self.names
    }

    /// Number of indexed styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no styles are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn enumeration_skips_index_and_sorts() {
        let index = StyleIndex::from_file_stems(["osm-ja-light", "styles", "osm-en-dark"]);
        let names: Vec<_> = index.names().iter().map(StyleName::as_str).collect();
        assert_eq!(names, ["osm-en-dark", "osm-ja-light"]);
    }

    #[rstest]
    fn push_keeps_build_order_without_repeats() {
        let mut index = StyleIndex::default();
        index.push(StyleName::from("osm-ja-light".to_owned()));
        index.push(StyleName::from("osm-en-light".to_owned()));
        index.push(StyleName::from("osm-ja-light".to_owned()));
        assert_eq!(index.len(), 2);
        assert_eq!(
            serde_json::to_string(&index).unwrap(),
            r#"["osm-ja-light","osm-en-light"]"#
        );
    }
}
