//! Colour flavors and label languages: the two axes every style is built
//! along.
//!
//! # Examples
//! ```
//! use kmstyle_core::{Flavor, Language};
//!
//! let flavor: Flavor = "dark".parse().unwrap();
//! assert_eq!(flavor, Flavor::Dark);
//! assert!(flavor.has_transport_palette());
//!
//! let lang = Language::new("ja").unwrap();
//! assert_eq!(lang.name_field(), "name:ja");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named colour palette applied to a whole style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Default daytime palette.
    Light,
    /// Night palette.
    Dark,
    /// Low-contrast white background.
    White,
    /// Low-contrast black background.
    Black,
    /// Desaturated palette.
    Grayscale,
}

impl Flavor {
    /// Every flavor in build order.
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::Dark,
        Self::White,
        Self::Black,
        Self::Grayscale,
    ];

    /// Return the flavor as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::White => "white",
            Self::Black => "black",
            Self::Grayscale => "grayscale",
        }
    }

    /// Whether rail and motorway layers are specialised for this flavor.
    #[must_use]
    pub const fn has_transport_palette(self) -> bool {
        matches!(self, Self::Light | Self::Dark)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned when parsing a [`Flavor`] or [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The flavor name is not one of the known palettes.
    #[error("unknown flavor '{0}'")]
    UnknownFlavor(String),
    /// The language tag is empty or contains unsupported characters.
    #[error("invalid language tag '{0}'")]
    InvalidLanguage(String),
}

impl FromStr for Flavor {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TagError::UnknownFlavor(s.to_owned()))
    }
}

/// A label language tag such as `ja` or `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Validate a tag: non-empty ASCII alphanumerics and `-`.
    pub fn new(tag: &str) -> Result<Self, TagError> {
        let trimmed = tag.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(TagError::InvalidLanguage(tag.to_owned()))
        }
    }

    /// The tag as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Feature property carrying names in this language.
    #[must_use]
    pub fn name_field(&self) -> String {
        format!("name:{}", self.0)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}
