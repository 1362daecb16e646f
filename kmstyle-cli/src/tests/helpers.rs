//! Test helpers for laying out base layer directories on disk.

use camino::{Utf8Path, Utf8PathBuf};
use kmstyle_core::test_support::{base_layers, roadless_layers};
use kmstyle_core::{Flavor, Language, LayerList, StyleConfig};
use std::fs;
use tempfile::TempDir;

use crate::build::BuildConfig;

/// A temporary workspace with a `layers/` input and a `styles/` output.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        fs::create_dir(root.join("layers")).expect("create layers dir");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn layers_dir(&self) -> Utf8PathBuf {
        self.root.join("layers")
    }

    pub(super) fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("styles")
    }

    /// Write `layers` as a bare array for one pair.
    pub(super) fn write_layers(&self, language: &str, flavor: &str, layers: &LayerList) {
        let payload = serde_json::to_vec(layers).expect("serialise layers");
        write_utf8(&self.layer_file(language, flavor), &payload);
    }

    /// Write raw bytes as the layer file of one pair.
    pub(super) fn write_raw(&self, language: &str, flavor: &str, contents: &[u8]) {
        write_utf8(&self.layer_file(language, flavor), contents);
    }

    /// Write the full fixture list for every pair of `languages` x `flavors`.
    pub(super) fn write_base_layers(&self, languages: &[&str], flavors: &[&str]) {
        let layers = base_layers();
        for language in languages {
            for flavor in flavors {
                self.write_layers(language, flavor, &layers);
            }
        }
    }

    /// Write a list without road layers for one pair.
    pub(super) fn write_roadless_layers(&self, language: &str, flavor: &str) {
        self.write_layers(language, flavor, &roadless_layers());
    }

    fn layer_file(&self, language: &str, flavor: &str) -> Utf8PathBuf {
        self.layers_dir().join(format!("{language}-{flavor}.json"))
    }

    /// A resolved configuration building `languages` x `flavors`.
    pub(super) fn config(&self, languages: &[&str], flavors: &[Flavor]) -> BuildConfig {
        BuildConfig {
            layers_dir: self.layers_dir(),
            output_dir: self.output_dir(),
            languages: languages
                .iter()
                .map(|tag| Language::new(tag).expect("valid tag"))
                .collect(),
            flavors: flavors.to_vec(),
            style: StyleConfig::default(),
        }
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

pub(super) fn read_json(path: &Utf8Path) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("read output file");
    serde_json::from_str(&raw).expect("output is valid JSON")
}

/// Ids of the `layers` array of a written style document.
pub(super) fn layer_ids(document: &serde_json::Value) -> Vec<String> {
    document["layers"]
        .as_array()
        .expect("layers array")
        .iter()
        .map(|layer| layer["id"].as_str().expect("string id").to_owned())
        .collect()
}

