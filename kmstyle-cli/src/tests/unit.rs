//! Focused unit tests covering build CLI configuration resolution.

use super::helpers::{Workspace, write_utf8};
use super::*;
use crate::build::{BuildArgs, BuildConfig, config_from_layers_for_test};
use kmstyle_core::{Flavor, Language, StyleConfig, TagError};
use rstest::rstest;

fn args_with_layers_dir() -> BuildArgs {
    BuildArgs {
        layers_dir: Some("layers".into()),
        ..BuildArgs::default()
    }
}

fn languages(tags: &[&str]) -> Vec<Language> {
    tags.iter()
        .map(|tag| Language::new(tag).expect("valid tag"))
        .collect()
}

#[rstest]
fn converting_without_layers_dir_errors() {
    let err = BuildConfig::try_from(BuildArgs::default()).expect_err("missing layers dir");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LAYERS_DIR);
            assert_eq!(env, ENV_LAYERS_DIR);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn build_config_applies_defaults() {
    let config = BuildConfig::try_from(args_with_layers_dir()).expect("config should build");
    assert_eq!(config.layers_dir, "layers");
    assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
    assert_eq!(config.languages, languages(&["ja", "en"]));
    assert_eq!(config.flavors, Flavor::ALL.to_vec());
    assert_eq!(config.style, StyleConfig::default());
}

#[rstest]
#[case("en", &["en"])]
#[case(" en, ja ,en", &["en", "ja"])]
#[case("ja,,zh-Hant", &["ja", "zh-Hant"])]
fn languages_are_parsed_in_order_without_repeats(#[case] raw: &str, #[case] expected: &[&str]) {
    let args = BuildArgs {
        languages: Some(raw.to_owned()),
        ..args_with_layers_dir()
    };
    let config = BuildConfig::try_from(args).expect("config should build");
    assert_eq!(config.languages, languages(expected));
}

#[rstest]
fn flavors_are_parsed_case_insensitively() {
    let args = BuildArgs {
        flavors: Some("Dark, light".to_owned()),
        ..args_with_layers_dir()
    };
    let config = BuildConfig::try_from(args).expect("config should build");
    assert_eq!(config.flavors, vec![Flavor::Dark, Flavor::Light]);
}

#[rstest]
fn unknown_flavor_is_rejected() {
    let args = BuildArgs {
        flavors: Some("light,sepia".to_owned()),
        ..args_with_layers_dir()
    };
    let err = BuildConfig::try_from(args).expect_err("sepia is not a flavor");
    match err {
        CliError::InvalidTag { field, source } => {
            assert_eq!(field, ARG_FLAVORS);
            assert_eq!(source, TagError::UnknownFlavor("sepia".to_owned()));
        }
        other => panic!("expected InvalidTag, found {other:?}"),
    }
}

#[rstest]
fn malformed_language_is_rejected() {
    let args = BuildArgs {
        languages: Some("ja,e n".to_owned()),
        ..args_with_layers_dir()
    };
    let err = BuildConfig::try_from(args).expect_err("space inside a tag");
    assert!(matches!(
        err,
        CliError::InvalidTag {
            field: ARG_LANGUAGES,
            source: TagError::InvalidLanguage(_),
        }
    ));
}

#[rstest]
#[case::languages(ARG_LANGUAGES)]
#[case::flavors(ARG_FLAVORS)]
fn blank_selection_is_rejected(#[case] field: &'static str) {
    let blank = Some(" , ".to_owned());
    let args = if field == ARG_LANGUAGES {
        BuildArgs {
            languages: blank,
            ..args_with_layers_dir()
        }
    } else {
        BuildArgs {
            flavors: blank,
            ..args_with_layers_dir()
        }
    };
    match BuildConfig::try_from(args).expect_err("blank selection") {
        CliError::EmptySelection { field: reported } => assert_eq!(reported, field),
        other => panic!("expected EmptySelection, found {other:?}"),
    }
}

#[rstest]
#[case(None, "osm-ja-light")]
#[case(Some(""), "ja-light")]
#[case(Some("kmproj"), "kmproj-ja-light")]
fn name_prefix_controls_style_names(#[case] prefix: Option<&str>, #[case] expected: &str) {
    let args = BuildArgs {
        name_prefix: prefix.map(str::to_owned),
        ..args_with_layers_dir()
    };
    let config = BuildConfig::try_from(args).expect("config should build");
    let ja = Language::new("ja").expect("valid tag");
    assert_eq!(config.style.style_name(&ja, Flavor::Light).as_str(), expected);
}

#[rstest]
fn url_options_override_style_metadata() {
    let args = BuildArgs {
        tiles_url: Some("https://example.test/tiles.json".to_owned()),
        dem_tiles_url: Some("https://example.test/dem/{z}/{x}/{y}.png".to_owned()),
        glyphs_url: Some("https://example.test/fonts/{fontstack}/{range}.pbf".to_owned()),
        sprite_base_url: Some("https://example.test/sprites/".to_owned()),
        ..args_with_layers_dir()
    };
    let config = BuildConfig::try_from(args).expect("config should build");
    assert_eq!(config.style.vector_url, "https://example.test/tiles.json");
    assert_eq!(
        config.style.dem_tiles_url,
        "https://example.test/dem/{z}/{x}/{y}.png"
    );
    assert_eq!(
        config.style.glyphs_url,
        "https://example.test/fonts/{fontstack}/{range}.pbf"
    );
    assert_eq!(
        config.style.sprite_url(Flavor::Dark),
        "https://example.test/sprites/dark"
    );
}

#[rstest]
fn validate_sources_accepts_existing_directory() {
    let workspace = Workspace::new();
    let config = workspace.config(&["ja"], &[Flavor::Light]);
    config.validate_sources().expect("layers dir exists");
}

#[rstest]
#[case::missing(false)]
#[case::file(true)]
fn validate_sources_rejects_non_directories(#[case] create_file: bool) {
    let workspace = Workspace::new();
    let mut config = workspace.config(&["ja"], &[Flavor::Light]);
    config.layers_dir = workspace.root().join("layers.json");
    if create_file {
        write_utf8(&config.layers_dir, b"[]");
    }
    match config.validate_sources().expect_err("not a directory") {
        CliError::NotADirectory { field, path } => {
            assert_eq!(field, ARG_LAYERS_DIR);
            assert_eq!(path, config.layers_dir);
        }
        other => panic!("expected NotADirectory, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "layers_dir": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "layers_dir": "from-file",
            "languages": "en",
            "name_prefix": "file",
        }),
        None,
    );
    composer.push_environment(json!({
        "layers_dir": "from-env",
        "name_prefix": "",
    }));
    composer.push_cli(json!({
        "flavors": "dark",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.layers_dir, "from-env");
    assert_eq!(config.languages, languages(&["en"]));
    assert_eq!(config.flavors, vec![Flavor::Dark]);
    assert_eq!(config.style.name_prefix, None);
    assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
}

#[rstest]
fn cli_parses_build_flags() {
    let cli = Cli::try_parse_from([
        "kmstyle",
        "build",
        "--layers-dir",
        "layers",
        "--languages",
        "ja",
        "--flavors",
        "light,dark",
    ])
    .expect("flags parse");
    match cli.command {
        Command::Build(args) => {
            assert_eq!(args.layers_dir.as_deref().map(|p| p.as_str()), Some("layers"));
            assert_eq!(args.languages.as_deref(), Some("ja"));
            assert_eq!(args.flavors.as_deref(), Some("light,dark"));
            assert_eq!(args.output_dir, None);
        }
        Command::Index(_) => panic!("expected build command"),
    }
}

#[rstest]
fn cli_rejects_unknown_subcommand() {
    let err = Cli::try_parse_from(["kmstyle", "publish"]).expect_err("unknown subcommand");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
}
