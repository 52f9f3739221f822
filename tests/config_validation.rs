// tests/config_validation.rs

mod common;
use crate::common::*;

use std::io::Write;

use tempfile::NamedTempFile;
use stylepipe::config::{
    ConfigFile, RawConfigFile, load_and_validate, load_from_path, resolve_config,
};
use stylepipe::errors::StylepipeError;

fn expect_config_error(raw: RawConfigFile) -> String {
    match ConfigFile::try_from(raw) {
        Err(StylepipeError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn built_in_layout_matches_the_stock_file_contract() {
    let cfg = ConfigFile::default();

    assert_eq!(cfg.compile().src, "styles/less/main.less");
    assert_eq!(cfg.compile().dest, "styles/css/main.css");
    assert_eq!(cfg.compile().cmd, "lessc {input}");
    assert_eq!(cfg.minify().vendor_base.src, "node_modules/purecss/build/pure.css");
    assert_eq!(cfg.minify().vendor_base.dest, "styles/mincss/pure.css");
    assert_eq!(
        cfg.minify().vendor_grid.src,
        "node_modules/purecss/build/grids-responsive.css"
    );
    assert_eq!(
        cfg.minify().vendor_grid.dest,
        "styles/mincss/grids-responsive-min.css"
    );
    assert_eq!(cfg.minify().site.src, "styles/css/main.css");
    assert_eq!(cfg.minify().site.dest, "styles/mincss/main.css");
    assert_eq!(cfg.concat().dest, "styles/dist/style.css");
    assert_eq!(cfg.watch().dir, "styles/less");
    assert!(!cfg.watch().run_on_start);

    // The built-in layout must also pass validation on its own.
    assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
}

#[test]
fn empty_file_yields_built_in_layout() {
    let file = NamedTempFile::new().unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg, ConfigFile::default());
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[compile]
cmd = "npx lessc {{input}}"

[concat]
dest = "public/site.css"

[watch]
run_on_start = true
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.compile().cmd, "npx lessc {input}");
    assert_eq!(cfg.compile().src, "styles/less/main.less");
    assert_eq!(cfg.concat().dest, "public/site.css");
    assert!(cfg.watch().run_on_start);
}

#[test]
fn unknown_keys_are_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[concat]
dest = "styles/dist/style.css"
separator = "\n"
"#
    )
    .unwrap();

    match load_from_path(file.path()) {
        Err(StylepipeError::TomlError(e)) => assert!(e.to_string().contains("separator")),
        other => panic!("Expected TomlError, got: {:?}", other),
    }
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Nope.toml");

    match load_and_validate(&path) {
        Err(StylepipeError::ConfigError(msg)) => assert!(msg.contains("not found")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn duplicate_output_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .vendor_grid(
            "node_modules/purecss/build/grids-responsive.css",
            "styles/mincss/pure.css",
        )
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("styles/mincss/pure.css"));
    assert!(msg.contains("vendor_base") && msg.contains("vendor_grid"));
}

#[test]
fn duplicate_output_detection_ignores_dot_slash_prefix() {
    let raw = ConfigFileBuilder::new()
        .concat_dest("./styles/mincss/main.css")
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("produced by both"));
}

#[test]
fn output_may_not_overwrite_a_vendor_source() {
    let raw = ConfigFileBuilder::new()
        .concat_dest("node_modules/purecss/build/pure.css")
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("would be overwritten"));
}

#[test]
fn site_styles_must_come_from_the_compile_stage() {
    let raw = ConfigFileBuilder::new()
        .site("styles/css/other.css", "styles/mincss/main.css")
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("compile output"));
}

#[test]
fn compile_command_needs_input_placeholder() {
    let raw = ConfigFileBuilder::new().compile_cmd("lessc main.less").raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("{input}"));
}

#[test]
fn compile_command_rejects_unknown_placeholders() {
    let raw = ConfigFileBuilder::new()
        .compile_cmd("lessc {input} --map {sourcemap}")
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("{sourcemap}"));
}

#[test]
fn watch_patterns_must_cover_the_style_source() {
    let raw = ConfigFileBuilder::new()
        .watch_patterns(&["styles/scss/**/*.scss"])
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("do not cover"));
}

#[test]
fn watch_dir_must_contain_the_style_source() {
    let raw = ConfigFileBuilder::new().watch_dir("node_modules").raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("does not contain"));
    assert!(msg.contains("node_modules"));
}

#[test]
fn watch_dir_prefix_must_match_whole_components() {
    let raw = ConfigFileBuilder::new().watch_dir("styles/les").raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("does not contain"));
}

#[test]
fn watch_dir_may_be_an_ancestor_of_the_style_source() {
    for dir in ["styles", "./styles/less/", "."] {
        let raw = ConfigFileBuilder::new().watch_dir(dir).raw();
        assert!(
            ConfigFile::try_from(raw).is_ok(),
            "watch.dir {dir:?} should be accepted"
        );
    }
}

#[test]
fn excluding_the_style_source_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .watch_exclude(&["styles/less/main.less"])
        .raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("do not cover"));
}

#[test]
fn invalid_glob_is_rejected() {
    let raw = ConfigFileBuilder::new().watch_patterns(&["styles/less/[.less"]).raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("invalid watch globs"));
}

#[test]
fn empty_path_is_rejected() {
    let raw = ConfigFileBuilder::new().concat_dest("  ").raw();

    let msg = expect_config_error(raw);
    assert!(msg.contains("concat.dest"));
}

#[test]
fn explicit_config_roots_paths_at_its_directory() {
    let project = Project::new();
    project.write("Stylepipe.toml", "[compile]\ncmd = \"cat {input}\"\n");

    let config_path = project.path("Stylepipe.toml");
    let loaded = resolve_config(Some(config_path.as_path())).unwrap();

    assert_eq!(loaded.root, project.root());
    assert_eq!(loaded.source.as_deref(), Some(config_path.as_path()));
    assert_eq!(loaded.config.compile().cmd, "cat {input}");
}

#[test]
fn explicit_config_that_does_not_exist_fails() {
    let project = Project::new();
    let missing = project.path("Missing.toml");

    assert!(matches!(
        resolve_config(Some(missing.as_path())),
        Err(StylepipeError::ConfigError(_))
    ));
}
