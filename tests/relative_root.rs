// tests/relative_root.rs
//
// Changes the process working directory, so it lives in its own test binary
// and keeps everything in a single test.

mod common;
use crate::common::*;

use std::error::Error;
use std::path::Path;

use stylepipe::config::{config_root_dir, resolve_config};
use stylepipe::run_default;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn project_addressed_by_relative_path_builds() -> TestResult {
    init_tracing();

    let project = Project::new();
    project.write("Stylepipe.toml", "[compile]\ncmd = \"cat {input}\"\n");

    let parent = project.root().parent().ok_or("temp dir has no parent")?;
    let name = project.root().file_name().ok_or("temp dir has no name")?;
    std::env::set_current_dir(parent)?;

    // `--config <name>/Stylepipe.toml` from the parent directory.
    let config_path = Path::new(name).join("Stylepipe.toml");
    let root = config_root_dir(&config_path);
    assert!(root.is_absolute(), "root {} is relative", root.display());

    let loaded = resolve_config(Some(config_path.as_path()))?;
    assert!(loaded.root.is_absolute());

    let report = run_default(&loaded.config, &loaded.root).await?;
    assert_eq!(report.outputs().count(), 5);
    assert_eq!(project.read(COMPILED), SITE_SOURCE.as_bytes());

    // A relative root handed straight to the library resolves the same way.
    project.remove(BUNDLE);
    run_default(&portable_config(), Path::new(name)).await?;
    assert!(project.exists(BUNDLE));

    Ok(())
}
