// tests/pipeline_default.rs

mod common;
use crate::common::*;

use std::error::Error;
use std::sync::Arc;

use stylepipe::errors::StylepipeError;
use stylepipe::exec::RealStageExecutor;
use stylepipe::pipeline::Pipeline;
use stylepipe::types::{Invocation, Transform};
use stylepipe::engine::PipelineRunner;
use stylepipe::run_default;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn default_run_writes_every_declared_output() -> TestResult {
    init_tracing();
    let project = Project::new();

    let report = run_default(&portable_config(), project.root()).await?;

    for rel in [COMPILED, MIN_BASE, MIN_GRID, MIN_SITE, BUNDLE] {
        assert!(project.exists(rel), "{rel} should have been written");
    }

    let stages: Vec<Transform> = report.stages.iter().map(|s| s.transform).collect();
    assert_eq!(stages, Transform::ORDER.to_vec());
    assert_eq!(report.outputs().count(), 5);

    // `cat` as the compiler passes the source straight through.
    assert_eq!(project.read(COMPILED), SITE_SOURCE.as_bytes());

    Ok(())
}

#[tokio::test]
async fn bundle_is_pure_concatenation_in_fixed_order() -> TestResult {
    init_tracing();
    let project = Project::new();

    run_default(&portable_config(), project.root()).await?;

    let base = project.read(MIN_BASE);
    let grid = project.read(MIN_GRID);
    let site = project.read(MIN_SITE);
    let bundle = project.read(BUNDLE);

    assert_eq!(bundle.len(), base.len() + grid.len() + site.len());

    let (first, rest) = bundle.split_at(base.len());
    let (second, third) = rest.split_at(grid.len());
    assert_eq!(first, base.as_slice());
    assert_eq!(second, grid.as_slice());
    assert_eq!(third, site.as_slice());

    Ok(())
}

#[tokio::test]
async fn minified_outputs_are_smaller_single_line_css() -> TestResult {
    init_tracing();
    let project = Project::new();

    run_default(&portable_config(), project.root()).await?;

    for (rel, original) in [
        (MIN_BASE, VENDOR_BASE_CSS),
        (MIN_GRID, VENDOR_GRID_CSS),
        (MIN_SITE, SITE_SOURCE),
    ] {
        let text = String::from_utf8(project.read(rel))?;
        assert!(!text.contains('\n'), "{rel} still has newlines: {text:?}");
        assert!(text.len() < original.len(), "{rel} was not reduced");
    }

    let site = String::from_utf8(project.read(MIN_SITE))?;
    assert!(site.contains(".header .title"));

    Ok(())
}

#[tokio::test]
async fn running_twice_produces_identical_bytes() -> TestResult {
    init_tracing();
    let project = Project::new();
    let cfg = portable_config();

    let first = run_default(&cfg, project.root()).await?;
    let bundle_first = project.read(BUNDLE);

    let second = run_default(&cfg, project.root()).await?;
    let bundle_second = project.read(BUNDLE);

    assert_eq!(bundle_first, bundle_second);

    let digests = |r: &stylepipe::exec::RunReport| {
        r.outputs().map(|a| a.digest.clone()).collect::<Vec<_>>()
    };
    assert_eq!(digests(&first), digests(&second));

    Ok(())
}

#[tokio::test]
async fn compiler_failure_aborts_before_minify_and_concat() -> TestResult {
    init_tracing();
    let project = Project::new();
    let cfg = ConfigFileBuilder::new()
        .compile_cmd("echo 'ParseError: missing closing brace' >&2; exit 2 # {input}")
        .build();

    let err = run_default(&cfg, project.root())
        .await
        .expect_err("compile should fail");

    match err {
        StylepipeError::SourceError { path, message } => {
            assert!(path.ends_with("styles/less/main.less"));
            assert!(message.contains("code 2"), "message: {message}");
            assert!(message.contains("ParseError"), "message: {message}");
        }
        other => panic!("expected SourceError, got {other:?}"),
    }

    for rel in [COMPILED, MIN_BASE, MIN_GRID, MIN_SITE, BUNDLE] {
        assert!(!project.exists(rel), "{rel} must not be written by a failed run");
    }

    Ok(())
}

#[tokio::test]
async fn failed_compile_leaves_previous_outputs_untouched() -> TestResult {
    init_tracing();
    let project = Project::new();

    run_default(&portable_config(), project.root()).await?;
    let bundle_before = project.read(BUNDLE);

    project.write("styles/less/main.less", "body { color: blue; }\n");
    let failing = ConfigFileBuilder::new().compile_cmd("exit 1 # {input}").build();
    assert!(run_default(&failing, project.root()).await.is_err());

    assert_eq!(project.read(BUNDLE), bundle_before);

    Ok(())
}

#[tokio::test]
async fn missing_vendor_file_is_a_missing_input_error() -> TestResult {
    init_tracing();
    let project = Project::new();
    project.remove("node_modules/purecss/build/pure.css");

    let err = run_default(&portable_config(), project.root())
        .await
        .expect_err("minify should fail");

    match err {
        StylepipeError::MissingInput(path) => {
            assert!(path.ends_with("node_modules/purecss/build/pure.css"));
        }
        other => panic!("expected MissingInput, got {other:?}"),
    }

    // Compile ran; nothing after it was written, not even an empty file.
    assert!(project.exists(COMPILED));
    for rel in [MIN_BASE, MIN_GRID, MIN_SITE, BUNDLE] {
        assert!(!project.exists(rel), "{rel} must not be written");
    }

    Ok(())
}

#[tokio::test]
async fn missing_style_source_fails_before_spawning_compiler() -> TestResult {
    init_tracing();
    let project = Project::new();
    project.remove("styles/less/main.less");

    let err = run_default(&portable_config(), project.root())
        .await
        .expect_err("compile should fail");

    assert!(matches!(err, StylepipeError::MissingInput(ref p) if p.ends_with("main.less")));
    assert!(!project.exists(COMPILED));

    Ok(())
}

#[tokio::test]
async fn compiler_writing_its_own_output_is_supported() -> TestResult {
    init_tracing();
    let project = Project::new();
    let cfg = ConfigFileBuilder::new()
        .compile_cmd("mkdir -p \"$(dirname {output})\" && cp {input} {output}")
        .build();

    let report = run_default(&cfg, project.root()).await?;

    assert_eq!(project.read(COMPILED), SITE_SOURCE.as_bytes());
    let compile = report
        .stage(Transform::Compile)
        .ok_or("missing compile report")?;
    assert_eq!(compile.outputs[0].bytes, SITE_SOURCE.len());
    assert!(!project.exists("styles/css/.main.css.partial"));

    Ok(())
}

#[tokio::test]
async fn compiler_that_writes_nothing_does_not_reuse_stale_output() -> TestResult {
    init_tracing();
    let project = Project::new();
    let writing = ConfigFileBuilder::new()
        .compile_cmd("mkdir -p \"$(dirname {output})\" && cp {input} {output}")
        .build();
    run_default(&writing, project.root()).await?;
    let compiled_before = project.read(COMPILED);
    let bundle_before = project.read(BUNDLE);

    // Exits 0 without producing anything; a leftover staging file from an
    // interrupted run must not count either.
    project.write("styles/less/main.less", ".changed {\n  color: #0000ff;\n}\n");
    project.write("styles/css/.main.css.partial", ".stale{color:red}");
    let silent = ConfigFileBuilder::new()
        .compile_cmd("true # {input} {output}")
        .build();

    let err = run_default(&silent, project.root()).await.unwrap_err();
    match err {
        StylepipeError::SourceError { message, .. } => {
            assert!(message.contains("did not write"), "message: {message}")
        }
        other => panic!("Expected SourceError, got: {:?}", other),
    }

    assert_eq!(project.read(COMPILED), compiled_before);
    assert_eq!(project.read(BUNDLE), bundle_before);
    assert!(!project.exists("styles/css/.main.css.partial"));

    Ok(())
}

#[tokio::test]
async fn failing_output_compiler_leaves_destination_untouched() -> TestResult {
    init_tracing();
    let project = Project::new();
    run_default(&portable_config(), project.root()).await?;
    let compiled_before = project.read(COMPILED);

    let cfg = ConfigFileBuilder::new()
        .compile_cmd("echo 'half' > {output}; exit 3 # {input}")
        .build();
    let err = run_default(&cfg, project.root()).await.unwrap_err();

    assert!(matches!(err, StylepipeError::SourceError { .. }));
    assert_eq!(project.read(COMPILED), compiled_before);
    assert!(!project.exists("styles/css/.main.css.partial"));

    Ok(())
}

#[tokio::test]
async fn single_stage_invocation_runs_only_that_stage() -> TestResult {
    init_tracing();
    let project = Project::new();
    let cfg = portable_config();

    run_default(&cfg, project.root()).await?;

    // Hand-edit a minified file; concat alone must pick it up verbatim.
    project.write(MIN_SITE, ".x{y:z}");

    let pipeline = Arc::new(Pipeline::from_config(&cfg, project.root())?);
    let executor = RealStageExecutor::from_config(&cfg, project.root())?;
    let mut runner = PipelineRunner::new(pipeline, executor);

    let report = runner.run(Invocation::Concat).await?;
    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].transform, Transform::Concat);

    let bundle = String::from_utf8(project.read(BUNDLE))?;
    assert!(bundle.ends_with(".x{y:z}"));

    Ok(())
}
