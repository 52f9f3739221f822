// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{mpsc, watch as signal};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::{LoadedConfig, resolve_config};
use crate::config::model::ConfigFile;
use crate::engine::{PipelineRunner, Runtime, RuntimeEvent, WatchStats};
use crate::errors::Result;
use crate::exec::{RealStageExecutor, RunReport, StageExecutor};
use crate::pipeline::Pipeline;
use crate::types::Invocation;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution and validation
/// - the pipeline and its real stage executor
/// - either one run (`default` / single stage) or a watch session
pub async fn run(args: CliArgs) -> Result<()> {
    let loaded = resolve_config(args.config.as_deref().map(Path::new))?;
    let pipeline = Arc::new(Pipeline::from_config(&loaded.config, &loaded.root)?);

    if args.dry_run {
        print_dry_run(&loaded, &pipeline);
        return Ok(());
    }

    let executor = RealStageExecutor::from_config(&loaded.config, &loaded.root)?;
    let runner = PipelineRunner::new(Arc::clone(&pipeline), executor);

    match args.invocation {
        Invocation::Watch => {
            run_watch(runner).await?;
        }
        invocation => {
            let mut runner = runner;
            let report = runner.run(invocation).await?;
            info!(
                %invocation,
                files = report.outputs().count(),
                elapsed_ms = report.elapsed().as_millis() as u64,
                "done"
            );
        }
    }

    Ok(())
}

/// Run compile, minify and concatenate once for the project at `root`,
/// using the real compiler, minifier and concatenator.
pub async fn run_default(cfg: &ConfigFile, root: &Path) -> Result<RunReport> {
    let pipeline = Arc::new(Pipeline::from_config(cfg, root)?);
    let executor = RealStageExecutor::from_config(cfg, root)?;
    PipelineRunner::new(pipeline, executor).run_default().await
}

/// Watch the structured sources and re-run the full pipeline on every
/// change until Ctrl-C.
///
/// A failed run is logged and the session keeps waiting for the next
/// change.
pub async fn run_watch<E: StageExecutor>(runner: PipelineRunner<E>) -> Result<WatchStats> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let (shutdown_tx, shutdown_rx) = signal::channel(false);

    let binding = runner.pipeline().watch().clone();
    let _watcher_handle =
        crate::watch::spawn_watcher(&binding, runner.pipeline().root(), rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    if binding.run_on_start {
        rt_tx.send(RuntimeEvent::RunRequested).await.map_err(anyhow::Error::from)?;
    }

    let runtime = Runtime::new(runner, rt_rx, shutdown_rx);
    Ok(runtime.run().await)
}

/// Simple dry-run output: print stages, their files and the watch binding.
fn print_dry_run(loaded: &LoadedConfig, pipeline: &Pipeline) {
    println!("stylepipe dry-run");
    match &loaded.source {
        Some(path) => println!("  config: {}", path.display()),
        None => println!("  config: <built-in layout>"),
    }
    println!("  root:   {}", pipeline.root().display());
    println!("  compile.cmd = {}", loaded.config.compile().cmd);
    println!();

    println!("stages ({}):", pipeline.stages().len());
    for (idx, stage) in pipeline.stages().iter().enumerate() {
        println!("  {}. {}", idx + 1, stage.name());
        for mapping in stage.files() {
            let sources: Vec<String> = mapping
                .sources
                .iter()
                .map(|a| format!("{a} ({})", a.role()))
                .collect();
            println!("      {} -> {}", sources.join(" + "), mapping.dest);
        }
    }
    println!();

    let watch = pipeline.watch();
    println!("watch:");
    println!("  dir: {}", watch.dir.display());
    println!("  patterns: {:?}", watch.profile.patterns());
    if !loaded.config.watch().exclude.is_empty() {
        println!("  exclude: {:?}", loaded.config.watch().exclude);
    }
    let stages: Vec<&str> = watch.stages.iter().map(|t| t.as_str()).collect();
    println!("  re-runs: {}", stages.join(" -> "));
    if watch.run_on_start {
        println!("  run_on_start: true");
    }

    debug!("dry-run complete (no execution)");
}
