// src/pipeline/plan.rs

use crate::pipeline::graph::Pipeline;
use crate::pipeline::stage::StageBinding;
use crate::types::Invocation;

/// Stages an invocation runs, in order.
///
/// `default` and `watch` both run the full sequence (a watch session runs it
/// once per change); a single-stage invocation runs just that stage against
/// whatever its inputs currently are on disk.
pub fn plan_for(pipeline: &Pipeline, invocation: Invocation) -> Vec<&StageBinding> {
    if let Some(transform) = invocation.single_stage() {
        return pipeline.stage(transform).into_iter().collect();
    }

    match invocation {
        Invocation::Watch => pipeline
            .watch()
            .stages
            .iter()
            .filter_map(|t| pipeline.stage(*t))
            .collect(),
        _ => pipeline.stages().iter().collect(),
    }
}
