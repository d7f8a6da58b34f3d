//! Versioned Clang re-scan (spec.md §4.E): a PCM compiled under one set of PCM-args is
//! not loadable by a consumer compiled under another, so every Clang module must be
//! materialized once per distinct PCM-args vector reaching it from the root.
//!
//! Grounded on `cribo_graph.rs`'s topological-walk style (a DFS that accumulates state
//! along the path rather than memoizing per-node), generalized from "is this edge part
//! of a cycle" to "which PCM-args sets reach this node".

use indexmap::{IndexMap, IndexSet};

use crate::{
    error::{PlanError, Result},
    graph::InterModuleDependencyGraph,
    id::{ModuleId, ModuleKind},
    scanner::DependencyScanner,
};

/// `mapping ModuleId(Clang) → set of ordered-sequence-of-string`, insertion-ordered so
/// re-scans (and therefore job generation) happen in a deterministic sequence.
pub type PathPcmArgs = IndexMap<ModuleId, IndexSet<Vec<String>>>;

/// Depth-first walk from `Swift(mainModuleName)`, accumulating the set of PCM-args
/// vectors seen on the current path and recording it against every Clang module
/// reached (§4.E "Path-PCM-args set computation").
pub fn compute_path_pcm_args(graph: &InterModuleDependencyGraph, main_module_name: &str) -> Result<PathPcmArgs> {
    let mut result = PathPcmArgs::new();
    let main_id = ModuleId::swift(main_module_name);
    walk(graph, &main_id, &IndexSet::new(), &mut result)?;
    Ok(result)
}

fn walk(
    graph: &InterModuleDependencyGraph,
    id: &ModuleId,
    path: &IndexSet<Vec<String>>,
    result: &mut PathPcmArgs,
) -> Result<()> {
    match id.kind {
        ModuleKind::Swift | ModuleKind::SwiftPrebuiltExternal => {
            let module_pcm_args = graph.pcm_args(id)?.to_vec();
            let mut extended_path = path.clone();
            extended_path.insert(module_pcm_args);

            let info = graph.module_info(id)?;
            for dep in &info.direct_dependencies {
                walk(graph, dep, &extended_path, result)?;
            }
            Ok(())
        }
        ModuleKind::Clang => {
            let entry = result.entry(id.clone()).or_default();
            for pcm_args in path {
                entry.insert(pcm_args.clone());
            }
            Ok(())
        }
        ModuleKind::SwiftPlaceholder => Err(PlanError::UnexpectedKind(id.clone())),
    }
}

/// Re-scan every `(clangId, pcmArgs)` pair and merge the result back into `graph`
/// (§4.E "Re-scan step" / "Merge-back"). Iterates `path_pcm_args` in insertion order so
/// re-scans happen deterministically across identical inputs.
pub fn rescan_and_merge(
    graph: &mut InterModuleDependencyGraph,
    scanner: &mut dyn DependencyScanner,
    path_pcm_args: &PathPcmArgs,
) -> Result<()> {
    for (clang_id, variants) in path_pcm_args {
        for pcm_args in variants {
            log::debug!("clang rescan: {clang_id} at {pcm_args:?}");
            let sub_graph = scanner.scan_clang_module(clang_id, pcm_args)?;
            merge_back(graph, &sub_graph);
        }
    }
    Ok(())
}

/// For every module in a versioned sub-graph: insert if absent, otherwise extend
/// `directDependencies` with any not-yet-seen ids, preserving first-seen order. The
/// sub-graph's own `commandLine`/`moduleMapPath` are discarded on a merge into an
/// already-present module — same "existing wins" rule as the ordinary merger (§4.C).
fn merge_back(graph: &mut InterModuleDependencyGraph, sub_graph: &InterModuleDependencyGraph) {
    for (id, info) in sub_graph.iter() {
        if let Some(existing) = graph.get_mut(id) {
            for dep in &info.direct_dependencies {
                if !existing.direct_dependencies.contains(dep) {
                    existing.direct_dependencies.push(dep.clone());
                }
            }
        } else {
            graph.insert(id.clone(), info.clone());
        }
    }
}
