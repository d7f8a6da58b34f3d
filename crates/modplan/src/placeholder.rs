//! The placeholder resolver (spec.md §4.D): replaces every `swiftPlaceholder(n)` node
//! in a working graph with a resolved module pulled from the oracle (or from a
//! client-promised path), then transitively pulls in that module's own dependencies.
//!
//! Grounded on `module_registry.rs`'s "resolve a forward reference once its target
//! becomes known, then walk its dependents" shape, generalized here to a full BFS
//! against the shared oracle rather than a single-hop fixup.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use crate::{
    error::{PlanError, Result},
    graph::InterModuleDependencyGraph,
    id::ModuleId,
    info::{ModuleInfo, SwiftPrebuiltExternalDetails},
    merge::{MergeContext, merge_one},
    oracle::DependencyOracle,
};

/// `(externalTargetModulePathMap, externalModuleInfoMap)` (§3). The second map is a
/// caller-supplied snapshot of oracle state at the time a target's scan was kicked
/// off; this resolver consults the live `DependencyOracle` instead, since by the time
/// resolution runs the oracle is expected to be at least as current as any snapshot —
/// the field is kept for API fidelity with the spec's data model and so a driver that
/// wants to assert against "what the oracle looked like when I started" still has
/// somewhere to put it.
#[derive(Debug, Clone, Default)]
pub struct ExternalBuildArtifacts {
    pub external_target_module_path_map: IndexMap<ModuleId, std::path::PathBuf>,
    pub external_module_info_map: IndexMap<ModuleId, ModuleInfo>,
}

impl ExternalBuildArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_path(mut self, placeholder: ModuleId, path: impl Into<std::path::PathBuf>) -> Self {
        self.external_target_module_path_map.insert(placeholder, path.into());
        self
    }
}

/// Resolve every placeholder in `graph` against `oracle`/`artifacts`, in place.
///
/// Target placeholders (§4.D step 2, those with an entry in
/// `external_target_module_path_map`) are resolved first, each pass possibly
/// discovering further placeholders isn't expected — placeholders never depend on
/// other placeholders in the scanner's output — but the non-target pass (step 3)
/// re-reads the graph's remaining placeholder set regardless, so the two passes stay
/// correct even if that assumption is ever relaxed.
pub fn resolve_placeholders(
    graph: &mut InterModuleDependencyGraph,
    oracle: &DependencyOracle,
    artifacts: &ExternalBuildArtifacts,
) -> Result<()> {
    let all_placeholders: Vec<ModuleId> = graph.placeholder_ids().cloned().collect();
    let (target, non_target): (Vec<_>, Vec<_>) = all_placeholders
        .into_iter()
        .partition(|id| artifacts.external_target_module_path_map.contains_key(id));

    for placeholder in target {
        let promised_path = artifacts.external_target_module_path_map[&placeholder].clone();
        resolve_one(graph, oracle, &placeholder, Some(promised_path))?;
    }

    for placeholder in non_target {
        if !graph.contains(&placeholder) {
            continue;
        }
        resolve_one(graph, oracle, &placeholder, None)?;
    }

    if graph.has_placeholders() {
        let remaining = graph.placeholder_ids().next().expect("has_placeholders just returned true");
        return Err(PlanError::UnresolvedPlaceholder(remaining.name.clone()));
    }
    Ok(())
}

/// Resolve one placeholder: locate its external identity in the oracle (preferring
/// `Swift(n)`, falling back to `SwiftPrebuiltExternal(n)`), materialize it as a
/// `SwiftPrebuiltExternal(n)` node in `graph`, and BFS-pull its transitive
/// dependencies in from the oracle.
fn resolve_one(
    graph: &mut InterModuleDependencyGraph,
    oracle: &DependencyOracle,
    placeholder: &ModuleId,
    promised_path: Option<std::path::PathBuf>,
) -> Result<()> {
    let name = placeholder.name.clone();
    let external_id = ModuleId::swift(&name);
    let external_id = if oracle.contains(&external_id) {
        external_id
    } else {
        let prebuilt = ModuleId::swift_prebuilt_external(&name);
        if oracle.contains(&prebuilt) {
            prebuilt
        } else {
            return Err(PlanError::MissingExternalDependency(name));
        }
    };

    let external_info = oracle
        .get_module_info(&external_id)
        .ok_or_else(|| PlanError::MissingExternalDependency(name.clone()))?;

    let compiled_path = promised_path.unwrap_or_else(|| external_info.module_path.clone());
    let resolved_id = ModuleId::swift_prebuilt_external(&name);
    let resolved_info = ModuleInfo {
        module_path: compiled_path.clone(),
        source_files: Vec::new(),
        direct_dependencies: external_info.direct_dependencies.clone(),
        details: crate::info::ModuleDetails::SwiftPrebuiltExternal(SwiftPrebuiltExternalDetails {
            compiled_module_path: compiled_path,
            module_doc_path: None,
            module_source_info_path: None,
            extra_pcm_args: external_info.details.extra_pcm_args().map(<[String]>::to_vec),
        }),
    };
    log::debug!("placeholder: resolving {placeholder} via {external_id}");
    merge_one(graph, resolved_id, resolved_info, MergeContext::WorkingGraph)?;

    bfs_merge_from_oracle(graph, oracle, external_info.direct_dependencies.clone())
}

/// BFS worklist seeded with the resolved module's direct dependencies, visited-set
/// suppressing revisits and worklist duplicates alike (§4.D step 2).
fn bfs_merge_from_oracle(
    graph: &mut InterModuleDependencyGraph,
    oracle: &DependencyOracle,
    seeds: Vec<ModuleId>,
) -> Result<()> {
    let mut visited: HashSet<ModuleId> = HashSet::new();
    let mut worklist: VecDeque<ModuleId> = seeds.into_iter().collect();

    while let Some(id) = worklist.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let info = oracle
            .get_module_info(&id)
            .ok_or_else(|| PlanError::MissingExternalDependency(id.name.clone()))?;
        for dep in &info.direct_dependencies {
            if !visited.contains(dep) {
                worklist.push_back(dep.clone());
            }
        }
        merge_one(graph, id, info, MergeContext::WorkingGraph)?;
    }
    Ok(())
}
