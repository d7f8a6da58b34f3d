//! The dependency oracle (spec.md §4.B): a process-wide, keyed store of module
//! information aggregated across scans of multiple top-level targets.
//!
//! Concurrency model follows §5: a single-writer/multiple-reader discipline, backed by
//! `std::sync::RwLock` rather than a hand-rolled lock — the spec calls this "a single
//! logical lock", and `RwLock` is the stdlib primitive that matches that description
//! exactly, the same way the teacher reaches for `std::sync::Arc` in
//! `module_registry.rs` rather than writing its own refcounting.

use std::sync::RwLock;

use crate::{
    error::Result,
    graph::InterModuleDependencyGraph,
    id::ModuleId,
    info::ModuleInfo,
    merge::{MergeContext, merge_graph_into},
};

/// Shared aggregated store of module information across top-level target scans.
#[derive(Debug, Default)]
pub struct DependencyOracle {
    // `main_module_name` on the inner graph is unused: the oracle has no single entry
    // point of its own, it just stores the union of everything merged into it.
    state: RwLock<InterModuleDependencyGraph>,
}

impl DependencyOracle {
    pub fn new() -> Self {
        Self { state: RwLock::new(InterModuleDependencyGraph::new("")) }
    }

    /// Fold a fully-resolved graph into the oracle (§4.B "Merge-in"). The graph must
    /// carry no placeholders — encountering one here is `PlanError::UnexpectedKind`,
    /// per §4.C's note that placeholder insertion is only permitted in intermediate
    /// (pre-resolution) states.
    pub fn merge_in(&self, graph: &InterModuleDependencyGraph) -> Result<()> {
        let mut state = self.state.write().expect("oracle lock poisoned");
        log::debug!("oracle: merging {} modules from '{}'", graph.len(), graph.main_module_name);
        merge_graph_into(&mut state, graph, MergeContext::Oracle)
    }

    pub fn get_module_info(&self, id: &ModuleId) -> Option<ModuleInfo> {
        self.state.read().expect("oracle lock poisoned").get(id).cloned()
    }

    pub fn get_dependencies(&self, id: &ModuleId) -> Option<Vec<ModuleId>> {
        self.state
            .read()
            .expect("oracle lock poisoned")
            .get(id)
            .map(|info| info.direct_dependencies.clone())
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.state.read().expect("oracle lock poisoned").contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.read().expect("oracle lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
