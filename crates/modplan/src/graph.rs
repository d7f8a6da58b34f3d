//! The graph model (spec.md §4.A): an immutable-by-identity, mutable-by-value
//! representation of modules and their dependency edges.
//!
//! Grounded on `cribo_graph.rs`'s `CriboGraph`, which plays the same "one map per
//! concern, total accessors that fail loudly" role for Python modules; here the key is
//! the compound `ModuleId` the scanner hands us rather than an interned integer, since
//! cross-kind identity (`Clang(n)` coexisting with `Swift(n)`) is load-bearing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::Error as _};

use crate::{
    error::{PlanError, Result},
    id::ModuleId,
    info::{ClangModuleDetails, ModuleInfo, SwiftModuleDetails, SwiftPrebuiltExternalDetails},
};

/// `{ mainModuleName, modules: mapping ModuleId → ModuleInfo }` (§3). Insertion order
/// is preserved so that "first-seen order" requirements downstream (§4.F, §8 invariant
/// 2 and 5) fall out of iteration order rather than needing a separate sequence.
#[derive(Debug, Clone, Default)]
pub struct InterModuleDependencyGraph {
    pub main_module_name: String,
    modules: IndexMap<ModuleId, ModuleInfo>,
}

impl InterModuleDependencyGraph {
    pub fn new(main_module_name: impl Into<String>) -> Self {
        Self { main_module_name: main_module_name.into(), modules: IndexMap::new() }
    }

    pub fn main_module_id(&self) -> ModuleId {
        ModuleId::swift(self.main_module_name.clone())
    }

    pub fn insert(&mut self, id: ModuleId, info: ModuleInfo) {
        self.modules.insert(id, info);
    }

    pub fn remove(&mut self, id: &ModuleId) -> Option<ModuleInfo> {
        self.modules.shift_remove(id)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }

    pub fn get_mut(&mut self, id: &ModuleId) -> Option<&mut ModuleInfo> {
        self.modules.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &ModuleInfo)> {
        self.modules.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// `moduleInfo(of:)` — total accessor, fails `MissingModule` when absent (§4.A).
    pub fn module_info(&self, id: &ModuleId) -> Result<&ModuleInfo> {
        self.modules.get(id).ok_or_else(|| PlanError::MissingModule(id.name.clone()))
    }

    pub fn swift_module_details(&self, id: &ModuleId) -> Result<&SwiftModuleDetails> {
        self.module_info(id)?.details.as_swift().ok_or_else(|| PlanError::MalformedModule {
            consumer: id.name.clone(),
            reason: "no swift details".into(),
        })
    }

    pub fn clang_module_details(&self, id: &ModuleId) -> Result<&ClangModuleDetails> {
        self.module_info(id)?.details.as_clang().ok_or_else(|| PlanError::MalformedModule {
            consumer: id.name.clone(),
            reason: "no clang details".into(),
        })
    }

    pub fn swift_prebuilt_details(&self, id: &ModuleId) -> Result<&SwiftPrebuiltExternalDetails> {
        self.module_info(id)?.details.as_swift_prebuilt_external().ok_or_else(|| {
            PlanError::MalformedModule {
                consumer: id.name.clone(),
                reason: "no swiftPrebuiltExternal details".into(),
            }
        })
    }

    /// `pcmArgs(of:)` — reads `extraPcmArgs` from Swift or SwiftPrebuiltExternal
    /// details; fails `MissingPcmArgs` otherwise (§4.A).
    pub fn pcm_args(&self, id: &ModuleId) -> Result<&[String]> {
        self.module_info(id)?
            .details
            .extra_pcm_args()
            .ok_or_else(|| PlanError::MissingPcmArgs(id.name.clone()))
    }

    /// Rewrite every node's `directDependencies` entry of `original` to `replacement`
    /// (§4.C "edge rewriting"). Placeholder nodes are skipped — they carry no
    /// outgoing edges that matter, since the scanner never populates
    /// `directDependencies` for a `swiftPlaceholder` entry.
    pub fn rewrite_edges(&mut self, original: &ModuleId, replacement: &ModuleId) {
        for info in self.modules.values_mut() {
            for dep in &mut info.direct_dependencies {
                if dep == original {
                    *dep = replacement.clone();
                }
            }
        }
    }

    /// Invariant 1 (§8): no `SwiftPlaceholder` id remains.
    pub fn has_placeholders(&self) -> bool {
        self.modules.keys().any(|id| id.kind == crate::id::ModuleKind::SwiftPlaceholder)
    }

    pub fn placeholder_ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys().filter(|id| id.kind == crate::id::ModuleKind::SwiftPlaceholder)
    }

    /// Debug-only sanity check backing §9's "the dependency DAG is acyclic by
    /// contract from the scanner": builds a throwaway `petgraph` graph over the
    /// current edges and runs `is_cyclic_directed` on it, the same way
    /// `cribo_graph.rs` checks its own module graph before a topological sort. The
    /// planner's own DFS never calls this — its visited-sets are enough to terminate
    /// even on a cyclic input — this is for a driver or test that wants to fail fast
    /// on a scanner that violated its contract rather than silently under-visiting.
    pub fn is_acyclic(&self) -> bool {
        use petgraph::{algo::is_cyclic_directed, graph::DiGraph};

        let mut pg = DiGraph::<(), ()>::with_capacity(self.modules.len(), 0);
        let indices: IndexMap<&ModuleId, _> =
            self.modules.keys().map(|id| (id, pg.add_node(()))).collect();
        for (id, info) in &self.modules {
            let Some(&from) = indices.get(id) else { continue };
            for dep in &info.direct_dependencies {
                if let Some(&to) = indices.get(dep) {
                    pg.add_edge(from, to, ());
                }
            }
        }
        !is_cyclic_directed(&pg)
    }
}

/// Scanner JSON shape (§6): `{mainModuleName, modules: [[id, info], ...]}`. A plain
/// `IndexMap<ModuleId, ModuleInfo>` can't serialize straight to JSON because
/// `ModuleId` encodes to a JSON object, not a string, and JSON object keys must be
/// strings — hence the array-of-pairs shim.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GraphJson {
    main_module_name: String,
    modules: Vec<(ModuleId, ModuleInfo)>,
}

impl Serialize for InterModuleDependencyGraph {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let shim = GraphJson {
            main_module_name: self.main_module_name.clone(),
            modules: self.modules.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };
        shim.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InterModuleDependencyGraph {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let shim = GraphJson::deserialize(deserializer)?;
        let mut modules = IndexMap::with_capacity(shim.modules.len());
        for (id, info) in shim.modules {
            if let Some(tag_mismatch) = kind_tag_mismatch(&id, &info) {
                return Err(D::Error::custom(tag_mismatch));
            }
            modules.insert(id, info);
        }
        Ok(Self { main_module_name: shim.main_module_name, modules })
    }
}

/// Enforced at construction (§4.A): `details`' tag must agree with `id.kind`.
fn kind_tag_mismatch(id: &ModuleId, info: &ModuleInfo) -> Option<String> {
    use crate::{id::ModuleKind, info::ModuleDetails};
    let matches = matches!(
        (id.kind, &info.details),
        (ModuleKind::Swift, ModuleDetails::Swift(_))
            | (ModuleKind::SwiftPlaceholder, ModuleDetails::SwiftPlaceholder(_))
            | (ModuleKind::SwiftPrebuiltExternal, ModuleDetails::SwiftPrebuiltExternal(_))
            | (ModuleKind::Clang, ModuleDetails::Clang(_))
    );
    if matches { None } else { Some(format!("details kind disagrees with id kind for {id}")) }
}
