//! The graph merger (spec.md §4.C): combines a freshly scanned graph into the oracle
//! or a working graph, resolving clashes between the four module flavors according to
//! the fixed precedence table in §4.C so that already-resolved information is never
//! regressed.
//!
//! Grounded on `cribo_graph.rs::CriboGraph::add_module`'s "is this the same module
//! under a new name, or a genuine conflict?" precedence logic, generalized from a
//! single file-identity check to the four-way kind precedence the spec requires.

use crate::{
    error::{PlanError, Result},
    graph::InterModuleDependencyGraph,
    id::{ModuleId, ModuleKind},
    info::ModuleInfo,
};

/// Whether a `SwiftPlaceholder` is allowed to land in the target as-is.
///
/// A freshly scanned graph legitimately contains placeholders (§4.C's "intermediate
/// state"); the oracle only ever receives already-placeholder-resolved graphs, so a
/// placeholder reaching it is an invariant violation (§4.D step 4, §8 invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeContext {
    WorkingGraph,
    Oracle,
}

/// Merge every `(id, info)` pair of `incoming` into `target`, in `incoming`'s
/// iteration order (so first-seen order is preserved across repeated merges).
pub fn merge_graph_into(
    target: &mut InterModuleDependencyGraph,
    incoming: &InterModuleDependencyGraph,
    context: MergeContext,
) -> Result<()> {
    for (id, info) in incoming.iter() {
        merge_one(target, id.clone(), info.clone(), context)?;
    }
    Ok(())
}

/// Apply the §4.C precedence table for a single incoming `(id, info)`.
pub fn merge_one(
    target: &mut InterModuleDependencyGraph,
    id: ModuleId,
    info: ModuleInfo,
    context: MergeContext,
) -> Result<()> {
    match id.kind {
        ModuleKind::Swift => merge_swift_like(target, id, info),
        ModuleKind::SwiftPrebuiltExternal => merge_swift_like(target, id, info),
        ModuleKind::Clang => merge_clang(target, id, info),
        ModuleKind::SwiftPlaceholder => merge_placeholder(target, id, info, context),
    }
}

/// `Swift(n)`/`SwiftPrebuiltExternal(n)` share the same replace-or-insert-or-keep
/// logic: both outrank a placeholder, and a `Swift(n)` arriving after either itself
/// or a `SwiftPrebuiltExternal(n)` is already present is a no-op (already-resolved
/// information is never regressed). An incoming `SwiftPrebuiltExternal(n)` always
/// *does* replace an existing `Swift(n)`, since a client-promised prebuilt path is
/// strictly more resolved information than a to-be-built module.
fn merge_swift_like(target: &mut InterModuleDependencyGraph, id: ModuleId, info: ModuleInfo) -> Result<()> {
    let name = id.name.clone();
    let existing_swift = target.contains(&ModuleId::swift(&name));
    let existing_prebuilt = target.contains(&ModuleId::swift_prebuilt_external(&name));
    let existing_placeholder_id = ModuleId::swift_placeholder(&name);
    let existing_placeholder = target.contains(&existing_placeholder_id);

    if id.kind == ModuleKind::Swift && (existing_swift || existing_prebuilt) {
        log::trace!("merge: keeping existing resolved module {name}, dropping incoming {id}");
        return Ok(());
    }

    if existing_placeholder {
        log::debug!("merge: replacing placeholder {existing_placeholder_id} with {id}");
        target.remove(&existing_placeholder_id);
        target.rewrite_edges(&existing_placeholder_id, &id);
        target.insert(id, info);
        return Ok(());
    }

    if id.kind == ModuleKind::SwiftPrebuiltExternal && existing_swift {
        let existing_id = ModuleId::swift(&name);
        log::debug!("merge: replacing {existing_id} with prebuilt {id}");
        target.remove(&existing_id);
        target.rewrite_edges(&existing_id, &id);
        target.insert(id, info);
        return Ok(());
    }

    target.insert(id, info);
    Ok(())
}

/// `Clang(n)` is orthogonal to the Swift-side kinds and simply accumulates: a second
/// scan of the same Clang module unions its `directDependencies` (preserving
/// first-seen order) while keeping the *existing* `commandLine`/`moduleMapPath` —
/// those are assumed stable across re-scans of the same module.
fn merge_clang(target: &mut InterModuleDependencyGraph, id: ModuleId, info: ModuleInfo) -> Result<()> {
    if let Some(existing) = target.get_mut(&id) {
        for dep in info.direct_dependencies {
            if !existing.direct_dependencies.contains(&dep) {
                existing.direct_dependencies.push(dep);
            }
        }
        return Ok(());
    }
    target.insert(id, info);
    Ok(())
}

fn merge_placeholder(
    target: &mut InterModuleDependencyGraph,
    id: ModuleId,
    info: ModuleInfo,
    context: MergeContext,
) -> Result<()> {
    match context {
        MergeContext::WorkingGraph => {
            if !target.contains(&id) {
                target.insert(id, info);
            }
            Ok(())
        }
        MergeContext::Oracle => Err(PlanError::UnexpectedKind(id)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::info::{ModuleDetails, SwiftModuleDetails, SwiftPlaceholderDetails, SwiftPrebuiltExternalDetails};

    fn swift_info() -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::from("X.swiftmodule"),
            source_files: vec![],
            direct_dependencies: vec![],
            details: ModuleDetails::Swift(SwiftModuleDetails::default()),
        }
    }

    fn prebuilt_info(path: &str) -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::from(path),
            source_files: vec![],
            direct_dependencies: vec![],
            details: ModuleDetails::SwiftPrebuiltExternal(SwiftPrebuiltExternalDetails {
                compiled_module_path: PathBuf::from(path),
                module_doc_path: None,
                module_source_info_path: None,
                extra_pcm_args: None,
            }),
        }
    }

    fn placeholder_info() -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::new(),
            source_files: vec![],
            direct_dependencies: vec![],
            details: ModuleDetails::SwiftPlaceholder(SwiftPlaceholderDetails::default()),
        }
    }

    #[test]
    fn swift_arriving_after_prebuilt_external_is_kept_as_existing() {
        let mut target = InterModuleDependencyGraph::new("Main");
        target.insert(ModuleId::swift_prebuilt_external("X"), prebuilt_info("/prebuilt/X.swiftmodule"));

        merge_one(&mut target, ModuleId::swift("X"), swift_info(), MergeContext::WorkingGraph).unwrap();

        assert!(target.contains(&ModuleId::swift_prebuilt_external("X")));
        assert!(!target.contains(&ModuleId::swift("X")));
    }

    #[test]
    fn clang_coexists_alongside_prebuilt_external_of_same_name() {
        let mut target = InterModuleDependencyGraph::new("Main");
        target.insert(ModuleId::swift_prebuilt_external("X"), prebuilt_info("/prebuilt/X.swiftmodule"));

        let clang_info = ModuleInfo {
            module_path: PathBuf::from("X.pcm"),
            source_files: vec![],
            direct_dependencies: vec![],
            details: ModuleDetails::Clang(crate::info::ClangModuleDetails {
                module_map_path: PathBuf::from("module.modulemap"),
                context_hash: None,
                command_line: None,
            }),
        };
        merge_one(&mut target, ModuleId::clang("X"), clang_info, MergeContext::WorkingGraph).unwrap();

        assert!(target.contains(&ModuleId::swift_prebuilt_external("X")));
        assert!(target.contains(&ModuleId::clang("X")));
    }

    #[test]
    fn placeholder_is_replaced_and_edges_rewritten() {
        let mut target = InterModuleDependencyGraph::new("Main");
        let placeholder = ModuleId::swift_placeholder("Dep");
        target.insert(placeholder.clone(), placeholder_info());
        target.insert(
            ModuleId::swift("Main"),
            ModuleInfo {
                module_path: PathBuf::from("Main.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![placeholder.clone()],
                details: ModuleDetails::Swift(SwiftModuleDetails::default()),
            },
        );

        merge_one(&mut target, ModuleId::swift("Dep"), swift_info(), MergeContext::WorkingGraph).unwrap();

        assert!(!target.contains(&placeholder));
        assert!(target.contains(&ModuleId::swift("Dep")));
        assert!(
            target
                .get(&ModuleId::swift("Main"))
                .unwrap()
                .direct_dependencies
                .contains(&ModuleId::swift("Dep"))
        );
    }

    #[test]
    fn placeholder_into_oracle_is_fatal() {
        let mut target = InterModuleDependencyGraph::new("Main");
        let err = merge_one(
            &mut target,
            ModuleId::swift_placeholder("Dep"),
            placeholder_info(),
            MergeContext::Oracle,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::UnexpectedKind(_)));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut target = InterModuleDependencyGraph::new("Main");
        let mut incoming = InterModuleDependencyGraph::new("Main");
        incoming.insert(ModuleId::swift("X"), swift_info());

        merge_graph_into(&mut target, &incoming, MergeContext::WorkingGraph).unwrap();
        let first_pass: Vec<_> = target.iter().map(|(id, _)| id.clone()).collect();
        merge_graph_into(&mut target, &incoming, MergeContext::WorkingGraph).unwrap();
        let second_pass: Vec<_> = target.iter().map(|(id, _)| id.clone()).collect();

        assert_eq!(first_pass, second_pass);
    }
}
