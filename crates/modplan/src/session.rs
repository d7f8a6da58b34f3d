//! Top-level orchestration (spec.md §2 "Data flows"): wires the graph merger (C),
//! placeholder resolver (D), versioned Clang re-scan (E) and job planner (F) into the
//! single pipeline a driver actually calls, one top-level target at a time.
//!
//! Grounded on `orchestrator.rs`'s `BundleOrchestrator`: a small struct owning a
//! config plus whatever cross-target state needs to survive between calls (there,
//! `SemanticBundler`; here, a shared [`DependencyOracle`]), exposing one "do the whole
//! thing for this entry point" method that calls each stage in order and propagates
//! the first error.

use crate::{
    clang_rescan::{compute_path_pcm_args, rescan_and_merge},
    config::PlannerConfig,
    error::Result,
    graph::InterModuleDependencyGraph,
    job::Job,
    merge::{MergeContext, merge_graph_into},
    oracle::DependencyOracle,
    placeholder::{ExternalBuildArtifacts, resolve_placeholders},
    planner::JobPlanner,
    scanner::DependencyScanner,
};

/// Everything a single top-level target's planning run returns: the jobs a driver
/// schedules, plus the fully-resolved working graph (handy for diagnostics or for a
/// caller that wants to inspect what actually got pulled in).
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub graph: InterModuleDependencyGraph,
    pub jobs: Vec<Job>,
}

/// Owns the state that must survive across planning multiple top-level targets: the
/// shared oracle (§4.B) and the config every generated job is built from. Unlike
/// `JobPlanner`, which is single-use per target, a `PlanningSession` is constructed
/// once and reused — its oracle accumulates knowledge as each target resolves.
#[derive(Debug)]
pub struct PlanningSession {
    oracle: DependencyOracle,
    config: PlannerConfig,
}

impl PlanningSession {
    pub fn new(config: PlannerConfig) -> Self {
        Self { oracle: DependencyOracle::new(), config }
    }

    pub fn oracle(&self) -> &DependencyOracle {
        &self.oracle
    }

    /// Plan one top-level target end to end (§2 "Data flows": `A ← scanner JSON → C →
    /// (D, E) → F`):
    ///
    /// 1. Scan `module_name`'s sources, producing the raw graph the scanner hands back
    ///    (may contain `swiftPlaceholder` nodes).
    /// 2. Merge it into a fresh working graph (§4.C), which tolerates placeholders.
    /// 3. Resolve every placeholder against the oracle/`artifacts` (§4.D).
    /// 4. Compute the path-PCM-args set and re-scan every `(Clang module, pcm-args)`
    ///    pair reached, merging the versioned results back in (§4.E).
    /// 5. Fold the now placeholder-free graph into the oracle, so later targets in
    ///    this session can resolve their own placeholders against it (§4.B).
    /// 6. Plan build jobs by DFS from the main module (§4.F).
    pub fn plan_target(
        &mut self,
        scanner: &mut dyn DependencyScanner,
        module_name: &str,
        source_files: &[std::path::PathBuf],
        artifacts: &ExternalBuildArtifacts,
    ) -> Result<PlanResult> {
        log::info!("session: planning target '{module_name}'");
        let raw = scanner.scan_module(module_name, source_files)?;

        let mut working = InterModuleDependencyGraph::new(module_name);
        merge_graph_into(&mut working, &raw, MergeContext::WorkingGraph)?;

        resolve_placeholders(&mut working, &self.oracle, artifacts)?;

        let path_pcm_args = compute_path_pcm_args(&working, module_name)?;
        rescan_and_merge(&mut working, scanner, &path_pcm_args)?;

        self.oracle.merge_in(&working)?;

        let mut planner = JobPlanner::new(self.config.clone());
        let jobs = planner.plan(&working)?;

        Ok(PlanResult { graph: working, jobs })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        id::ModuleId,
        info::{ClangModuleDetails, ModuleDetails, ModuleInfo, SwiftModuleDetails, SwiftPlaceholderDetails},
        scanner::ScriptedScanner,
    };

    fn config() -> PlannerConfig {
        PlannerConfig::new(std::env::temp_dir().join("modplan-session-tests")).with_tool_path("swift-frontend")
    }

    fn swift_info(
        deps: Vec<ModuleId>,
        pcm_args: Vec<&str>,
        interface: Option<&str>,
    ) -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::from("Main.swiftmodule"),
            source_files: vec![],
            direct_dependencies: deps,
            details: ModuleDetails::Swift(SwiftModuleDetails {
                module_interface_path: interface.map(PathBuf::from),
                extra_pcm_args: Some(pcm_args.into_iter().map(str::to_string).collect()),
                ..Default::default()
            }),
        }
    }

    fn clang_info(path: &str, map: &str) -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::from(path),
            source_files: vec![],
            direct_dependencies: vec![],
            details: ModuleDetails::Clang(ClangModuleDetails {
                module_map_path: PathBuf::from(map),
                context_hash: None,
                command_line: None,
            }),
        }
    }

    /// End-to-end: a placeholder gets resolved from a second, already-planned
    /// target's graph merged into the oracle, and the Clang module it drags in still
    /// gets a properly versioned, target-encoded job.
    #[test]
    fn plans_across_two_targets_sharing_a_placeholder_dependency() {
        let mut session = PlanningSession::new(config());

        // First target: "Dep" is scanned and planned on its own, populating the oracle.
        let mut dep_graph = InterModuleDependencyGraph::new("Dep");
        dep_graph.insert(
            ModuleId::swift("Dep"),
            swift_info(vec![ModuleId::clang("CX")], vec!["-target", "t1"], Some("Dep.swiftinterface")),
        );
        dep_graph.insert(ModuleId::clang("CX"), clang_info("CX.pcm", "CX/module.modulemap"));
        let cx_rescan = {
            let mut g = InterModuleDependencyGraph::new("CX");
            g.insert(ModuleId::clang("CX"), clang_info("CX.pcm", "CX/module.modulemap"));
            g
        };
        let mut scanner = ScriptedScanner::new()
            .on_module("Dep", dep_graph)
            .on_clang_module(ModuleId::clang("CX"), vec!["-target".into(), "t1".into()], cx_rescan.clone());
        session
            .plan_target(&mut scanner, "Dep", &[PathBuf::from("Dep.swift")], &ExternalBuildArtifacts::new())
            .unwrap();
        assert!(session.oracle().contains(&ModuleId::swift("Dep")));

        // Second target: "Main" only knows about "Dep" as a placeholder.
        let mut main_graph = InterModuleDependencyGraph::new("Main");
        main_graph.insert(
            ModuleId::swift("Main"),
            swift_info(
                vec![ModuleId::swift_placeholder("Dep")],
                vec!["-target", "t1"],
                Some("Main.swiftinterface"),
            ),
        );
        main_graph.insert(
            ModuleId::swift_placeholder("Dep"),
            ModuleInfo {
                module_path: PathBuf::new(),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::SwiftPlaceholder(SwiftPlaceholderDetails::default()),
            },
        );
        let mut scanner = ScriptedScanner::new()
            .on_module("Main", main_graph)
            .on_clang_module(ModuleId::clang("CX"), vec!["-target".into(), "t1".into()], cx_rescan);
        let result = session
            .plan_target(&mut scanner, "Main", &[PathBuf::from("Main.swift")], &ExternalBuildArtifacts::new())
            .unwrap();

        assert!(!result.graph.has_placeholders());
        assert!(result.graph.contains(&ModuleId::clang("CX")));
        let clang_jobs = result.jobs.iter().filter(|j| j.kind == crate::job::JobKind::GeneratePcm).count();
        assert_eq!(clang_jobs, 1, "CX should get exactly one job, reused from Main's job cache");
    }
}
