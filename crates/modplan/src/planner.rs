//! The job planner (spec.md §4.F): DFS from the main module, ensuring a build job
//! exists for every Swift module (one job each) and every distinct `(Clang module,
//! PCM-args)` pair reached, flattening each consumer's transitive dependencies into a
//! flat side-file plus command-line flags.
//!
//! Grounded on `bundle_plan/mod.rs`'s job-emission pass over a resolved module graph —
//! same "walk the graph once, cache a job per key, assemble a command line as you go"
//! shape, generalized from a single Python emit kind to the Swift/Clang dispatch below.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    config::PlannerConfig,
    error::{PlanError, Result},
    graph::InterModuleDependencyGraph,
    id::{ModuleId, ModuleKind},
    info::{ClangModuleArtifactInfo, SwiftModuleArtifactInfo},
    job::{FileType, Job, JobFile, JobKind},
};

/// The command-line flags and input edges `resolveExplicitModuleDependencies`
/// assembles for one consumer (§4.F). Not a `Job` itself — the caller (for the main
/// module) or `gen_swift_module_build_job`/`gen_clang_module_build_job` (for every
/// other consumer) fold this into the job they're building.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDependencies {
    pub command_line: Vec<String>,
    pub inputs: Vec<JobFile>,
}

/// Owns the two job caches (§4.F) for one planning session. A `JobPlanner` is
/// single-use: construct one per top-level target, call `plan`, take the jobs.
#[derive(Debug)]
pub struct JobPlanner {
    config: PlannerConfig,
    swift_jobs: IndexMap<ModuleId, Job>,
    clang_jobs: IndexMap<(ModuleId, Vec<String>), Job>,
}

impl JobPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, swift_jobs: IndexMap::new(), clang_jobs: IndexMap::new() }
    }

    /// Plan the whole graph: ensure the main module's own job exists (which, via
    /// `genSwiftModuleBuildJob`'s recursive structure, transitively ensures every
    /// reachable Swift/Clang job exists too), then return every job produced. Emission
    /// order is unspecified (§5); callers must treat the result as a set plus the
    /// input/output edges already recorded on each job.
    pub fn plan(&mut self, graph: &InterModuleDependencyGraph) -> Result<Vec<Job>> {
        let main_id = graph.main_module_id();
        if !self.swift_jobs.contains_key(&main_id) {
            let job = self.gen_swift_module_build_job(graph, &main_id)?;
            self.swift_jobs.insert(main_id, job);
        }
        Ok(self.swift_jobs.values().cloned().chain(self.clang_jobs.values().cloned()).collect())
    }

    /// `resolveMainModuleDependencies` (§4.F "Entry"): computes the main module's own
    /// `extraPcmArgs` and resolves its dependencies, without wrapping the result in a
    /// `Job` — that's left to whichever caller owns the main module's own compile
    /// invocation (here, `plan`, via `gen_swift_module_build_job`).
    pub fn resolve_main_module_dependencies(&mut self, graph: &InterModuleDependencyGraph) -> Result<ResolvedDependencies> {
        let main_id = graph.main_module_id();
        let pcm_args = graph.pcm_args(&main_id)?.to_vec();
        self.resolve_explicit_module_dependencies(graph, &main_id, &pcm_args)
    }

    pub fn swift_job(&self, id: &ModuleId) -> Option<&Job> {
        self.swift_jobs.get(id)
    }

    pub fn clang_job(&self, id: &ModuleId, pcm_args: &[String]) -> Option<&Job> {
        self.clang_jobs.get(&(id.clone(), pcm_args.to_vec()))
    }

    /// `resolveExplicitModuleDependencies(id, pcmArgs)` (§4.F steps 1–5).
    fn resolve_explicit_module_dependencies(
        &mut self,
        graph: &InterModuleDependencyGraph,
        id: &ModuleId,
        pcm_args: &[String],
    ) -> Result<ResolvedDependencies> {
        let mut command_line = self.config.prefix_flags.clone();
        if self.config.disable_implicit_modules {
            command_line.push("-disable-implicit-swift-modules".into());
            command_line.extend(["-Xcc", "-Xclang", "-Xcc", "-fno-implicit-modules"].map(String::from));
        }

        let mut swift_artifacts = Vec::new();
        let mut clang_artifacts = Vec::new();
        let mut visited = HashSet::new();
        self.add_module_dependencies(graph, id, pcm_args, &mut swift_artifacts, &mut clang_artifacts, &mut visited)?;

        let mut inputs = Vec::new();

        if !swift_artifacts.is_empty() {
            let json = serde_json::to_string_pretty(&swift_artifacts)
                .expect("SwiftModuleArtifactInfo always serializes to JSON");
            let file_path = self.config.temp_dir.join(format!("{}-dependencies.json", id.name));
            std::fs::create_dir_all(&self.config.temp_dir).map_err(|e| PlanError::MalformedModule {
                consumer: id.name.clone(),
                reason: format!("could not create temp dir {}: {e}", self.config.temp_dir.display()),
            })?;
            std::fs::write(&file_path, json).map_err(|e| PlanError::MalformedModule {
                consumer: id.name.clone(),
                reason: format!("failed to write artifact side-file {}: {e}", file_path.display()),
            })?;

            command_line.push("-explicit-swift-module-map-file".into());
            command_line.push(file_path.to_string_lossy().into_owned());
            inputs.push(JobFile::new(file_path, FileType::JsonSwiftArtifacts));
            for artifact in &swift_artifacts {
                inputs.push(JobFile::new(artifact.module_path.clone(), FileType::SwiftModule));
            }
        }

        for artifact in &clang_artifacts {
            command_line.push("-Xcc".into());
            command_line.push("-Xclang".into());
            command_line.push("-Xcc".into());
            command_line.push(format!("-fmodule-file={}", artifact.module_path.display()));
            command_line.push("-Xcc".into());
            command_line.push("-Xclang".into());
            command_line.push("-Xcc".into());
            command_line.push(format!("-fmodule-map-file={}", artifact.module_map_path.display()));
            inputs.push(JobFile::new(artifact.module_path.clone(), FileType::Pcm));
            inputs.push(JobFile::new(artifact.module_map_path.clone(), FileType::ClangModuleMap));
        }

        Ok(ResolvedDependencies { command_line, inputs })
    }

    /// `addModuleDependencies(id, pcmArgs, …)` (§4.F step 3): walk every direct
    /// dependency of `id`, dispatching each to the Swift or Clang path, then
    /// recursing — with the *same* `pcmArgs` and accumulators — so the whole
    /// transitive closure collapses into one flat artifact list for `id`'s own job.
    fn add_module_dependencies(
        &mut self,
        graph: &InterModuleDependencyGraph,
        id: &ModuleId,
        pcm_args: &[String],
        swift_artifacts: &mut Vec<SwiftModuleArtifactInfo>,
        clang_artifacts: &mut Vec<ClangModuleArtifactInfo>,
        visited: &mut HashSet<ModuleId>,
    ) -> Result<()> {
        let deps = graph.module_info(id)?.direct_dependencies.clone();
        for dep in deps {
            if !visited.insert(dep.clone()) {
                continue;
            }
            match dep.kind {
                ModuleKind::Swift | ModuleKind::SwiftPrebuiltExternal => {
                    self.dispatch_swift(graph, &dep, swift_artifacts)?;
                }
                ModuleKind::Clang => {
                    self.dispatch_clang(graph, &dep, pcm_args, clang_artifacts)?;
                }
                ModuleKind::SwiftPlaceholder => return Err(PlanError::UnexpectedKind(dep)),
            }
            self.add_module_dependencies(graph, &dep, pcm_args, swift_artifacts, clang_artifacts, visited)?;
        }
        Ok(())
    }

    /// **Swift path** (§4.F): a pre-built module (`SwiftPrebuiltExternal`, or `Swift`
    /// with an `explicitCompiledModulePath`) contributes an artifact without a job; any
    /// other `Swift` module gets a cached `EmitModule` job via
    /// `gen_swift_module_build_job`.
    fn dispatch_swift(
        &mut self,
        graph: &InterModuleDependencyGraph,
        dep: &ModuleId,
        swift_artifacts: &mut Vec<SwiftModuleArtifactInfo>,
    ) -> Result<()> {
        match dep.kind {
            ModuleKind::SwiftPrebuiltExternal => {
                let details = graph.swift_prebuilt_details(dep)?;
                let doc_path = details.module_doc_path.clone();
                let source_info_path = details.module_source_info_path.clone();
                let module_path = details.compiled_module_path.clone();
                swift_artifacts.push(SwiftModuleArtifactInfo {
                    module_name: dep.name.clone(),
                    module_path,
                    doc_path,
                    source_info_path,
                });
            }
            ModuleKind::Swift => {
                let details = graph.swift_module_details(dep)?;
                let explicit_path = details.explicit_compiled_module_path.clone();
                if explicit_path.is_none() && !self.swift_jobs.contains_key(dep) {
                    let job = self.gen_swift_module_build_job(graph, dep)?;
                    self.swift_jobs.insert(dep.clone(), job);
                }
                let module_path = match explicit_path {
                    Some(path) => path,
                    None => graph.module_info(dep)?.module_path.clone(),
                };
                swift_artifacts.push(SwiftModuleArtifactInfo {
                    module_name: dep.name.clone(),
                    module_path,
                    doc_path: None,
                    source_info_path: None,
                });
            }
            _ => unreachable!("dispatch_swift is only called for Swift-like ids"),
        }
        Ok(())
    }

    /// **Clang path** (§4.F): a `GeneratePcm` job cached under `(dep, pcmArgs)`, with
    /// the artifact's `modulePath` carrying the target-encoded PCM path for exactly
    /// this PCM-args vector (§4.G).
    fn dispatch_clang(
        &mut self,
        graph: &InterModuleDependencyGraph,
        dep: &ModuleId,
        pcm_args: &[String],
        clang_artifacts: &mut Vec<ClangModuleArtifactInfo>,
    ) -> Result<()> {
        let key = (dep.clone(), pcm_args.to_vec());
        if !self.clang_jobs.contains_key(&key) {
            let job = self.gen_clang_module_build_job(graph, dep, pcm_args)?;
            self.clang_jobs.insert(key, job);
        }
        let details = graph.clang_module_details(dep)?;
        let module_map_path = details.module_map_path.clone();
        let encoded_path = crate::encode::encode(&graph.module_info(dep)?.module_path, pcm_args);
        clang_artifacts.push(ClangModuleArtifactInfo {
            module_name: dep.name.clone(),
            module_path: encoded_path,
            module_map_path,
        });
        Ok(())
    }

    /// `genSwiftModuleBuildJob(id)` (§4.F).
    fn gen_swift_module_build_job(&mut self, graph: &InterModuleDependencyGraph, id: &ModuleId) -> Result<Job> {
        let details = graph.swift_module_details(id)?.clone();
        let mut command_line = details.command_line.clone().unwrap_or_default();

        let pcm_args = graph.pcm_args(id)?.to_vec();
        let resolved = self.resolve_explicit_module_dependencies(graph, id, &pcm_args)?;
        command_line.extend(resolved.command_line);
        let mut inputs = resolved.inputs;

        let interface_path = details.module_interface_path.clone().ok_or_else(|| PlanError::MalformedModule {
            consumer: id.name.clone(),
            reason: "no moduleInterfacePath".into(),
        })?;
        inputs.push(JobFile::new(interface_path, FileType::SwiftInterface));

        if let Some(candidates) = &details.compiled_module_candidates {
            for candidate in candidates {
                command_line.push("-candidate-module-file".into());
                command_line.push(candidate.to_string_lossy().into_owned());
                inputs.push(JobFile::new(candidate.clone(), FileType::SwiftModule));
            }
        }

        let module_path = graph.module_info(id)?.module_path.clone();
        log::debug!("planner: emitting Swift job for {id}");
        Ok(Job {
            module_name: id.name.clone(),
            kind: JobKind::EmitModule,
            tool_path: self.config.tool_path.clone(),
            command_line,
            inputs,
            outputs: vec![JobFile::new(module_path, FileType::SwiftModule)],
        })
    }

    /// `genClangModuleBuildJob(id, pcmArgs)` (§4.F).
    fn gen_clang_module_build_job(
        &mut self,
        graph: &InterModuleDependencyGraph,
        id: &ModuleId,
        pcm_args: &[String],
    ) -> Result<Job> {
        let details = graph.clang_module_details(id)?.clone();
        let mut command_line = details.command_line.clone().unwrap_or_default();
        command_line.extend(pcm_args.iter().cloned());

        let resolved = self.resolve_explicit_module_dependencies(graph, id, pcm_args)?;
        command_line.extend(resolved.command_line);
        let mut inputs = resolved.inputs;

        let out_path = crate::encode::encode(&graph.module_info(id)?.module_path, pcm_args);
        command_line.push("-emit-pcm".into());
        command_line.push("-module-name".into());
        command_line.push(id.name.clone());
        command_line.push("-o".into());
        command_line.push(out_path.to_string_lossy().into_owned());

        inputs.push(JobFile::new(details.module_map_path.clone(), FileType::ClangModuleMap));

        log::debug!("planner: emitting Clang job for {id} at {pcm_args:?}");
        Ok(Job {
            module_name: id.name.clone(),
            kind: JobKind::GeneratePcm,
            tool_path: self.config.tool_path.clone(),
            command_line,
            inputs,
            outputs: vec![JobFile::new(out_path, FileType::Pcm)],
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::info::{ClangModuleDetails, ModuleDetails, ModuleInfo, SwiftModuleDetails};

    fn config() -> PlannerConfig {
        PlannerConfig::new(std::env::temp_dir().join("modplan-tests")).with_tool_path("swift-frontend")
    }

    fn swift_main(deps: Vec<ModuleId>, pcm_args: Vec<&str>) -> ModuleInfo {
        ModuleInfo {
            module_path: PathBuf::from("Main.swiftmodule"),
            source_files: vec![PathBuf::from("Main.swift")],
            direct_dependencies: deps,
            details: ModuleDetails::Swift(SwiftModuleDetails {
                module_interface_path: Some(PathBuf::from("Main.swiftinterface")),
                extra_pcm_args: Some(pcm_args.into_iter().map(str::to_string).collect()),
                ..Default::default()
            }),
        }
    }

    fn clang(path: &str, map: &str) -> ModuleInfo {
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

    /// S1 — leaf Clang module, single target.
    #[test]
    fn leaf_clang_module_single_target() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(ModuleId::swift("Main"), swift_main(vec![ModuleId::clang("CA")], vec!["-target", "t1"]));
        graph.insert(ModuleId::clang("CA"), clang("CA.pcm", "CA/module.modulemap"));

        let mut planner = JobPlanner::new(config());
        let jobs = planner.plan(&graph).unwrap();

        assert_eq!(jobs.len(), 2);
        let clang_job = planner.clang_job(&ModuleId::clang("CA"), &["-target".into(), "t1".into()]).unwrap();
        assert_eq!(clang_job.kind, JobKind::GeneratePcm);
        let expected_output = crate::encode::encode(&PathBuf::from("CA.pcm"), &["-target".into(), "t1".into()]);
        assert_eq!(clang_job.outputs[0].path, expected_output);
    }

    /// S2 — two targets share a Clang module: two distinct jobs.
    #[test]
    fn shared_clang_module_across_two_targets_produces_two_jobs() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(
            ModuleId::swift("Main"),
            swift_main(vec![ModuleId::clang("CC"), ModuleId::swift("B")], vec!["-target", "t1"]),
        );
        graph.insert(ModuleId::clang("CC"), clang("CC.pcm", "CC/module.modulemap"));
        graph.insert(
            ModuleId::swift("B"),
            ModuleInfo {
                module_path: PathBuf::from("B.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![ModuleId::clang("CC")],
                details: ModuleDetails::Swift(SwiftModuleDetails {
                    module_interface_path: Some(PathBuf::from("B.swiftinterface")),
                    extra_pcm_args: Some(vec!["-target".into(), "t2".into()]),
                    ..Default::default()
                }),
            },
        );

        let mut planner = JobPlanner::new(config());
        planner.plan(&graph).unwrap();

        let job_t1 = planner.clang_job(&ModuleId::clang("CC"), &["-target".into(), "t1".into()]).unwrap();
        let job_t2 = planner.clang_job(&ModuleId::clang("CC"), &["-target".into(), "t2".into()]).unwrap();
        assert_ne!(job_t1.outputs[0].path, job_t2.outputs[0].path);
    }

    /// S4 — diamond dependency: one Clang job, listed exactly once in Main's artifacts.
    #[test]
    fn diamond_dependency_produces_one_clang_job() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(
            ModuleId::swift("Main"),
            swift_main(vec![ModuleId::swift("A"), ModuleId::swift("B")], vec!["-target", "t1"]),
        );
        for name in ["A", "B"] {
            graph.insert(
                ModuleId::swift(name),
                ModuleInfo {
                    module_path: PathBuf::from(format!("{name}.swiftmodule")),
                    source_files: vec![],
                    direct_dependencies: vec![ModuleId::clang("C1")],
                    details: ModuleDetails::Swift(SwiftModuleDetails {
                        module_interface_path: Some(PathBuf::from(format!("{name}.swiftinterface"))),
                        extra_pcm_args: Some(vec!["-target".into(), "t1".into()]),
                        ..Default::default()
                    }),
                },
            );
        }
        graph.insert(ModuleId::clang("C1"), clang("C1.pcm", "C1/module.modulemap"));

        let mut planner = JobPlanner::new(config());
        let jobs = planner.plan(&graph).unwrap();

        let clang_jobs = jobs.iter().filter(|j| j.kind == JobKind::GeneratePcm).count();
        assert_eq!(clang_jobs, 1);

        let main_job = planner.swift_job(&ModuleId::swift("Main")).unwrap();
        let occurrences =
            main_job.command_line.iter().filter(|flag| flag.starts_with("-fmodule-file=") && flag.contains("C1")).count();
        assert_eq!(occurrences, 1);
    }

    /// S5 — missing moduleInterfacePath is fatal.
    #[test]
    fn missing_module_interface_path_is_malformed() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(ModuleId::swift("Main"), swift_main(vec![ModuleId::swift("Lib")], vec!["-target", "t1"]));
        graph.insert(
            ModuleId::swift("Lib"),
            ModuleInfo {
                module_path: PathBuf::from("Lib.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::Swift(SwiftModuleDetails {
                    module_interface_path: None,
                    extra_pcm_args: Some(vec!["-target".into(), "t1".into()]),
                    ..Default::default()
                }),
            },
        );

        let mut planner = JobPlanner::new(config());
        let err = planner.plan(&graph).unwrap_err();
        assert!(matches!(err, PlanError::MalformedModule { consumer, .. } if consumer == "Lib"));
    }

    /// Invariant 5: the module-map flag and its JSON input appear exactly once.
    #[test]
    fn explicit_module_map_flag_and_input_appear_exactly_once() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(
            ModuleId::swift("Main"),
            swift_main(vec![ModuleId::swift("Lib")], vec!["-target", "t1"]),
        );
        graph.insert(
            ModuleId::swift("Lib"),
            ModuleInfo {
                module_path: PathBuf::from("Lib.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::Swift(SwiftModuleDetails {
                    module_interface_path: Some(PathBuf::from("Lib.swiftinterface")),
                    extra_pcm_args: Some(vec!["-target".into(), "t1".into()]),
                    ..Default::default()
                }),
            },
        );

        let mut planner = JobPlanner::new(config());
        planner.plan(&graph).unwrap();

        let main_job = planner.swift_job(&ModuleId::swift("Main")).unwrap();
        let flag_count =
            main_job.command_line.iter().filter(|f| f.as_str() == "-explicit-swift-module-map-file").count();
        assert_eq!(flag_count, 1);
        let json_input_count =
            main_job.inputs.iter().filter(|i| i.file_type == FileType::JsonSwiftArtifacts).count();
        assert_eq!(json_input_count, 1);
    }

    /// S6 — merger precedence (re-verified here at the planner boundary): a
    /// `SwiftPrebuiltExternal` dependency contributes an artifact but no job.
    #[test]
    fn prebuilt_external_dependency_contributes_no_job() {
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(
            ModuleId::swift("Main"),
            swift_main(vec![ModuleId::swift_prebuilt_external("X")], vec!["-target", "t1"]),
        );
        graph.insert(
            ModuleId::swift_prebuilt_external("X"),
            ModuleInfo {
                module_path: PathBuf::from("/prebuilt/X.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::SwiftPrebuiltExternal(crate::info::SwiftPrebuiltExternalDetails {
                    compiled_module_path: PathBuf::from("/prebuilt/X.swiftmodule"),
                    module_doc_path: None,
                    module_source_info_path: None,
                    extra_pcm_args: None,
                }),
            },
        );

        let mut planner = JobPlanner::new(config());
        let jobs = planner.plan(&graph).unwrap();

        assert_eq!(jobs.len(), 1, "only Main's own job should exist");
        assert!(planner.swift_job(&ModuleId::swift_prebuilt_external("X")).is_none());
    }

    /// §4.F "Swift path": when a prebuilt module's logical `modulePath` and its
    /// `compiledModulePath` differ, the artifact side-file must point at the compiled
    /// path, not the logical one.
    #[test]
    fn prebuilt_external_artifact_uses_compiled_module_path_not_logical_path() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = PlannerConfig::new(temp.path()).with_tool_path("swift-frontend");
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(
            ModuleId::swift("Main"),
            swift_main(vec![ModuleId::swift_prebuilt_external("X")], vec!["-target", "t1"]),
        );
        graph.insert(
            ModuleId::swift_prebuilt_external("X"),
            ModuleInfo {
                module_path: PathBuf::from("/logical/X.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::SwiftPrebuiltExternal(crate::info::SwiftPrebuiltExternalDetails {
                    compiled_module_path: PathBuf::from("/actual/build/output/X.swiftmodule"),
                    module_doc_path: None,
                    module_source_info_path: None,
                    extra_pcm_args: None,
                }),
            },
        );

        let mut planner = JobPlanner::new(cfg.clone());
        planner.plan(&graph).unwrap();

        let side_file = std::fs::read_to_string(cfg.temp_dir.join("Main-dependencies.json")).unwrap();
        let artifacts: Vec<crate::info::SwiftModuleArtifactInfo> = serde_json::from_str(&side_file).unwrap();
        let x = artifacts.iter().find(|a| a.module_name == "X").unwrap();
        assert_eq!(x.module_path, PathBuf::from("/actual/build/output/X.swiftmodule"));
    }

    /// §4.F "Swift path": a non-prebuilt `Swift` module whose `explicitCompiledModulePath`
    /// is set contributes no job, and its artifact path is the explicit compiled path
    /// rather than its logical `modulePath`.
    #[test]
    fn swift_with_explicit_compiled_module_path_uses_that_path_and_no_job() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = PlannerConfig::new(temp.path()).with_tool_path("swift-frontend");
        let mut graph = InterModuleDependencyGraph::new("Main");
        graph.insert(ModuleId::swift("Main"), swift_main(vec![ModuleId::swift("Lib")], vec!["-target", "t1"]));
        graph.insert(
            ModuleId::swift("Lib"),
            ModuleInfo {
                module_path: PathBuf::from("/logical/Lib.swiftmodule"),
                source_files: vec![],
                direct_dependencies: vec![],
                details: ModuleDetails::Swift(SwiftModuleDetails {
                    explicit_compiled_module_path: Some(PathBuf::from("/explicit/Lib.swiftmodule")),
                    extra_pcm_args: Some(vec!["-target".into(), "t1".into()]),
                    ..Default::default()
                }),
            },
        );

        let mut planner = JobPlanner::new(cfg.clone());
        planner.plan(&graph).unwrap();

        assert!(planner.swift_job(&ModuleId::swift("Lib")).is_none(), "explicit compiled module needs no job");
        let side_file = std::fs::read_to_string(cfg.temp_dir.join("Main-dependencies.json")).unwrap();
        let artifacts: Vec<crate::info::SwiftModuleArtifactInfo> = serde_json::from_str(&side_file).unwrap();
        let lib = artifacts.iter().find(|a| a.module_name == "Lib").unwrap();
        assert_eq!(lib.module_path, PathBuf::from("/explicit/Lib.swiftmodule"));
    }
}
