//! The external scanner interface (spec.md §6): the scanner subprocess itself is out
//! of scope for this crate, but the shape of its input/output and the two operations
//! the planner needs from it ("scan a module", "scan one Clang module at a PCM-arg
//! vector") are part of the spec and live here.

use std::path::PathBuf;

use crate::{error::Result, graph::InterModuleDependencyGraph, id::ModuleId};

/// The two scans the planner drives (§4.E "Re-scan step", §5 "the external scanner
/// subprocess is the only blocking operation"). Implementations may be backed by an
/// in-process stub (tests) or a real subprocess (`CommandLineDependencyScanner`
/// below); the planner never assumes which.
pub trait DependencyScanner {
    /// Scan `module_name`'s sources, returning a graph rooted at that module.
    fn scan_module(&mut self, module_name: &str, source_files: &[PathBuf]) -> Result<InterModuleDependencyGraph>;

    /// Scan one Clang module at a specific PCM-args vector, returning a graph
    /// describing `clang_id` and its transitively reachable Clang dependencies
    /// (§4.E "Re-scan step").
    fn scan_clang_module(&mut self, clang_id: &ModuleId, pcm_args: &[String]) -> Result<InterModuleDependencyGraph>;
}

/// Build the frontend command line described in §6: prefix flags, then
/// `-frontend -scan-dependencies`, then common frontend options, then input paths.
pub fn build_scan_command_line(
    prefix_flags: &[String],
    parse_stdlib: bool,
    source_files: &[PathBuf],
) -> Vec<String> {
    let mut args: Vec<String> = prefix_flags.to_vec();
    args.push("-frontend".into());
    args.push("-scan-dependencies".into());
    args.push("-bridging-header-dependency-mode".into());
    args.push("precompiled".into());
    args.push("-dependency-graph-use".into());
    args.push("dependencyScan".into());
    if parse_stdlib {
        args.push("-disable-objc-attr-requires-foundation-module".into());
    }
    for file in source_files {
        args.push(file.to_string_lossy().into_owned());
    }
    args
}

/// Illustrative subprocess-backed scanner. Not wired into any default construction
/// path in this crate — a driver opts in explicitly — since the spec treats the
/// scanner purely as an external collaborator (§1 "Out of scope").
pub struct CommandLineDependencyScanner {
    pub tool_path: PathBuf,
    pub prefix_flags: Vec<String>,
    pub parse_stdlib: bool,
}

impl CommandLineDependencyScanner {
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self { tool_path: tool_path.into(), prefix_flags: Vec::new(), parse_stdlib: false }
    }

    fn run(&self, args: &[String]) -> Result<InterModuleDependencyGraph> {
        use crate::error::PlanError;

        log::debug!("scanner: invoking {:?} {args:?}", self.tool_path);
        let output = std::process::Command::new(&self.tool_path)
            .args(args)
            .output()
            .map_err(|e| PlanError::ScannerFailure { code: -1, stderr: e.to_string() })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(PlanError::ScannerFailure {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| PlanError::ScannerFailure { code: 0, stderr: format!("malformed scanner output: {e}") })
    }
}

impl DependencyScanner for CommandLineDependencyScanner {
    fn scan_module(&mut self, _module_name: &str, source_files: &[PathBuf]) -> Result<InterModuleDependencyGraph> {
        let args = build_scan_command_line(&self.prefix_flags, self.parse_stdlib, source_files);
        self.run(&args)
    }

    fn scan_clang_module(&mut self, clang_id: &ModuleId, pcm_args: &[String]) -> Result<InterModuleDependencyGraph> {
        let mut args = self.prefix_flags.clone();
        args.extend(pcm_args.iter().cloned());
        args.push("-scan-clang-module".into());
        args.push(clang_id.name.clone());
        self.run(&args)
    }
}

/// In-process scanner for tests: each call is answered by a user-supplied closure, so
/// a test can script a scan-per-module / scan-per-(module,pcm-args) sequence without a
/// real subprocess.
pub struct ScriptedScanner {
    #[allow(clippy::type_complexity)]
    module_scans: Vec<(String, InterModuleDependencyGraph)>,
    #[allow(clippy::type_complexity)]
    clang_scans: Vec<((ModuleId, Vec<String>), InterModuleDependencyGraph)>,
}

impl ScriptedScanner {
    pub fn new() -> Self {
        Self { module_scans: Vec::new(), clang_scans: Vec::new() }
    }

    pub fn on_module(mut self, name: impl Into<String>, graph: InterModuleDependencyGraph) -> Self {
        self.module_scans.push((name.into(), graph));
        self
    }

    pub fn on_clang_module(
        mut self,
        id: ModuleId,
        pcm_args: Vec<String>,
        graph: InterModuleDependencyGraph,
    ) -> Self {
        self.clang_scans.push(((id, pcm_args), graph));
        self
    }
}

impl Default for ScriptedScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyScanner for ScriptedScanner {
    fn scan_module(&mut self, module_name: &str, _source_files: &[PathBuf]) -> Result<InterModuleDependencyGraph> {
        self.module_scans
            .iter()
            .find(|(name, _)| name == module_name)
            .map(|(_, graph)| graph.clone())
            .ok_or_else(|| crate::error::PlanError::MissingModule(module_name.to_string()))
    }

    fn scan_clang_module(&mut self, clang_id: &ModuleId, pcm_args: &[String]) -> Result<InterModuleDependencyGraph> {
        self.clang_scans
            .iter()
            .find(|((id, args), _)| id == clang_id && args.as_slice() == pcm_args)
            .map(|(_, graph)| graph.clone())
            .ok_or_else(|| crate::error::PlanError::MissingModule(clang_id.name.clone()))
    }
}
