//! Planner configuration, in the spirit of cribo's `Config` (constructed once,
//! borrowed throughout a planning session — referenced from `bundle_plan/mod.rs` and
//! exercised against `tempfile::TempDir` fixtures in
//! `tests/test_pythonpath_support.rs`).

use std::path::PathBuf;

/// Options that shape a single planning session. Not shared across sessions the way
/// the oracle is — each `PlanningSession` owns its own.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Where per-consumer `-dependencies.json` side-files are written (§6).
    pub temp_dir: PathBuf,
    /// The compiler frontend invoked by every generated `Job` (§6 `toolPath`).
    pub tool_path: PathBuf,
    /// Flags prepended to every generated command line, ahead of the
    /// spec-mandated `-disable-implicit-swift-modules` pair (§4.F step 1).
    pub prefix_flags: Vec<String>,
    /// Whether `resolveExplicitModuleDependencies` appends
    /// `-disable-implicit-swift-modules -Xcc -Xclang -Xcc -fno-implicit-modules`.
    /// Defaults to `true`, matching the spec's described behavior; an outer driver
    /// may turn it off for diagnostic builds.
    pub disable_implicit_modules: bool,
}

impl PlannerConfig {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            tool_path: PathBuf::from("swift-frontend"),
            prefix_flags: Vec::new(),
            disable_implicit_modules: true,
        }
    }

    pub fn with_tool_path(mut self, tool_path: impl Into<PathBuf>) -> Self {
        self.tool_path = tool_path.into();
        self
    }

    pub fn with_prefix_flags(mut self, flags: Vec<String>) -> Self {
        self.prefix_flags = flags;
        self
    }
}
