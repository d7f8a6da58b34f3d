//! Build job records produced by the planner (spec.md §6).
//!
//! Jobs, once produced, are immutable values (§3 "Lifecycle"); the planner never
//! mutates a cached job after emission, only reuses it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What kind of compiler invocation a job represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    EmitModule,
    GeneratePcm,
    /// Retained for API completeness per the open question in §9/DESIGN.md — this
    /// planner always scans synchronously in-process and never itself emits a
    /// `ScanDependencies` job, but a driver built on the other design point could
    /// still construct one.
    ScanDependencies,
}

/// File-type tag for a job's inputs/outputs (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Swift,
    SwiftInterface,
    SwiftModule,
    Pcm,
    ClangModuleMap,
    JsonSwiftArtifacts,
    JsonDependencies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    pub path: PathBuf,
    pub file_type: FileType,
}

impl JobFile {
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self { path: path.into(), file_type }
    }
}

/// `{moduleName, kind, toolPath, commandLine[], inputs[], outputs[]}` (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub module_name: String,
    pub kind: JobKind,
    pub tool_path: PathBuf,
    pub command_line: Vec<String>,
    pub inputs: Vec<JobFile>,
    pub outputs: Vec<JobFile>,
}
