//! Per-module records (spec.md §3): `ModuleInfo`, the `details` tagged union, and the
//! artifact descriptors a Swift build job's side-file is made of.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::id::ModuleId;

/// Record for a single module, as produced by the scanner and mutated in place by the
/// merger (§4.C), placeholder resolver (§4.D) and versioned re-scan (§4.E).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleInfo {
    pub module_path: PathBuf,
    #[serde(default)]
    pub source_files: Vec<PathBuf>,
    #[serde(default)]
    pub direct_dependencies: Vec<ModuleId>,
    pub details: ModuleDetails,
}

/// The tagged union whose tag must agree with the owning `ModuleId.kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModuleDetails {
    #[serde(rename = "swift")]
    Swift(SwiftModuleDetails),
    #[serde(rename = "swiftPlaceholder")]
    SwiftPlaceholder(SwiftPlaceholderDetails),
    #[serde(rename = "swiftPrebuiltExternal")]
    SwiftPrebuiltExternal(SwiftPrebuiltExternalDetails),
    #[serde(rename = "clang")]
    Clang(ClangModuleDetails),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SwiftModuleDetails {
    pub module_interface_path: Option<PathBuf>,
    pub compiled_module_candidates: Option<Vec<PathBuf>>,
    pub explicit_compiled_module_path: Option<PathBuf>,
    pub bridging_header_path: Option<PathBuf>,
    pub bridging_source_files: Option<Vec<PathBuf>>,
    pub command_line: Option<Vec<String>>,
    /// Required for any module that participates in PCM-args computation (§4.E); its
    /// absence is not rejected at decode time (a Swift module that is never reachable
    /// while computing path-PCM-arg sets legitimately has none) but surfaces as
    /// `PlanError::MissingPcmArgs` the moment `pcm_args()` is asked for it.
    pub extra_pcm_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SwiftPlaceholderDetails {
    pub module_doc_path: Option<PathBuf>,
    pub module_source_info_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SwiftPrebuiltExternalDetails {
    pub compiled_module_path: PathBuf,
    pub module_doc_path: Option<PathBuf>,
    pub module_source_info_path: Option<PathBuf>,
    /// See the note on `SwiftModuleDetails::extra_pcm_args`: §4.A requires
    /// `pcmArgs(of:)` to read this field from either Swift-side variant, even though
    /// §3's record layout for `SwiftPrebuiltExternal` does not list it explicitly.
    /// Resolved as an open question in DESIGN.md by carrying it here too.
    pub extra_pcm_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClangModuleDetails {
    pub module_map_path: PathBuf,
    pub context_hash: Option<String>,
    pub command_line: Option<Vec<String>>,
}

/// Side-file content consumed by a Swift build job, one entry per pre-built Swift
/// module dependency (direct or transitive — §4.F flattens the DAG for each consumer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftModuleArtifactInfo {
    pub module_name: String,
    pub module_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_info_path: Option<PathBuf>,
}

/// Passed on the consuming job's command line rather than serialized to a side-file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangModuleArtifactInfo {
    pub module_name: String,
    pub module_path: PathBuf,
    pub module_map_path: PathBuf,
}

impl ModuleDetails {
    pub fn as_swift(&self) -> Option<&SwiftModuleDetails> {
        match self {
            ModuleDetails::Swift(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_clang(&self) -> Option<&ClangModuleDetails> {
        match self {
            ModuleDetails::Clang(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_swift_prebuilt_external(&self) -> Option<&SwiftPrebuiltExternalDetails> {
        match self {
            ModuleDetails::SwiftPrebuiltExternal(d) => Some(d),
            _ => None,
        }
    }

    /// `extraPcmArgs`, read from whichever Swift-side variant this is (§4.A). `None`
    /// for `SwiftPlaceholder`/`Clang`, which never carry PCM args.
    pub fn extra_pcm_args(&self) -> Option<&[String]> {
        match self {
            ModuleDetails::Swift(d) => d.extra_pcm_args.as_deref(),
            ModuleDetails::SwiftPrebuiltExternal(d) => d.extra_pcm_args.as_deref(),
            ModuleDetails::SwiftPlaceholder(_) | ModuleDetails::Clang(_) => None,
        }
    }
}
