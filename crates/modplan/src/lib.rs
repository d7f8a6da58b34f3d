//! Explicit Module Build planner.
//!
//! Given a scanned inter-module dependency graph, resolves every transitive module
//! dependency into an explicitly-built artifact and produces a complete, ordered set
//! of build jobs. Two sub-problems make this non-trivial:
//!
//! - **Placeholder resolution** ([`placeholder`]): the scanner leaves "placeholder"
//!   nodes for modules a higher-level build system promises to build itself; these
//!   get replaced with real module descriptions drawn from a shared [`oracle`].
//! - **Target-versioned PCM expansion** ([`clang_rescan`], [`encode`]): a precompiled
//!   Clang module (PCM) compiled for one target triple cannot be loaded by a module
//!   compiled for another, so every Clang module is materialized once per distinct
//!   PCM-args vector reaching it, and [`planner`] emits one job per such pair.
//!
//! [`session::PlanningSession`] wires the pieces together into the pipeline a driver
//! actually calls: scan, merge into a working graph, resolve placeholders, re-scan
//! Clang modules at each PCM-args vector, then plan jobs.
//!
//! Scheduling or executing the produced [`job::Job`]s, sandboxing, caching PCMs across
//! invocations, and persisting graphs across process boundaries are not this crate's
//! concern — see `DESIGN.md` for the full list of non-goals.

pub mod clang_rescan;
pub mod config;
pub mod encode;
pub mod error;
pub mod graph;
pub mod id;
pub mod info;
pub mod job;
pub mod merge;
pub mod oracle;
pub mod placeholder;
pub mod planner;
pub mod scanner;
pub mod session;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use graph::InterModuleDependencyGraph;
pub use id::{ModuleId, ModuleKind};
pub use info::ModuleInfo;
pub use job::{Job, JobKind};
pub use oracle::DependencyOracle;
pub use placeholder::ExternalBuildArtifacts;
pub use planner::JobPlanner;
pub use scanner::DependencyScanner;
pub use session::{PlanResult, PlanningSession};
