//! Typed errors surfaced by the planner (spec.md §7).
//!
//! Every variant carries the offending module name (or equivalent) so an outer driver
//! can render a diagnostic without re-parsing a string. Planning never partially
//! returns jobs on failure: every fallible entry point in this crate returns
//! `Result<_, PlanError>` and callers should treat any `Err` as "discard the whole
//! attempt".

use crate::id::ModuleId;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("no module named {0}")]
    MissingModule(String),

    #[error("module {consumer} is malformed: {reason}")]
    MalformedModule { consumer: String, reason: String },

    #[error("module {0} has no extraPcmArgs")]
    MissingPcmArgs(String),

    #[error("cannot resolve external dependency for placeholder {0}")]
    MissingExternalDependency(String),

    #[error("placeholder {0} was never resolved")]
    UnresolvedPlaceholder(String),

    #[error("scanner exited with code {code}: {stderr}")]
    ScannerFailure { code: i32, stderr: String },

    #[error("unexpected module kind at {0}")]
    UnexpectedKind(ModuleId),
}

pub type Result<T> = std::result::Result<T, PlanError>;
