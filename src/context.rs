//! Runner collaborator interfaces.
//!
//! The surrounding test runner implements these traits to expose its
//! per-test and per-session result objects. The lane never reaches into
//! runner internals; everything it needs from a result is the narrow
//! [`ScopeResult`] view.

use std::path::Path;

use thiserror::Error;

use crate::scope::Scope;

/// View of one runner result object (test or session).
pub trait ScopeResult: std::fmt::Debug {
    /// Stable identity string for the owning scope, used in artifact
    /// filenames and as the tracking key.
    fn identity(&self) -> &str;

    /// Directory where artifacts for this result are written.
    fn log_dir(&self) -> &Path;

    /// Whether the result finished without failures.
    ///
    /// Consulted at purge time; under the fail-only retention policy the
    /// answer decides whether an artifact survives.
    fn is_success(&self) -> bool;
}

/// Resolves the active result object for a scope.
pub trait RunnerContext {
    /// The result object `scope` currently maps to.
    ///
    /// Fails when no result is active for the scope, e.g. resolving test
    /// scope outside a running test. Callers treat that as a programming
    /// error and propagate it.
    fn result(&self, scope: Scope) -> Result<&dyn ScopeResult, ContextError>;
}

/// Errors resolving runner state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The scope has no active result object.
    #[error("no active {0} result")]
    NoActiveResult(Scope),
}
