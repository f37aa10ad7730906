//! Mock runner collaborator.
//!
//! A minimal in-process stand-in for the surrounding test runner, used by
//! the lane's own tests and by downstream suites that want to exercise
//! the lane without a full runner. Holds one session result and at most
//! one active test result.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::context::{ContextError, RunnerContext, ScopeResult};
use crate::scope::Scope;

/// Mock result object for one scope.
#[derive(Debug, Clone)]
pub struct MockResult {
    identity: String,
    log_dir: PathBuf,
    success: bool,
}

impl MockResult {
    /// New result, initially successful.
    pub fn new(identity: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            identity: identity.into(),
            log_dir: log_dir.into(),
            success: true,
        }
    }

    /// Set the success flag consulted at purge time.
    pub fn set_success(&mut self, success: bool) {
        self.success = success;
    }
}

impl ScopeResult for MockResult {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn is_success(&self) -> bool {
        self.success
    }
}

/// Mock runner context.
#[derive(Debug)]
pub struct MockRunner {
    session: MockResult,
    test: Option<MockResult>,
}

impl MockRunner {
    /// New runner with a fresh session identity logging under `log_dir`.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let identity = format!("session-{}", Uuid::new_v4());
        Self {
            session: MockResult::new(identity, log_dir),
            test: None,
        }
    }

    /// Begin a test; its artifacts land under `log_dir`.
    pub fn begin_test(&mut self, identity: impl Into<String>, log_dir: impl Into<PathBuf>) {
        self.test = Some(MockResult::new(identity, log_dir));
    }

    /// Drop the active test result.
    pub fn end_test(&mut self) {
        self.test = None;
    }

    /// Flip the active test's success flag; no-op without an active test.
    pub fn set_test_success(&mut self, success: bool) {
        if let Some(test) = self.test.as_mut() {
            test.set_success(success);
        }
    }

    /// Flip the session success flag.
    pub fn set_session_success(&mut self, success: bool) {
        self.session.set_success(success);
    }

    /// The session result.
    pub fn session(&self) -> &MockResult {
        &self.session
    }
}

impl RunnerContext for MockRunner {
    fn result(&self, scope: Scope) -> Result<&dyn ScopeResult, ContextError> {
        match scope {
            Scope::Test => self
                .test
                .as_ref()
                .map(|t| t as &dyn ScopeResult)
                .ok_or(ContextError::NoActiveResult(Scope::Test)),
            Scope::Session => Ok(&self.session),
        }
    }
}
