//! Retention-driven artifact reservation and purge.
//!
//! Reservation lifecycle: `Reserved → { Purged | Retained }`. The
//! transition fires exactly once, when the owning scope's teardown drains
//! the deferred purge queue.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::context::{ContextError, RunnerContext, ScopeResult};
use crate::retention::Retention;
use crate::scope::Scope;

/// Errors from artifact operations.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Scope resolution failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Deleting a tracked artifact failed.
    #[error("failed to remove artifact {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One reserved artifact path, tracked against its owning result.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Absolute path handed to the caller.
    pub path: PathBuf,

    /// When the path was reserved.
    pub reserved_at: DateTime<Utc>,
}

/// Counters describing the manager's tracked state.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStats {
    /// Total reservations made this session.
    pub tracked: usize,

    /// Reservations whose teardown purge has not run yet.
    pub pending: usize,

    /// Timestamp of the earliest reservation, if any.
    pub oldest_reservation: Option<DateTime<Utc>>,
}

/// Tracking key: one result object per (scope, identity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScopeKey {
    scope: Scope,
    identity: String,
}

impl ScopeKey {
    fn for_result(scope: Scope, result: &dyn ScopeResult) -> Self {
        Self {
            scope,
            identity: result.identity().to_string(),
        }
    }
}

/// Retention-policy-driven artifact manager.
///
/// Owns the per-result reservation lists and the per-scope deferred purge
/// queues. The runner calls [`Artifacts::reserve`] before writing a file
/// and [`Artifacts::teardown`] when the scope exits, whether or not the
/// test body failed.
#[derive(Debug)]
pub struct Artifacts {
    retention: Retention,
    reserved: HashMap<ScopeKey, Vec<Reservation>>,
    deferred: HashMap<ScopeKey, Vec<PathBuf>>,
}

impl Artifacts {
    /// New manager with the given retention policy.
    pub fn new(retention: Retention) -> Self {
        Self {
            retention,
            reserved: HashMap::new(),
            deferred: HashMap::new(),
        }
    }

    /// The retention policy this manager was constructed with.
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Reserve the next artifact path for `scope`.
    ///
    /// The returned path is `{identity}_{seq}.{ext}` under the result's
    /// log directory, where `seq` counts previous reservations for the
    /// same result. No file is created; the caller writes the content.
    /// A purge for the path is queued to run at the scope's teardown.
    pub fn reserve(
        &mut self,
        ctx: &dyn RunnerContext,
        ext: &str,
        scope: Scope,
    ) -> Result<PathBuf, ArtifactError> {
        let result = ctx.result(scope)?;
        let key = ScopeKey::for_result(scope, result);

        let list = self.reserved.entry(key.clone()).or_default();
        let filename = format!("{}_{}.{}", result.identity(), list.len(), ext);
        let path = result.log_dir().join(filename);

        list.push(Reservation {
            path: path.clone(),
            reserved_at: Utc::now(),
        });
        self.deferred.entry(key).or_default().push(path.clone());

        tracing::debug!(path = %path.display(), scope = %scope, "reserved artifact");
        Ok(path)
    }

    /// Apply the retention policy to one tracked path.
    ///
    /// Deletes the file unless the policy is `All`, or the policy is
    /// `Fail` and the owning result failed. Paths not tracked for the
    /// scope's result are left alone, as are files already gone from
    /// disk, so the call is idempotent.
    pub fn purge(
        &self,
        ctx: &dyn RunnerContext,
        filename: &Path,
        scope: Scope,
    ) -> Result<(), ArtifactError> {
        let result = ctx.result(scope)?;

        if self.retention == Retention::All {
            return Ok(());
        }
        if self.retention == Retention::Fail && !result.is_success() {
            // Keep artifact on failure
            tracing::debug!(path = %filename.display(), "retained artifact");
            return Ok(());
        }

        let key = ScopeKey::for_result(scope, result);
        let tracked = self
            .reserved
            .get(&key)
            .is_some_and(|list| list.iter().any(|r| r.path.as_path() == filename));
        if !tracked {
            return Ok(());
        }

        match fs::remove_file(filename) {
            Ok(()) => {
                tracing::debug!(path = %filename.display(), "purged artifact");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ArtifactError::Remove {
                path: filename.to_path_buf(),
                source,
            }),
        }
    }

    /// Run the deferred purges queued for `scope`, in registration order.
    ///
    /// The runner calls this exactly once per scope exit; draining the
    /// queue makes each reservation's purge decision fire exactly once.
    /// All queued purges run even if one of them fails; the first error
    /// is reported after the drain.
    pub fn teardown(
        &mut self,
        ctx: &dyn RunnerContext,
        scope: Scope,
    ) -> Result<(), ArtifactError> {
        let result = ctx.result(scope)?;
        let key = ScopeKey::for_result(scope, result);
        let pending = self.deferred.remove(&key).unwrap_or_default();

        let mut first_err = None;
        for path in pending {
            if let Err(e) = self.purge(ctx, &path, scope) {
                tracing::warn!(path = %path.display(), error = %e, "purge failed");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Paths reserved so far for the result `scope` currently resolves to.
    pub fn tracked(
        &self,
        ctx: &dyn RunnerContext,
        scope: Scope,
    ) -> Result<Vec<PathBuf>, ArtifactError> {
        let result = ctx.result(scope)?;
        let key = ScopeKey::for_result(scope, result);
        Ok(self
            .reserved
            .get(&key)
            .map(|list| list.iter().map(|r| r.path.clone()).collect())
            .unwrap_or_default())
    }

    /// Counters over everything reserved this session.
    pub fn stats(&self) -> ArtifactStats {
        ArtifactStats {
            tracked: self.reserved.values().map(Vec::len).sum(),
            pending: self.deferred.values().map(Vec::len).sum(),
            oldest_reservation: self
                .reserved
                .values()
                .flatten()
                .map(|r| r.reserved_at)
                .min(),
        }
    }
}
