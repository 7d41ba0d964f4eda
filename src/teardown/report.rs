// Outcomes of tearing down a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::StorageError;
use humansize::{
    format_size,
    BINARY,
};
use std::fmt;

/// The step a teardown failed at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TeardownStep {
    /// Looking up the bucket's region.
    ResolveRegion,
    /// Deleting objects, versions and multipart uploads.
    Drain,
    /// Deleting the bucket.
    Delete,
}

impl fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::ResolveRegion => "resolving region",
            Self::Drain         => "emptying bucket",
            Self::Delete        => "deleting bucket",
        };

        f.write_str(step)
    }
}

/// What draining a bucket removed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DrainReport {
    /// Current objects deleted.
    pub objects:  u64,
    /// Object versions and delete markers deleted.
    pub versions: u64,
    /// Multipart uploads aborted.
    pub uploads:  u64,
    /// Bytes held by deleted objects and versions.
    pub bytes:    u64,
}

impl DrainReport {
    /// Check if the bucket was already empty.
    pub fn is_empty(&self) -> bool {
        self.objects == 0 && self.versions == 0 && self.uploads == 0
    }
}

impl fmt::Display for DrainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} objects, {} versions, {} uploads ({})",
            self.objects,
            self.versions,
            self.uploads,
            format_size(self.bytes, BINARY),
        )
    }
}

/// Result of clearing one kind of bucket configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClearOutcome {
    /// The configuration was removed.
    Cleared,
    /// There was no such configuration.
    NotApplicable,
    /// Removing it failed, the failure was ignored.
    FailedIgnored(StorageError),
}

/// Result of removing access points bound to a bucket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessPointOutcome {
    /// Access points were listed; each was either deleted or failed.
    Removed {
        /// Names of deleted access points.
        deleted: Vec<String>,
        /// Access points that couldn't be deleted.
        failed:  Vec<(String, StorageError)>,
    },
    /// The service has no access point capability.
    Unavailable(StorageError),
    /// Listing access points failed.
    Failed(StorageError),
}

/// Everything the dependency cleanup did, in the order it was done.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CleanupReport {
    /// Lifecycle rules.
    pub lifecycle:     ClearOutcome,
    /// CORS rules.
    pub cors:          ClearOutcome,
    /// Static website configuration.
    pub website:       ClearOutcome,
    /// Access points.
    pub access_points: AccessPointOutcome,
}

/// How tearing down a bucket ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TeardownOutcome {
    /// The bucket is gone.
    Deleted {
        /// What was drained from it.
        drained: DrainReport,
        /// The cleanup that was needed before the retried delete, if any.
        cleanup: Option<CleanupReport>,
    },
    /// A step failed and the bucket was left alone from then on.
    Failed {
        /// The step that failed.
        step:  TeardownStep,
        /// Why.
        error: StorageError,
    },
    /// Deletion still failed after cleanup, someone has to look at it in
    /// the console.
    ManualCleanupRequired {
        /// The cleanup that was tried.
        cleanup: CleanupReport,
        /// The error from the retried delete.
        error:   StorageError,
    },
}

/// The result of tearing down one bucket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeardownResult {
    /// Bucket name.
    pub bucket:  String,
    /// How it ended.
    pub outcome: TeardownOutcome,
}

impl TeardownResult {
    /// Returns a result for a teardown that stopped at `step`.
    pub fn failed(bucket: &str, step: TeardownStep, error: StorageError) -> Self {
        Self {
            bucket:  bucket.to_string(),
            outcome: TeardownOutcome::Failed {
                step,
                error,
            },
        }
    }

    /// Check if the bucket was deleted.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, TeardownOutcome::Deleted { .. })
    }

    /// Check if the bucket needs to be removed by hand.
    pub fn requires_manual_cleanup(&self) -> bool {
        matches!(self.outcome, TeardownOutcome::ManualCleanupRequired { .. })
    }
}
