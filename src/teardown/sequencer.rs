// Tears a single bucket down, step by step
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::{
    Cursor,
    StorageError,
    StorageService,
};
use super::report::{
    AccessPointOutcome,
    CleanupReport,
    ClearOutcome,
    DrainReport,
    TeardownOutcome,
    TeardownResult,
    TeardownStep,
};
use tracing::{
    debug,
    error,
    info,
    warn,
};

// Deleting something that's already gone counts as done.
fn tolerate_missing(result: Result<(), StorageError>) -> Result<(), StorageError> {
    match result {
        Err(err) if err.is_not_found() => {
            debug!("Already gone: {}", err);

            Ok(())
        },
        other => other,
    }
}

/// Delete every object, object version and multipart upload in `bucket`.
///
/// The first failed delete or abort stops the drain and is returned.
pub async fn drain<S: StorageService>(
    service: &S,
    bucket:  &str,
) -> Result<DrainReport, StorageError> {
    let mut report = DrainReport::default();

    // Current objects
    let mut cursor: Option<Cursor> = None;

    loop {
        let page = service.list_objects(bucket, cursor).await?;

        for object in &page.items {
            tolerate_missing(service.delete_object(bucket, object).await)?;

            report.objects += 1;
            report.bytes   += object.size;
        }

        match page.next {
            Some(next) => cursor = Some(next),
            None       => break,
        }
    }

    debug!("drain: '{}' deleted {} objects", bucket, report.objects);

    // Non-current versions and delete markers
    let mut cursor: Option<Cursor> = None;

    loop {
        let page = service.list_object_versions(bucket, cursor).await?;

        for version in &page.items {
            tolerate_missing(service.delete_object(bucket, version).await)?;

            report.versions += 1;
            report.bytes    += version.size;
        }

        match page.next {
            Some(next) => cursor = Some(next),
            None       => break,
        }
    }

    debug!("drain: '{}' deleted {} versions", bucket, report.versions);

    // In-progress multipart uploads
    let mut cursor: Option<Cursor> = None;

    loop {
        let page = service.list_multipart_uploads(bucket, cursor).await?;

        for upload in &page.items {
            tolerate_missing(service.abort_multipart_upload(bucket, upload).await)?;

            report.uploads += 1;
        }

        match page.next {
            Some(next) => cursor = Some(next),
            None       => break,
        }
    }

    debug!("drain: '{}' aborted {} uploads", bucket, report.uploads);

    Ok(report)
}

// Turn the result of a configuration delete into a `ClearOutcome`.
fn clear_outcome(
    bucket: &str,
    kind:   &str,
    result: Result<(), StorageError>,
) -> ClearOutcome {
    match result {
        Ok(()) => {
            info!("Cleared {} for '{}'", kind, bucket);

            ClearOutcome::Cleared
        },
        Err(err) if err.is_not_found() => {
            debug!("No {} configured for '{}'", kind, bucket);

            ClearOutcome::NotApplicable
        },
        Err(err) => {
            warn!("Ignoring failure to clear {} for '{}': {}", kind, bucket, err);

            ClearOutcome::FailedIgnored(err)
        },
    }
}

/// Remove every access point bound to `bucket`, if the service can.
pub async fn remove_access_points<S: StorageService>(
    service: &S,
    bucket:  &str,
) -> AccessPointOutcome {
    let names = match service.list_access_points(bucket).await {
        Ok(names) => names,
        Err(err) if err.is_unsupported() => {
            info!("Access point API not available, skipping: {}", err);

            return AccessPointOutcome::Unavailable(err);
        },
        Err(err) => {
            warn!("Could not list access points for '{}': {}", bucket, err);

            return AccessPointOutcome::Failed(err);
        },
    };

    let mut deleted = Vec::new();
    let mut failed  = Vec::new();

    for name in names {
        match service.delete_access_point(bucket, &name).await {
            Ok(()) => {
                info!("Deleted access point '{}' of '{}'", name, bucket);

                deleted.push(name);
            },
            Err(err) => {
                warn!("Failed to delete access point '{}' of '{}': {}", name, bucket, err);

                failed.push((name, err));
            },
        }
    }

    AccessPointOutcome::Removed {
        deleted,
        failed,
    }
}

/// Clear everything that can keep a drained bucket from being deleted.
///
/// Lifecycle, CORS and website configuration are cleared in that order, each
/// attempted once whatever happened to the previous one, then access points
/// are removed.
pub async fn clear_dependencies<S: StorageService>(
    service: &S,
    bucket:  &str,
) -> CleanupReport {
    let lifecycle = clear_outcome(
        bucket,
        "lifecycle rules",
        service.delete_lifecycle(bucket).await,
    );

    let cors = clear_outcome(
        bucket,
        "CORS rules",
        service.delete_cors(bucket).await,
    );

    let website = clear_outcome(
        bucket,
        "website config",
        service.delete_website(bucket).await,
    );

    let access_points = remove_access_points(service, bucket).await;

    CleanupReport {
        lifecycle,
        cors,
        website,
        access_points,
    }
}

/// Tears buckets down through a `StorageService`.
pub struct Sequencer<'a, S> {
    service: &'a S,
}

impl<'a, S: StorageService> Sequencer<'a, S> {
    /// Returns a `Sequencer` using `service` to locate buckets.
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
        }
    }

    /// Tear down `bucket`: locate it, drain it, delete it.
    ///
    /// This never fails, every failure ends up in the returned
    /// `TeardownResult`.
    pub async fn teardown(&self, bucket: &str) -> TeardownResult {
        info!("Processing bucket: {}", bucket);

        let region = match self.service.bucket_location(bucket).await {
            Ok(region) => region,
            Err(err)   => {
                error!("Error getting region for '{}': {}", bucket, err);

                return TeardownResult::failed(bucket, TeardownStep::ResolveRegion, err);
            },
        };

        info!("Region of '{}': {}", bucket, region);

        let service = self.service.with_region(&region);

        let drained = match drain(&service, bucket).await {
            Ok(drained) => drained,
            Err(err)    => {
                error!("Failed to empty bucket '{}': {}", bucket, err);

                return TeardownResult::failed(bucket, TeardownStep::Drain, err);
            },
        };

        if drained.is_empty() {
            info!("Bucket '{}' was already empty", bucket);
        }
        else {
            info!("Emptied bucket '{}': {}", bucket, drained);
        }

        let outcome = Self::delete(&service, bucket, drained).await;

        TeardownResult {
            bucket: bucket.to_string(),
            outcome,
        }
    }

    // Delete the bucket, clearing dependencies and retrying once if that's
    // what's in the way.
    async fn delete(
        service: &S,
        bucket:  &str,
        drained: DrainReport,
    ) -> TeardownOutcome {
        let err = match service.delete_bucket(bucket).await {
            Ok(()) => {
                info!("Deleted bucket '{}'", bucket);

                return TeardownOutcome::Deleted {
                    drained,
                    cleanup: None,
                };
            },
            Err(err) => err,
        };

        if !err.is_dependency() {
            error!("Error deleting bucket '{}': {}", bucket, err);

            return TeardownOutcome::Failed {
                step:  TeardownStep::Delete,
                error: err,
            };
        }

        warn!("Bucket '{}' has dependencies, clearing configuration: {}", bucket, err);

        let cleanup = clear_dependencies(service, bucket).await;

        match service.delete_bucket(bucket).await {
            Ok(()) => {
                info!("Deleted bucket '{}' after clearing dependencies", bucket);

                TeardownOutcome::Deleted {
                    drained,
                    cleanup: Some(cleanup),
                }
            },
            Err(err) => {
                error!(
                    "Still cannot delete bucket '{}', manual cleanup required: {}",
                    bucket,
                    err,
                );

                TeardownOutcome::ManualCleanupRequired {
                    cleanup,
                    error: err,
                }
            },
        }
    }
}
