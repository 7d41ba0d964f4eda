// In-memory StorageService that records every call, for tests
#![forbid(unsafe_code)]
use async_trait::async_trait;
use crate::common::{
    BucketNames,
    Cursor,
    ObjectEntry,
    Page,
    Region,
    StorageError,
    StorageService,
    Upload,
};
use std::collections::{
    HashMap,
    VecDeque,
};
use std::sync::{
    Arc,
    Mutex,
};

/// A call made against `FakeStorage`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    ListBuckets,
    BucketLocation(String),
    WithRegion(String),
    ListObjects(String),
    ListObjectVersions(String),
    DeleteObject(String, String),
    ListMultipartUploads(String),
    AbortMultipartUpload(String, String),
    DeleteBucket(String),
    DeleteLifecycle(String),
    DeleteCors(String),
    DeleteWebsite(String),
    ListAccessPoints(String),
    DeleteAccessPoint(String, String),
}

/// Everything the fake knows and answers with.
#[derive(Debug)]
pub struct FakeState {
    /// Every call made, in order.
    pub calls:               Vec<Call>,
    /// Bucket names returned by `list_buckets`, in order.
    pub buckets:             Vec<String>,
    /// Returned instead of the bucket list.
    pub list_buckets_error:  Option<StorageError>,
    /// Bucket locations, a missing entry answers `NoSuchBucket`.
    pub locations:           HashMap<String, Result<Region, StorageError>>,
    /// Current objects per bucket.
    pub objects:             HashMap<String, Vec<ObjectEntry>>,
    /// Object versions per bucket.
    pub versions:            HashMap<String, Vec<ObjectEntry>>,
    /// Multipart uploads per bucket.
    pub uploads:             HashMap<String, Vec<Upload>>,
    /// Listing page size.
    pub page_size:           usize,
    /// Every object delete fails with this.
    pub delete_object_error: Option<StorageError>,
    /// Answers for successive `delete_bucket` calls, `Ok` once exhausted.
    pub delete_bucket:       VecDeque<Result<(), StorageError>>,
    /// Answers for the configuration clearing calls, `Ok` if absent.
    pub lifecycle_error:     Option<StorageError>,
    pub cors_error:          Option<StorageError>,
    pub website_error:       Option<StorageError>,
    /// Access points per bucket, `None` for an unsupported capability.
    pub access_points:       Option<HashMap<String, Vec<String>>>,
    /// Access points whose deletion fails.
    pub stuck_access_points: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls:               Vec::new(),
            buckets:             Vec::new(),
            list_buckets_error:  None,
            locations:           HashMap::new(),
            objects:             HashMap::new(),
            versions:            HashMap::new(),
            uploads:             HashMap::new(),
            page_size:           1000,
            delete_object_error: None,
            delete_bucket:       VecDeque::new(),
            lifecycle_error:     None,
            cors_error:          None,
            website_error:       None,
            access_points:       None,
            stuck_access_points: Vec::new(),
        }
    }
}

/// A `StorageService` backed by `FakeState`.
///
/// Clones, including those made by `with_region`, share the same state.
#[derive(Clone, Debug, Default)]
pub struct FakeStorage {
    pub state: Arc<Mutex<FakeState>>,
}

/// Returns a `NoSuchBucket` error.
pub fn no_such_bucket() -> StorageError {
    StorageError::from_code(Some("NoSuchBucket"), Some("The specified bucket does not exist."))
}

/// Returns a `BucketNotEmpty` error.
pub fn bucket_not_empty() -> StorageError {
    StorageError::from_code(Some("BucketNotEmpty"), Some("The bucket you tried to delete is not empty."))
}

/// Returns an `AccessDenied` error.
pub fn access_denied() -> StorageError {
    StorageError::from_code(Some("AccessDenied"), Some("Access denied."))
}

/// Returns `count` objects named `object-N` of 100 bytes each.
pub fn objects(count: usize) -> Vec<ObjectEntry> {
    (0..count)
        .map(|n| {
            ObjectEntry {
                key:        format!("object-{n}"),
                version_id: None,
                size:       100,
            }
        })
        .collect()
}

impl FakeStorage {
    /// Returns a fake with a single bucket in `cn-shanghai`.
    pub fn with_bucket(name: &str) -> Self {
        let fake = Self::default();

        fake.add_bucket(name, Ok(Region::new("oss-cn-shanghai")));
        fake
    }

    /// Adds a bucket with the given location answer.
    pub fn add_bucket(&self, name: &str, location: Result<Region, StorageError>) {
        let mut state = self.state();

        state.buckets.push(name.to_string());
        state.locations.insert(name.to_string(), location);
    }

    /// Locks and returns the shared state.
    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Returns a copy of every call made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Returns the number of `delete_bucket` calls made so far.
    pub fn delete_bucket_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteBucket(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }

    // Serve a page of `items` starting at the offset held in the cursor.
    fn page<T: Clone>(items: &[T], cursor: Option<Cursor>, size: usize) -> Page<T> {
        let start = cursor
            .and_then(|c| c.key)
            .and_then(|k| k.parse::<usize>().ok())
            .unwrap_or_default();

        let end = (start + size).min(items.len());

        let next = if end < items.len() {
            Some(Cursor {
                key: Some(end.to_string()),
                id:  None,
            })
        }
        else {
            None
        };

        Page {
            items: items[start.min(end)..end].to_vec(),
            next,
        }
    }
}

#[async_trait]
impl StorageService for FakeStorage {
    async fn list_buckets(&self) -> Result<BucketNames, StorageError> {
        self.record(Call::ListBuckets);

        let state = self.state();

        match &state.list_buckets_error {
            Some(err) => Err(err.clone()),
            None      => Ok(state.buckets.clone()),
        }
    }

    async fn bucket_location(&self, bucket: &str) -> Result<Region, StorageError> {
        self.record(Call::BucketLocation(bucket.into()));

        self.state()
            .locations
            .get(bucket)
            .cloned()
            .unwrap_or_else(|| Err(no_such_bucket()))
    }

    fn with_region(&self, region: &Region) -> Self {
        self.record(Call::WithRegion(region.id().into()));

        self.clone()
    }

    async fn list_objects(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError> {
        self.record(Call::ListObjects(bucket.into()));

        let state   = self.state();
        let objects = state.objects.get(bucket).cloned().unwrap_or_default();

        Ok(Self::page(&objects, cursor, state.page_size))
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError> {
        self.record(Call::ListObjectVersions(bucket.into()));

        let state    = self.state();
        let versions = state.versions.get(bucket).cloned().unwrap_or_default();

        Ok(Self::page(&versions, cursor, state.page_size))
    }

    async fn delete_object(
        &self,
        bucket: &str,
        object: &ObjectEntry,
    ) -> Result<(), StorageError> {
        self.record(Call::DeleteObject(bucket.into(), object.key.clone()));

        match &self.state().delete_object_error {
            Some(err) => Err(err.clone()),
            None      => Ok(()),
        }
    }

    async fn list_multipart_uploads(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<Upload>, StorageError> {
        self.record(Call::ListMultipartUploads(bucket.into()));

        let state   = self.state();
        let uploads = state.uploads.get(bucket).cloned().unwrap_or_default();

        Ok(Self::page(&uploads, cursor, state.page_size))
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        upload: &Upload,
    ) -> Result<(), StorageError> {
        self.record(Call::AbortMultipartUpload(bucket.into(), upload.upload_id.clone()));

        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.record(Call::DeleteBucket(bucket.into()));

        self.state()
            .delete_bucket
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn delete_lifecycle(&self, bucket: &str) -> Result<(), StorageError> {
        self.record(Call::DeleteLifecycle(bucket.into()));

        self.state().lifecycle_error.clone().map_or(Ok(()), Err)
    }

    async fn delete_cors(&self, bucket: &str) -> Result<(), StorageError> {
        self.record(Call::DeleteCors(bucket.into()));

        self.state().cors_error.clone().map_or(Ok(()), Err)
    }

    async fn delete_website(&self, bucket: &str) -> Result<(), StorageError> {
        self.record(Call::DeleteWebsite(bucket.into()));

        self.state().website_error.clone().map_or(Ok(()), Err)
    }

    async fn list_access_points(
        &self,
        bucket: &str,
    ) -> Result<Vec<String>, StorageError> {
        self.record(Call::ListAccessPoints(bucket.into()));

        match &self.state().access_points {
            Some(points) => Ok(points.get(bucket).cloned().unwrap_or_default()),
            None         => Err(StorageError::unsupported("list access points")),
        }
    }

    async fn delete_access_point(
        &self,
        bucket: &str,
        name:   &str,
    ) -> Result<(), StorageError> {
        self.record(Call::DeleteAccessPoint(bucket.into(), name.into()));

        if self.state().stuck_access_points.iter().any(|n| n == name) {
            return Err(access_denied());
        }

        Ok(())
    }
}
