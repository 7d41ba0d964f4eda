// StorageService trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use async_trait::async_trait;
use super::{
    BucketNames,
    Cursor,
    ObjectEntry,
    Page,
    Region,
    StorageError,
    Upload,
};

/// `StorageService` represents the remote calls needed to find buckets and
/// tear them down.
///
/// Every call is fallible and returns a classified `StorageError`. Listings
/// are paged, callers keep asking with the returned `Cursor` until a page
/// comes back without one.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Returns the names of every bucket visible to the account.
    async fn list_buckets(&self) -> Result<BucketNames, StorageError>;

    /// Returns the region the given `bucket` lives in.
    async fn bucket_location(&self, bucket: &str) -> Result<Region, StorageError>;

    /// Returns a service addressing the endpoint for `region`.
    fn with_region(&self, region: &Region) -> Self
    where
        Self: Sized;

    /// Returns a page of current objects.
    async fn list_objects(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError>;

    /// Returns a page of object versions and delete markers.
    async fn list_object_versions(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError>;

    /// Deletes an object, or the given version of it.
    async fn delete_object(
        &self,
        bucket: &str,
        object: &ObjectEntry,
    ) -> Result<(), StorageError>;

    /// Returns a page of in-progress multipart uploads.
    async fn list_multipart_uploads(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<Upload>, StorageError>;

    /// Aborts an in-progress multipart upload.
    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        upload: &Upload,
    ) -> Result<(), StorageError>;

    /// Deletes the bucket itself.
    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Removes the bucket's lifecycle rules.
    async fn delete_lifecycle(&self, bucket: &str) -> Result<(), StorageError>;

    /// Removes the bucket's CORS rules.
    async fn delete_cors(&self, bucket: &str) -> Result<(), StorageError>;

    /// Removes the bucket's static website configuration.
    async fn delete_website(&self, bucket: &str) -> Result<(), StorageError>;

    /// Returns the names of access points bound to the bucket.
    ///
    /// This is an optional capability. Services without it return
    /// `StorageError::Unsupported`, which callers treat as nothing to do.
    async fn list_access_points(
        &self,
        _bucket: &str,
    ) -> Result<Vec<String>, StorageError> {
        Err(StorageError::unsupported("list access points"))
    }

    /// Deletes a named access point bound to the bucket.
    ///
    /// Optional, see `list_access_points`.
    async fn delete_access_point(
        &self,
        _bucket: &str,
        _name:   &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::unsupported("delete access point"))
    }
}
