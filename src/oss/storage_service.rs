// Implement the StorageService trait for the oss::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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
use super::client::Client;
use tracing::debug;

// Negative sizes shouldn't happen, treat them as empty.
fn object_size(size: Option<i64>) -> u64 {
    size.and_then(|s| u64::try_from(s).ok()).unwrap_or_default()
}

// Only hand out a cursor if the listing says there's more to come.
fn next_cursor(
    is_truncated: Option<bool>,
    key:          Option<&str>,
    id:           Option<&str>,
) -> Option<Cursor> {
    match is_truncated {
        Some(true) => {
            Some(Cursor {
                key: key.map(ToString::to_string),
                id:  id.map(ToString::to_string),
            })
        },
        _ => None,
    }
}

#[async_trait]
impl StorageService for Client {
    /// Returns a list of bucket names.
    async fn list_buckets(&self) -> Result<BucketNames, StorageError> {
        debug!("list_buckets: Listing...");

        let output = self.client.list_buckets()
            .send()
            .await?;

        let bucket_names = output.buckets()
            .iter()
            .filter_map(|b| b.name().map(ToString::to_string))
            .collect();

        Ok(bucket_names)
    }

    /// Return the bucket location (`Region`) for the given `bucket`.
    ///
    /// Locations come back as `oss-<region>` and are normalized.
    async fn bucket_location(&self, bucket: &str) -> Result<Region, StorageError> {
        debug!("bucket_location for '{}'", bucket);

        let output = self.client.get_bucket_location()
            .bucket(bucket)
            .send()
            .await?;

        let location = output.location_constraint()
            .map(|l| l.as_str())
            .unwrap_or_default();

        debug!("GetBucketLocation API returned '{}'", location);

        if location.trim().is_empty() {
            return Err(StorageError::Sdk {
                code:    None,
                message: format!("no location returned for bucket '{bucket}'"),
            });
        }

        Ok(Region::new(location))
    }

    fn with_region(&self, region: &Region) -> Self {
        self.regional(region)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError> {
        debug!("list_objects for '{}' from {:?}", bucket, cursor);

        let output = self.client.list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(cursor.and_then(|c| c.key))
            .send()
            .await?;

        let items = output.contents()
            .iter()
            .filter_map(|o| {
                let key = o.key()?;

                Some(ObjectEntry {
                    key:        key.to_string(),
                    version_id: None,
                    size:       object_size(o.size()),
                })
            })
            .collect();

        // If the output was truncated we should have a continuation token.
        let next = next_cursor(
            output.is_truncated(),
            output.next_continuation_token(),
            None,
        );

        Ok(Page {
            items,
            next,
        })
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<ObjectEntry>, StorageError> {
        debug!("list_object_versions for '{}' from {:?}", bucket, cursor);

        let cursor = cursor.unwrap_or_default();

        let output = self.client.list_object_versions()
            .bucket(bucket)
            .set_key_marker(cursor.key)
            .set_version_id_marker(cursor.id)
            .send()
            .await?;

        let versions = output.versions()
            .iter()
            .filter_map(|v| {
                Some(ObjectEntry {
                    key:        v.key()?.to_string(),
                    version_id: v.version_id().map(ToString::to_string),
                    size:       object_size(v.size()),
                })
            });

        let delete_markers = output.delete_markers()
            .iter()
            .filter_map(|m| {
                Some(ObjectEntry {
                    key:        m.key()?.to_string(),
                    version_id: m.version_id().map(ToString::to_string),
                    size:       0,
                })
            });

        let items = versions.chain(delete_markers).collect();

        let next = next_cursor(
            output.is_truncated(),
            output.next_key_marker(),
            output.next_version_id_marker(),
        );

        Ok(Page {
            items,
            next,
        })
    }

    async fn delete_object(
        &self,
        bucket: &str,
        object: &ObjectEntry,
    ) -> Result<(), StorageError> {
        debug!(
            "delete_object '{}' ({:?}) in '{}'",
            object.key,
            object.version_id,
            bucket,
        );

        self.client.delete_object()
            .bucket(bucket)
            .key(&object.key)
            .set_version_id(object.version_id.clone())
            .send()
            .await?;

        Ok(())
    }

    /// List in-progress multipart uploads
    async fn list_multipart_uploads(
        &self,
        bucket: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<Upload>, StorageError> {
        debug!("list_multipart_uploads for '{}' from {:?}", bucket, cursor);

        let cursor = cursor.unwrap_or_default();

        let output = self.client.list_multipart_uploads()
            .bucket(bucket)
            .set_key_marker(cursor.key)
            .set_upload_id_marker(cursor.id)
            .send()
            .await?;

        let items = output.uploads()
            .iter()
            .filter_map(|u| {
                Some(Upload {
                    key:       u.key()?.to_string(),
                    upload_id: u.upload_id()?.to_string(),
                })
            })
            .collect();

        let next = next_cursor(
            output.is_truncated(),
            output.next_key_marker(),
            output.next_upload_id_marker(),
        );

        Ok(Page {
            items,
            next,
        })
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        upload: &Upload,
    ) -> Result<(), StorageError> {
        debug!(
            "abort_multipart_upload '{}' ({}) in '{}'",
            upload.key,
            upload.upload_id,
            bucket,
        );

        self.client.abort_multipart_upload()
            .bucket(bucket)
            .key(&upload.key)
            .upload_id(&upload.upload_id)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        debug!("delete_bucket '{}'", bucket);

        self.client.delete_bucket()
            .bucket(bucket)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_lifecycle(&self, bucket: &str) -> Result<(), StorageError> {
        debug!("delete_lifecycle for '{}'", bucket);

        self.client.delete_bucket_lifecycle()
            .bucket(bucket)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_cors(&self, bucket: &str) -> Result<(), StorageError> {
        debug!("delete_cors for '{}'", bucket);

        self.client.delete_bucket_cors()
            .bucket(bucket)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_website(&self, bucket: &str) -> Result<(), StorageError> {
        debug!("delete_website for '{}'", bucket);

        self.client.delete_bucket_website()
            .bucket(bucket)
            .send()
            .await?;

        Ok(())
    }

    // The S3-compatible API has no access point operations, so the trait's
    // "unsupported" defaults apply here.
}
