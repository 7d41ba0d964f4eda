// Paged listing types shared by the storage service and the teardown
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// These are returned when listing buckets.
pub type BucketNames = Vec<String>;

/// Where the next page of a listing starts.
///
/// Object listings only use `key`, which holds the continuation token. Version
/// and multipart upload listings use `key` as the key marker and `id` as the
/// version ID or upload ID marker.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    /// Continuation token or key marker.
    pub key: Option<String>,
    /// Version ID or upload ID marker.
    pub id:  Option<String>,
}

/// One page of a listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Entries on this page.
    pub items: Vec<T>,
    /// Cursor for the following page, `None` on the last page.
    pub next:  Option<Cursor>,
}

impl<T> Page<T> {
    /// Returns a final page holding `items`.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next: None,
        }
    }
}

/// An object, or a specific version of one, that needs deleting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectEntry {
    /// Object key.
    pub key:        String,
    /// Version ID, for version listings.
    pub version_id: Option<String>,
    /// Size in bytes, zero for delete markers.
    pub size:       u64,
}

/// An in-progress multipart upload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Upload {
    /// Object key the upload is for.
    pub key:       String,
    /// Upload ID.
    pub upload_id: String,
}
