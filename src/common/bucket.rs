// Definition of a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::Region;

/// Shown in place of a region that couldn't be resolved.
pub const UNKNOWN_REGION: &str = "unknown";

/// Represents an OSS bucket as listed by the enumerator.
///
/// This will always have a `name` and optionally a `Region`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
    /// Bucket name, unique per account.
    pub name:   String,
    /// Region the bucket lives in, `None` if it couldn't be resolved.
    pub region: Option<Region>,
}

impl Bucket {
    /// Returns the region ID for display, or `unknown`.
    pub fn region_name(&self) -> &str {
        match &self.region {
            Some(region) => region.id(),
            None         => UNKNOWN_REGION,
        }
    }
}

/// Convenience type for a list of `Bucket`.
pub type Buckets = Vec<Bucket>;
