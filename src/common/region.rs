// Handles region things
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::meta::region::future;
use aws_config::meta::region::ProvideRegion;
use aws_types::region;
use std::fmt;
use tracing::debug;

/// Prefix the provider puts in front of region IDs in bucket locations and
/// endpoint host names.
const OSS_PREFIX: &str = "oss-";

/// Domain that regional endpoints live under.
const ENDPOINT_DOMAIN: &str = "aliyuncs.com";

/// Strip any leading `oss-` prefixes from a region string.
///
/// Normalizing an already normalized region returns it unchanged.
pub fn normalize(region: &str) -> String {
    region.trim().trim_start_matches(OSS_PREFIX).to_string()
}

/// An OSS region, always held in its normalized form (`cn-shanghai`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Region {
    id: String,
}

impl Region {
    /// Returns a new `Region`, normalizing the given region string.
    pub fn new(region: &str) -> Self {
        let id = normalize(region);

        debug!("Region set to: {:?}", id);

        Self {
            id,
        }
    }

    /// Returns the normalized region ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the region ID as the provider spells it in host names, e.g.
    /// `oss-cn-shanghai`.
    pub fn location(&self) -> String {
        format!("{}{}", OSS_PREFIX, self.id)
    }

    /// Returns the public HTTPS endpoint for this region.
    pub fn endpoint(&self) -> String {
        format!("https://{}.{}", self.location(), ENDPOINT_DOMAIN)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl ProvideRegion for Region {
    // Takes our region string and returns a proper SDK Region, this allows
    // us to pass our Region into SDK functions expecting one.
    fn region(&self) -> future::ProvideRegion {
        future::ProvideRegion::ready(Some(self.into()))
    }
}

impl From<&Region> for region::Region {
    fn from(region: &Region) -> Self {
        Self::new(region.id.clone())
    }
}
