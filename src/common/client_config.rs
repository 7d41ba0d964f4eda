// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::{
    Credentials,
    Region,
};

/// Region used for listing and locating buckets when none is given.
pub const DEFAULT_REGION: &str = "cn-hangzhou";

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The access key pair used to sign every request.
    pub credentials: Credentials,

    /// Overrides the endpoint for every request.
    ///
    /// When this isn't given, each bucket is addressed through the public
    /// endpoint of its own region.
    pub endpoint_url: Option<String>,

    /// The region that our client should be created in.
    ///
    /// Buckets are listed and located through this region's endpoint.
    pub region: Region,
}

impl ClientConfig {
    /// Returns a `ClientConfig` for the default region with no endpoint
    /// override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint_url: None,
            region:       Region::new(DEFAULT_REGION),
        }
    }

    /// Returns the endpoint that requests for `region` should go to.
    pub fn endpoint_for(&self, region: &Region) -> String {
        match &self.endpoint_url {
            Some(url) => url.clone(),
            None      => region.endpoint(),
        }
    }
}
