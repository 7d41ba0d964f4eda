// Discovers buckets and their regions
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::{
    Bucket,
    Buckets,
    StorageService,
};
use tracing::{
    debug,
    error,
    warn,
};

/// Return every `Bucket` visible to the account, in listing order.
///
/// A bucket whose region can't be found is still returned, with no region.
/// If the listing itself fails the error is logged and nothing is returned.
pub async fn buckets<S: StorageService>(service: &S) -> Buckets {
    debug!("buckets: Listing...");

    let bucket_names = match service.list_buckets().await {
        Ok(names) => names,
        Err(err)  => {
            error!("Error listing buckets: {}", err);

            return Buckets::new();
        },
    };

    let mut buckets = Buckets::new();

    for name in bucket_names {
        debug!("Retrieving location for '{}'", name);

        let region = match service.bucket_location(&name).await {
            Ok(region) => Some(region),
            Err(err)   => {
                warn!("Could not get region for '{}': {}", name, err);

                None
            },
        };

        buckets.push(Bucket {
            name,
            region,
        });
    }

    buckets
}
