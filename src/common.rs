// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bucket;
mod client_config;
mod credentials;
mod error;
mod listing;
mod region;
mod storage_service;

pub use bucket::*;
pub use client_config::*;
pub use credentials::*;
pub use error::*;
pub use listing::*;
pub use region::*;
pub use storage_service::*;
