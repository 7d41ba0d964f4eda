// Imports all of the components needed for oss::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// OSS `Client`.
mod client;

/// Implementation of the `StorageService` trait for our OSS `Client`.
mod storage_service;

pub use client::*;
