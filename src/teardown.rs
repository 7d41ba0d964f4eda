// Imports all of the components needed for tearing down buckets
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Outcomes and reports produced by a teardown.
mod report;

/// The teardown `Sequencer`.
mod sequencer;

pub use report::*;
pub use sequencer::*;
