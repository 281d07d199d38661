pub mod error;
pub mod nav;
pub mod snapshot;
pub mod station;
pub mod stats;

#[cfg(feature = "api")]
pub mod api;
