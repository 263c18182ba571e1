//! Converges stored MultiClusterObservability resources to a desired, defaulted spec

pub mod crd;
pub mod defaults;
pub mod error;
pub mod manifest;
pub mod reconcile;
pub mod store;

pub use error::{Error, Result};
pub use reconcile::{Outcome, Reconciler};
