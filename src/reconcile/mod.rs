mod drift;

pub use drift::{drift, Drift};

use crate::{
    crd::MultiClusterObservabilitySpec,
    defaults::Defaults,
    error::Result,
    store::ObservabilityStore,
};
use std::fmt::{self, Display};

/// What a reconcile pass did to the stored object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Stored spec already matched
    Unchanged,
    /// Stored spec was replaced
    Updated,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Converges stored MultiClusterObservability specs to the desired ones
pub struct Reconciler<S> {
    store: S,
    defaults: Defaults,
}

impl<S: ObservabilityStore> Reconciler<S> {
    pub fn new(store: S, defaults: Defaults) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Default `desired`, then write it over the stored spec of `name` if they differ.
    ///
    /// Performs at most one read and one write. Nothing is retried: a failed read
    /// or write is returned as-is and the stored object stays untouched.
    pub async fn reconcile(
        &self,
        name: &str,
        desired: MultiClusterObservabilitySpec,
    ) -> Result<Outcome> {
        let desired = self.defaults.apply(desired);

        let found = self.store.get(name).await?;

        let desired_value = serde_json::to_value(&desired).map_err(|e| {
            log::error!("cannot parse the desired MultiClusterObservability values");
            e
        })?;
        let current_value = serde_json::to_value(&found.spec).map_err(|e| {
            log::error!("cannot parse the current MultiClusterObservability values");
            e
        })?;

        if desired_value == current_value {
            log::debug!("MultiClusterObservability {} is up to date", name);
            return Ok(Outcome::Unchanged);
        }

        for change in drift(&current_value, &desired_value) {
            log::debug!("{}", change);
        }

        log::info!("Update MultiClusterObservability CR {}", name);
        let mut updated = found;
        updated.spec = desired;
        self.store.update(&updated).await?;

        Ok(Outcome::Updated)
    }
}
