use crate::{
    crd::MultiClusterObservability,
    error::{Error, Result},
};
use async_trait::async_trait;
use kube::{
    api::{Api, PostParams},
    Client, ResourceExt,
};

#[cfg(test)]
use mockall::automock;

/// Persisted MultiClusterObservability objects, addressed by name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObservabilityStore: Send + Sync {
    /// Fails with [`Error::NotFound`] if there is no object with this name
    async fn get(&self, name: &str) -> Result<MultiClusterObservability>;
    /// Replace the whole object
    async fn update(&self, object: &MultiClusterObservability) -> Result<()>;
}

/// Store backed by the cluster API server
pub struct KubeStore {
    api: Api<MultiClusterObservability>,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

fn has_code(err: &kube::Error, code: u16) -> bool {
    matches!(err, kube::Error::Api(apierror) if apierror.code == code)
}

fn read_error(name: &str, err: kube::Error) -> Error {
    if has_code(&err, 404) {
        Error::NotFound(name.to_owned())
    } else {
        Error::Transport(err)
    }
}

fn write_error(err: kube::Error) -> Error {
    if has_code(&err, 409) {
        Error::Conflict(err)
    } else {
        Error::Transport(err)
    }
}

#[async_trait]
impl ObservabilityStore for KubeStore {
    async fn get(&self, name: &str) -> Result<MultiClusterObservability> {
        log::trace!("Loading MultiClusterObservability {}", name);
        self.api.get(name).await.map_err(|e| read_error(name, e))
    }

    async fn update(&self, object: &MultiClusterObservability) -> Result<()> {
        let name = object
            .metadata
            .name
            .as_deref()
            .ok_or(Error::MissingObjectKey(".metadata.name"))?;
        // resourceVersion is carried over from the fetched object, the server rejects stale writes
        let updated = self
            .api
            .replace(name, &PostParams::default(), object)
            .await
            .map_err(write_error)?;
        log::debug!(
            "MultiClusterObservability {} now at resourceVersion {}",
            updated.name_any(),
            updated.resource_version().unwrap_or_default()
        );
        Ok(())
    }
}
