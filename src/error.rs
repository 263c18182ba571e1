use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("MultiClusterObservability {0} not found")]
    NotFound(String),
    #[error("kube error: {0}")]
    Transport(#[source] kube::Error),
    #[error("write rejected because of a concurrent change: {0}")]
    Conflict(#[source] kube::Error),
    #[error("cannot canonicalize spec: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to load manifest: {0}")]
    Manifest(#[from] serde_yaml_with_quirks::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing object key: {0}")]
    MissingObjectKey(&'static str),
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the caller may retry the same call later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Conflict(_))
    }
}
