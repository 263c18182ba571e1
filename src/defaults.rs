use crate::crd::{ImagePullPolicy, MultiClusterObservabilitySpec, ObjectStorageConfigSpec};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    sync::Arc,
};

pub const DEFAULT_IMAGE_PULL_SECRET: &str = "multiclusterhub-operator-pull-secret";
pub const DEFAULT_STORAGE_CLASS: &str = "gp2";

/// Decides which object storage block, if any, is injected into a spec without one
pub trait ObjectStoragePolicy: Send + Sync {
    fn default_object_storage(&self) -> Option<ObjectStorageConfigSpec>;
}

/// Never inject object storage configuration
pub struct Disabled;

impl ObjectStoragePolicy for Disabled {
    fn default_object_storage(&self) -> Option<ObjectStorageConfigSpec> {
        None
    }
}

/// Inject the same block into every spec missing one
pub struct Fixed(pub ObjectStorageConfigSpec);

impl ObjectStoragePolicy for Fixed {
    fn default_object_storage(&self) -> Option<ObjectStorageConfigSpec> {
        Some(self.0.clone())
    }
}

/// Values filled into unset spec fields
#[derive(Clone)]
pub struct Defaults {
    pub image_pull_policy: ImagePullPolicy,
    pub image_pull_secret: String,
    pub storage_class: String,
    pub object_storage: Arc<dyn ObjectStoragePolicy>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            image_pull_policy: ImagePullPolicy::Always,
            image_pull_secret: DEFAULT_IMAGE_PULL_SECRET.to_owned(),
            storage_class: DEFAULT_STORAGE_CLASS.to_owned(),
            object_storage: Arc::new(Disabled),
        }
    }
}

impl Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("image_pull_policy", &self.image_pull_policy)
            .field("image_pull_secret", &self.image_pull_secret)
            .field("storage_class", &self.storage_class)
            .finish_non_exhaustive()
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map(str::is_empty).unwrap_or(true)
}

impl Defaults {
    /// Fill every unset field, leaving the rest untouched
    pub fn apply(&self, mut spec: MultiClusterObservabilitySpec) -> MultiClusterObservabilitySpec {
        if spec.image_pull_policy.is_none() {
            spec.image_pull_policy = Some(self.image_pull_policy);
        }
        if is_unset(&spec.image_pull_secret) {
            spec.image_pull_secret = Some(self.image_pull_secret.clone());
        }
        if spec.node_selector.is_none() {
            spec.node_selector = Some(BTreeMap::new());
        }
        if is_unset(&spec.storage_class) {
            spec.storage_class = Some(self.storage_class.clone());
        }
        if spec.object_storage_config_spec.is_none() {
            if let Some(storage) = self.object_storage.default_object_storage() {
                log::info!("Add default object storage configuration");
                spec.object_storage_config_spec = Some(storage);
            }
        }
        spec
    }
}
