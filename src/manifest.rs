use crate::{
    crd::{MultiClusterObservability, ObjectStorageConfigSpec},
    error::{Error, Result},
};
use serde::de::DeserializeOwned;
use std::{fs, path::Path};

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml_with_quirks::from_str(&contents)?)
}

/// Read desired MultiClusterObservability object from YAML file
pub fn load_resource(path: &Path) -> Result<MultiClusterObservability> {
    let resource: MultiClusterObservability = load(path)?;
    if resource.metadata.name.is_none() {
        return Err(Error::MissingObjectKey(".metadata.name"));
    }
    Ok(resource)
}

/// Read object storage block injected into specs without one
pub fn load_object_storage(path: &Path) -> Result<ObjectStorageConfigSpec> {
    load(path)
}
