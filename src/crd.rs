use kube_derive::CustomResource;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

/// Container image pull policy, mirrors core/v1 PullPolicy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum ImagePullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl Display for ImagePullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Always => "Always",
            Self::IfNotPresent => "IfNotPresent",
            Self::Never => "Never",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ImagePullPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Always" => Ok(Self::Always),
            "IfNotPresent" => Ok(Self::IfNotPresent),
            "Never" => Ok(Self::Never),
            other => Err(format!(
                "unknown image pull policy {:?}, expected Always, IfNotPresent or Never",
                other
            )),
        }
    }
}

/// `imagePullPolicy: ""` means unset, as with the other string fields
fn empty_pull_policy_as_none<'de, D>(deserializer: D) -> Result<Option<ImagePullPolicy>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(policy) => policy.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Unset and empty selectors serialize identically
fn is_empty_selector(selector: &Option<BTreeMap<String, String>>) -> bool {
    selector.as_ref().map(BTreeMap::is_empty).unwrap_or(true)
}

/// Desired configuration of the observability stack
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "observability.open-cluster-management.io",
    version = "v1beta1",
    kind = "MultiClusterObservability",
    plural = "multiclusterobservabilities",
    shortname = "mco",
    status = "MultiClusterObservabilityStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct MultiClusterObservabilitySpec {
    #[serde(
        default,
        deserialize_with = "empty_pull_policy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<ImagePullPolicy>")]
    pub image_pull_policy: Option<ImagePullPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secret: Option<String>,
    #[serde(default, skip_serializing_if = "is_empty_selector")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_storage_config_spec: Option<ObjectStorageConfigSpec>,
}

/// Where metrics are persisted long-term
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ObjectStorageConfigSpec {
    /// Storage backend, e.g. `s3` or `minio`
    #[serde(rename = "type")]
    pub kind: String,
    pub config: ObjectStorageConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStorageConfig {
    pub bucket: String,
    pub endpoint: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct MultiClusterObservabilityStatus {
    #[serde(default)]
    pub conditions: Vec<ObservabilityCondition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}
