use clap::{Args, Parser, Subcommand};
use kube::{Client, CustomResourceExt};
use mco_reconciler::{
    crd::{ImagePullPolicy, MultiClusterObservability},
    defaults::{Defaults, Disabled, Fixed, DEFAULT_IMAGE_PULL_SECRET, DEFAULT_STORAGE_CLASS},
    manifest,
    store::KubeStore,
    Error, Reconciler,
};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser)]
#[clap(version, author = "Lach")]
struct Opts {
    #[clap(subcommand)]
    sub: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Print MultiClusterObservability CustomResourceDefinition
    Crd,
    /// Converge stored MultiClusterObservability to the manifest, once
    Reconcile(ReconcileOpts),
}

#[derive(Args)]
struct ReconcileOpts {
    /// Manifest with desired MultiClusterObservability
    #[clap(short, long)]
    file: PathBuf,
    #[clap(flatten)]
    defaults: DefaultsOpts,
}

/// Values filled into fields left unset by the manifest
#[derive(Args)]
struct DefaultsOpts {
    #[clap(long, env = "MCO_DEFAULT_IMAGE_PULL_POLICY", default_value = "Always")]
    default_image_pull_policy: ImagePullPolicy,
    #[clap(long, env = "MCO_DEFAULT_IMAGE_PULL_SECRET", default_value = DEFAULT_IMAGE_PULL_SECRET)]
    default_image_pull_secret: String,
    #[clap(long, env = "MCO_DEFAULT_STORAGE_CLASS", default_value = DEFAULT_STORAGE_CLASS)]
    default_storage_class: String,
    /// YAML file with object storage configuration, injected when manifest has none
    #[clap(long, env = "MCO_DEFAULT_OBJECT_STORAGE")]
    default_object_storage: Option<PathBuf>,
}

impl DefaultsOpts {
    fn into_defaults(self) -> Result<Defaults, Error> {
        Ok(Defaults {
            image_pull_policy: self.default_image_pull_policy,
            image_pull_secret: self.default_image_pull_secret,
            storage_class: self.default_storage_class,
            object_storage: match self.default_object_storage {
                Some(path) => Arc::new(Fixed(manifest::load_object_storage(&path)?)),
                None => Arc::new(Disabled),
            },
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();

    match opts.sub {
        SubCommand::Crd => {
            print!(
                "{}",
                serde_yaml_with_quirks::to_string(&MultiClusterObservability::crd())?
            );
        }
        SubCommand::Reconcile(opts) => {
            let defaults = opts.defaults.into_defaults()?;
            let resource = manifest::load_resource(&opts.file)?;
            let name = resource
                .metadata
                .name
                .ok_or(Error::MissingObjectKey(".metadata.name"))?;

            let client = Client::try_default().await?;
            let reconciler = Reconciler::new(KubeStore::new(client), defaults);
            log::info!(
                "Reconciling {} with default storage class {}",
                name,
                reconciler.defaults().storage_class
            );
            let outcome = reconciler.reconcile(&name, resource.spec).await?;
            println!("MultiClusterObservability {} {}", name, outcome);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mco_reconciler::defaults::ObjectStoragePolicy;

    #[test]
    fn builtin_defaults() {
        let opts = Opts::try_parse_from(&["mco-reconciler", "reconcile", "-f", "mco.yaml"]).unwrap();
        let opts = match opts.sub {
            SubCommand::Reconcile(opts) => opts,
            SubCommand::Crd => panic!("expected reconcile"),
        };
        assert_eq!(opts.file, PathBuf::from("mco.yaml"));
        let defaults = opts.defaults.into_defaults().unwrap();
        assert_eq!(defaults.image_pull_policy, ImagePullPolicy::Always);
        assert_eq!(defaults.image_pull_secret, DEFAULT_IMAGE_PULL_SECRET);
        assert_eq!(defaults.storage_class, DEFAULT_STORAGE_CLASS);
        assert!(defaults.object_storage.default_object_storage().is_none());
    }

    #[test]
    fn overridden_defaults() {
        let opts = Opts::try_parse_from(&[
            "mco-reconciler",
            "reconcile",
            "--file",
            "mco.yaml",
            "--default-image-pull-policy",
            "IfNotPresent",
            "--default-storage-class",
            "gp3",
        ])
        .unwrap();
        let defaults = match opts.sub {
            SubCommand::Reconcile(opts) => opts.defaults.into_defaults().unwrap(),
            SubCommand::Crd => panic!("expected reconcile"),
        };
        assert_eq!(defaults.image_pull_policy, ImagePullPolicy::IfNotPresent);
        assert_eq!(defaults.storage_class, "gp3");
    }

    #[test]
    fn unknown_pull_policy() {
        assert!(Opts::try_parse_from(&[
            "mco-reconciler",
            "reconcile",
            "-f",
            "mco.yaml",
            "--default-image-pull-policy",
            "Sometimes",
        ])
        .is_err());
    }
}
