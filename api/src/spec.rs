//! Spec defines the FunctionSpec family: the container invocation parameters a function config
//! document carries, wherever in that document they were found.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::Result;

/// FunctionSpec is a function config's container invocation parameters, plus whatever
/// auxiliary fields the author also put there. `path` and a top-level `network` key are reader
/// metadata, not function metadata, and are stripped out during parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Container describes the image and runtime parameters, absent for non-container
    /// invocations (e.g. a directly-executable test hook).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSpec>,
    /// Extra holds every field besides `container` that the author put under the function spec.
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl FunctionSpec {
    /// From_value parses a FunctionSpec out of an already-parsed subtree, erasing the `path` and
    /// top-level `network` keys per the function-spec contract.
    pub fn from_value(v: Value) -> Result<Self> {
        let mut spec: FunctionSpec = serde_yaml::from_value(v)?;
        spec.extra.remove("path");
        spec.extra.remove("network");
        Ok(spec)
    }

    /// From_str parses a FunctionSpec out of a literal YAML block (the annotation form).
    pub fn from_str(s: &str) -> Result<Self> {
        let v: Value = serde_yaml::from_str(s)?;
        Self::from_value(v)
    }
}

/// ContainerSpec names the image to run and the constraints it runs under.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Image is the container image reference, required for a container function.
    pub image: String,
    /// Network controls whether the function is granted network access.
    #[serde(default)]
    pub network: NetworkSpec,
    /// Mounts lists the read-only storage mounts made available to the container.
    #[serde(default)]
    pub mounts: Vec<StorageMount>,
}

/// NetworkSpec is the `container.network` subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Required indicates the function needs network access; absent/false means the container
    /// runs with `--network none`.
    #[serde(default)]
    pub required: bool,
}

/// MountType is the kind of storage mount requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    /// Bind mounts a host path into the container.
    Bind,
    /// Volume mounts a named container-runtime volume.
    Volume,
    /// Tmpfs mounts an in-memory filesystem; `src` is always empty for this type.
    Tmpfs,
}

/// StorageMount is one entry of `container.mounts`. All mounts are applied read-only regardless
/// of how they're declared here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMount {
    /// Type selects the mount kind.
    #[serde(rename = "type")]
    pub kind: MountType,
    /// Src is the host path or volume name; empty for `tmpfs`.
    #[serde(default)]
    pub src: String,
    /// Dst is the mount point inside the container.
    pub dst: String,
}

impl std::fmt::Display for MountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MountType::Bind => "bind",
            MountType::Volume => "volume",
            MountType::Tmpfs => "tmpfs",
        };
        f.write_str(s)
    }
}
