use serde::{Deserialize, Serialize};

/// A VM instance and its declared volumes, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmInstance {
    /// Instance name, unique within the orchestrator's scope.
    pub name: String,
    /// Volumes in the order the domain definition references them.
    pub volumes: Vec<Volume>,
}

/// A single declared volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    /// Volume name, unique within the instance's volume set. Doubles as the
    /// directory key under the disk roots.
    pub name: String,
    pub source: VolumeSource,
}

/// Where a volume's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSource {
    /// Writable copy-on-write overlay over a reusable base image; the
    /// overlay is discarded when the instance is destroyed.
    Ephemeral,
    /// Durable volume attached as-is; managed outside disk provisioning.
    Persistent,
    /// Read-only image shipped alongside the workload.
    ContainerDisk,
}
