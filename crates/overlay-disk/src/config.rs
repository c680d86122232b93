use std::path::PathBuf;

/// Default root for per-volume overlay images. Lives on ephemeral storage
/// that the orchestration layer reclaims when the instance goes away.
pub const DEFAULT_MOUNT_ROOT: &str = "/var/run/vmvol/overlays";

/// Default root under which the volume pipeline materializes backing images.
pub const DEFAULT_BACKING_ROOT: &str = "/var/run/vmvol/volumes";

/// Default owner for freshly created overlay images (the hypervisor user).
pub const DEFAULT_DISK_OWNER: &str = "qemu";

/// Disk provisioning configuration, fixed at provisioner construction.
#[derive(Debug, Clone)]
pub struct DiskConfig {
    /// Directory under which each volume gets `<name>/disk.qcow2`.
    pub mount_root: PathBuf,
    /// Directory under which each volume's backing image is expected at
    /// `<name>/disk.img`. Read-only from this crate's perspective.
    pub backing_root: PathBuf,
    /// User that must own created overlay images so the hypervisor process
    /// can open them.
    pub owner: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            mount_root: PathBuf::from(DEFAULT_MOUNT_ROOT),
            backing_root: PathBuf::from(DEFAULT_BACKING_ROOT),
            owner: DEFAULT_DISK_OWNER.to_string(),
        }
    }
}
