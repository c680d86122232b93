use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};

/// File name of the overlay image inside a volume's mount directory.
pub const OVERLAY_FILE_NAME: &str = "disk.qcow2";

/// File name of the backing image inside a volume's backing directory.
pub const BACKING_FILE_NAME: &str = "disk.img";

/// Deterministic path derivation for overlay and backing images.
///
/// Pure concatenation of the configured roots and the volume name; every
/// method is I/O-free except [`prepare`](Self::prepare).
#[derive(Debug, Clone)]
pub struct VolumePaths {
    mount_root: PathBuf,
    backing_root: PathBuf,
}

impl VolumePaths {
    pub fn new(mount_root: PathBuf, backing_root: PathBuf) -> Self {
        Self {
            mount_root,
            backing_root,
        }
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    pub fn backing_root(&self) -> &Path {
        &self.backing_root
    }

    /// Per-volume overlay directory: `<mount_root>/<volume>`.
    pub fn overlay_dir(&self, volume: &str) -> PathBuf {
        self.mount_root.join(volume)
    }

    /// Overlay image path: `<mount_root>/<volume>/disk.qcow2`.
    pub fn overlay_image(&self, volume: &str) -> PathBuf {
        self.overlay_dir(volume).join(OVERLAY_FILE_NAME)
    }

    /// Backing image path: `<backing_root>/<volume>/disk.img`.
    pub fn backing_image(&self, volume: &str) -> PathBuf {
        self.backing_root.join(volume).join(BACKING_FILE_NAME)
    }

    /// Create both roots if missing (recursive, idempotent).
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.mount_root)?;
        std::fs::create_dir_all(&self.backing_root)?;
        Ok(())
    }
}

/// Reject volume names that don't fit a single path segment.
///
/// Names become directory components under both roots, so anything empty,
/// containing a separator or NUL, or aliasing `.`/`..` is refused.
pub(crate) fn validate_volume_name(name: &str) -> Result<()> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\0');
    if unsafe_name {
        return Err(ProvisionError::InvalidVolumeName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> VolumePaths {
        VolumePaths::new(PathBuf::from("/run/m"), PathBuf::from("/run/b"))
    }

    #[test]
    fn overlay_image_is_under_mount_root() {
        assert_eq!(
            paths().overlay_image("vol1"),
            PathBuf::from("/run/m/vol1/disk.qcow2")
        );
    }

    #[test]
    fn backing_image_is_under_backing_root() {
        assert_eq!(
            paths().backing_image("vol1"),
            PathBuf::from("/run/b/vol1/disk.img")
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        assert_eq!(paths().overlay_image("a"), paths().overlay_image("a"));
        assert_ne!(paths().overlay_image("a"), paths().overlay_image("b"));
    }

    #[test]
    fn changing_mount_root_moves_all_volumes_uniformly() {
        let moved = VolumePaths::new(PathBuf::from("/elsewhere"), PathBuf::from("/run/b"));
        for volume in ["a", "b", "c"] {
            let original = paths().overlay_image(volume);
            let relocated = moved.overlay_image(volume);
            assert_eq!(
                original.strip_prefix("/run/m").unwrap(),
                relocated.strip_prefix("/elsewhere").unwrap()
            );
        }
    }

    #[test]
    fn prepare_creates_roots_and_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let roots = VolumePaths::new(tmp.path().join("m/nested"), tmp.path().join("b"));

        roots.prepare().expect("first prepare");
        assert!(roots.mount_root().is_dir());
        assert!(roots.backing_root().is_dir());

        roots.prepare().expect("second prepare");
    }

    #[test]
    fn accepts_ordinary_names() {
        for name in ["vol1", "root-disk", "a.b", "UPPER_case"] {
            assert!(validate_volume_name(name).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn rejects_unsafe_names() {
        for name in ["", ".", "..", "a/b", "/abs", "nul\0byte"] {
            assert!(
                matches!(
                    validate_volume_name(name),
                    Err(ProvisionError::InvalidVolumeName(_))
                ),
                "accepted {name:?}"
            );
        }
    }
}
