use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use vm_spec::{VmInstance, VolumeSource};

use crate::config::DiskConfig;
use crate::error::Result;
use crate::image::{ImageCreator, QemuImgCreator};
use crate::ownership::{FileOwner, UnixFileOwner};
use crate::paths::{VolumePaths, validate_volume_name};
use crate::prerequisites;

/// Provisions per-volume COW overlay images on ephemeral storage.
///
/// The overlay image's existence on disk is the only persisted state: a
/// present image means the volume is provisioned, and re-running any
/// operation here is a no-op for it.
pub struct OverlayProvisioner {
    paths: VolumePaths,
    owner: String,
    creator: Arc<dyn ImageCreator>,
    ownership: Arc<dyn FileOwner>,
}

impl OverlayProvisioner {
    /// Production provisioner backed by `qemu-img` and `chown(2)`.
    ///
    /// Verifies that the image tool is installed and creates the configured
    /// roots if missing.
    pub fn new(config: DiskConfig) -> Result<Self> {
        prerequisites::check()?;
        Self::with_collaborators(
            config,
            Box::new(QemuImgCreator::new()),
            Box::new(UnixFileOwner),
        )
    }

    /// Provisioner with injected collaborators (tests, alternate backends).
    ///
    /// Creates the configured roots if missing; skips the image-tool check
    /// since the injected creator may not shell out at all.
    pub fn with_collaborators(
        config: DiskConfig,
        creator: Box<dyn ImageCreator>,
        ownership: Box<dyn FileOwner>,
    ) -> Result<Self> {
        let paths = VolumePaths::new(config.mount_root, config.backing_root);
        paths.prepare()?;
        Ok(Self {
            paths,
            owner: config.owner,
            creator: Arc::from(creator),
            ownership: Arc::from(ownership),
        })
    }

    pub fn paths(&self) -> &VolumePaths {
        &self.paths
    }

    /// Ensure the overlay image for `volume` exists, chained to `backing`.
    ///
    /// Idempotent: an image already present at the target path wins
    /// immediately, with no re-creation, no ownership re-application, and no
    /// check that its chain still points at `backing`. Existence-check
    /// failures other than "not found" abort without attempting creation.
    ///
    /// Precondition: at most one caller provisions a given volume name at a
    /// time. The existence check is not atomic with creation, so concurrent
    /// calls for the same name can race into a doomed second `create`.
    pub async fn ensure_overlay_image(&self, volume: &str, backing: &Path) -> Result<()> {
        validate_volume_name(volume)?;

        tokio::fs::create_dir_all(self.paths.overlay_dir(volume)).await?;

        let image = self.paths.overlay_image(volume);
        match tokio::fs::metadata(&image).await {
            Ok(_) => {
                debug!(volume = %volume, image = %image.display(), "overlay already present");
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        // A failed create may leave a partial file behind; the ephemeral
        // mount is reclaimed wholesale, so nothing is cleaned up here.
        self.creator.create_overlay(backing, &image).await?;
        self.ownership.set_owner(&self.owner, &image)?;

        info!(
            volume = %volume,
            image = %image.display(),
            backing = %backing.display(),
            "overlay created"
        );
        Ok(())
    }

    /// Provision every ephemeral volume of `instance`, in declaration order.
    ///
    /// Non-ephemeral sources are skipped. Fails fast: the first failing
    /// volume aborts the batch, leaving later volumes unprovisioned and
    /// earlier ones in place. Re-invocation is idempotent per volume, so
    /// retrying the whole instance is cheap.
    pub async fn provision_instance(&self, instance: &VmInstance) -> Result<()> {
        for volume in &instance.volumes {
            if volume.source != VolumeSource::Ephemeral {
                continue;
            }
            let backing = self.paths.backing_image(&volume.name);
            self.ensure_overlay_image(&volume.name, &backing).await?;
        }
        Ok(())
    }
}
