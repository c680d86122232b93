use std::ffi::OsStr;
use std::path::Path;

use async_trait::async_trait;

use crate::command::exec_combined;
use crate::error::Result;

/// Binary used for overlay creation.
pub(crate) const QEMU_IMG: &str = "qemu-img";

/// Disk image formats understood by the image tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Raw,
    Qcow2,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Raw => "raw",
            ImageFormat::Qcow2 => "qcow2",
        }
    }
}

/// Creates COW overlay images chained to a backing file.
///
/// Abstracted as a trait so tests can inject a lightweight creator instead
/// of invoking the real image tool.
#[async_trait]
pub trait ImageCreator: Send + Sync {
    /// Create a new overlay at `overlay` whose unwritten blocks fall
    /// through to `backing`. The overlay must not already exist.
    async fn create_overlay(&self, backing: &Path, overlay: &Path) -> Result<()>;
}

/// Production creator: one `qemu-img create` invocation per overlay.
pub struct QemuImgCreator {
    overlay_format: ImageFormat,
    backing_format: ImageFormat,
}

impl QemuImgCreator {
    /// qcow2 overlays over raw backing images.
    pub fn new() -> Self {
        Self {
            overlay_format: ImageFormat::Qcow2,
            backing_format: ImageFormat::Raw,
        }
    }

    /// Argument list for `qemu-img`. The backing format is stated explicitly
    /// with `-F`; current qemu-img refuses chains with an unstated format.
    fn create_args<'a>(&self, backing: &'a Path, overlay: &'a Path) -> [&'a OsStr; 8] {
        [
            OsStr::new("create"),
            OsStr::new("-f"),
            OsStr::new(self.overlay_format.as_str()),
            OsStr::new("-b"),
            backing.as_os_str(),
            OsStr::new("-F"),
            OsStr::new(self.backing_format.as_str()),
            overlay.as_os_str(),
        ]
    }
}

impl Default for QemuImgCreator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageCreator for QemuImgCreator {
    async fn create_overlay(&self, backing: &Path, overlay: &Path) -> Result<()> {
        exec_combined(QEMU_IMG, &self.create_args(backing, overlay)).await?;
        Ok(())
    }
}
