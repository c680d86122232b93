mod command;
mod config;
mod error;
mod image;
mod ownership;
mod paths;
mod prerequisites;
mod provision;

pub use command::CommandError;
pub use config::{DEFAULT_BACKING_ROOT, DEFAULT_DISK_OWNER, DEFAULT_MOUNT_ROOT, DiskConfig};
pub use error::{ProvisionError, Result};
pub use image::{ImageCreator, ImageFormat, QemuImgCreator};
pub use ownership::{FileOwner, UnixFileOwner};
pub use paths::{BACKING_FILE_NAME, OVERLAY_FILE_NAME, VolumePaths};
pub use provision::OverlayProvisioner;
