use crate::error::{ProvisionError, Result};
use crate::image::QEMU_IMG;

/// Verify the external image tool is reachable before any provisioning.
pub(crate) fn check() -> Result<()> {
    if which::which(QEMU_IMG).is_err() {
        return Err(ProvisionError::Prerequisite(format!(
            "required command not found: {QEMU_IMG}"
        )));
    }
    Ok(())
}
