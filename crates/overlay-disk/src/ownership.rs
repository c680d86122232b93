use std::path::Path;

use crate::error::{ProvisionError, Result};

/// Applies an ownership identity to a freshly created file.
///
/// Trait seam so tests observe the call instead of needing root.
pub trait FileOwner: Send + Sync {
    fn set_owner(&self, identity: &str, path: &Path) -> Result<()>;
}

/// Production owner: resolves `identity` in the system user database and
/// applies `chown(2)` with the user's primary group.
pub struct UnixFileOwner;

impl FileOwner for UnixFileOwner {
    fn set_owner(&self, identity: &str, path: &Path) -> Result<()> {
        let user = nix::unistd::User::from_name(identity)
            .map_err(|e| ProvisionError::Ownership {
                path: path.to_path_buf(),
                detail: format!("lookup user {identity}: {e}"),
            })?
            .ok_or_else(|| ProvisionError::Ownership {
                path: path.to_path_buf(),
                detail: format!("unknown user: {identity}"),
            })?;

        nix::unistd::chown(path, Some(user.uid), Some(user.gid)).map_err(|e| {
            ProvisionError::Ownership {
                path: path.to_path_buf(),
                detail: format!("chown to {identity}: {e}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identity_is_an_ownership_error() {
        let err = UnixFileOwner
            .set_owner("no-such-user-overlay-disk", Path::new("/tmp/x"))
            .unwrap_err();
        match err {
            ProvisionError::Ownership { detail, .. } => {
                assert!(detail.contains("no-such-user-overlay-disk"), "{detail}");
            }
            other => panic!("expected Ownership error, got {other:?}"),
        }
    }
}
