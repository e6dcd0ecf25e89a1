//! Workspace volume collaborator contract
//!
//! The volume backing a run's workspace is provisioned before compilation
//! and owned by the collaborator; the compiler only ever sees its name.

use async_trait::async_trait;
use thiserror::Error;

/// Handle to a provisioned volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeHandle {
    /// The volume's name, passed to the compiler as the workspace identifier
    pub name: String,
}

/// Volume provisioning failure
#[derive(Error, Debug)]
#[error("volume creation failed: {0}")]
pub struct VolumeError(pub String);

/// Provisions workspace volumes
#[async_trait]
pub trait VolumeCreator: Send + Sync {
    /// Create a volume of the given size (e.g. "1Gi")
    async fn create_volume(&self, size: &str) -> std::result::Result<VolumeHandle, VolumeError>;
}
