//! Cicada Hooks - webhook events to pipeline runs
//!
//! This crate owns the seams between the pure compiler and the outside
//! world: the typed pull-request event, the collaborator contracts for
//! fetching definition files, provisioning workspace volumes, and
//! submitting runs, and the [`HookHandler`] that strings them together.
//! The collaborators are traits; this crate ships no network clients.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod runs;
pub mod scm;
pub mod volumes;

// Re-export main types
pub use config::HooksConfig;
pub use error::{HookError, Result};
pub use event::{PullRequest, PullRequestEvent, Repository};
pub use handler::HookHandler;
pub use runs::{RunRequest, RunSubmitter, SubmitError};
pub use scm::{ScmClient, ScmError};
pub use volumes::{VolumeCreator, VolumeError, VolumeHandle};
