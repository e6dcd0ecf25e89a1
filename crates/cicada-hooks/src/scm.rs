//! Source-control collaborator contract

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the source-control collaborator
#[derive(Error, Debug)]
pub enum ScmError {
    /// The file does not exist at that ref
    #[error("file '{path}' not found in {repo}@{reference}")]
    NotFound {
        repo: String,
        path: String,
        reference: String,
    },

    /// Any other failure talking to the provider
    #[error("scm request failed: {0}")]
    Request(String),
}

impl ScmError {
    /// Returns true for the not-found case, which the handler treats as
    /// "this repository has no pipeline" rather than an error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScmError::NotFound { .. })
    }
}

/// Fetches file contents from a repository at a given ref
#[async_trait]
pub trait ScmClient: Send + Sync {
    /// Fetch the raw bytes of `path` in `repo` at `reference`
    async fn file_contents(
        &self,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> std::result::Result<Vec<u8>, ScmError>;
}
