//! Execution orchestrator collaborator contract

use async_trait::async_trait;
use cicada_core::ExecutionSpec;
use thiserror::Error;

/// A run to submit: a generated name plus the compiled specification
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    /// Generated run name
    pub name: String,

    /// The compiled execution specification, submitted unmodified
    pub spec: ExecutionSpec,
}

/// Run submission failure
#[derive(Error, Debug)]
#[error("run submission failed: {0}")]
pub struct SubmitError(pub String);

/// Submits compiled runs to the execution orchestrator
#[async_trait]
pub trait RunSubmitter: Send + Sync {
    /// Submit a run, returning the orchestrator's created-resource
    /// representation
    async fn submit_run(
        &self,
        run: RunRequest,
    ) -> std::result::Result<serde_json::Value, SubmitError>;
}
