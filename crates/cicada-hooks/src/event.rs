//! Webhook event types
//!
//! The typed subset of a pull-request webhook payload the handler needs,
//! and the event-context construction that replaces the old "flatten
//! whatever fields exist" approach: the compiler only ever sees the flat,
//! explicitly-built mapping, never the payload itself.

use cicada_core::{EventContext, SourceDescriptor};
use serde::{Deserialize, Serialize};

/// A pull-request webhook event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// What happened: "opened", "synchronize", "closed", ...
    pub action: String,

    /// Pull request number
    pub number: u64,

    /// The repository the event fired in
    pub repository: Repository,

    /// The pull request itself
    pub pull_request: PullRequest,
}

/// Repository fields of the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// "owner/name"
    pub full_name: String,

    /// Clone URL
    pub clone_url: String,
}

/// Pull-request fields of the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,

    /// Head commit SHA
    pub sha: String,

    /// Head ref, e.g. "refs/pull/2/head"
    #[serde(rename = "ref")]
    pub head_ref: String,
}

impl PullRequestEvent {
    /// Build the flat event context trigger and binding expressions
    /// evaluate against
    pub fn event_context(&self) -> EventContext {
        EventContext::builder()
            .string("action", &self.action)
            .number("hook.number", self.number as f64)
            .string("hook.sha", &self.pull_request.sha)
            .string("hook.ref", &self.pull_request.head_ref)
            .string("repo.full_name", &self.repository.full_name)
            .string("repo.clone_url", &self.repository.clone_url)
            .build()
    }

    /// The source to check out for this event: the repository at the pull
    /// request's head commit
    pub fn source(&self) -> SourceDescriptor {
        SourceDescriptor::new(&self.repository.clone_url, &self.pull_request.sha)
    }
}
