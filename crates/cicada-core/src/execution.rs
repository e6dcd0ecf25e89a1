//! Execution specification model
//!
//! The compiler's output: an ordered task list with a synthesized source
//! checkout task at index 0, the resolved parameter declarations, and the
//! workspace binding. The model is orchestrator-agnostic; callers serialize
//! it for submission to their run-creation API.

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Where to fetch the source from: repository URL plus revision, derived by
/// the caller from the triggering event and copied verbatim into the
/// checkout step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Clone URL of the repository
    pub repo_url: String,

    /// Revision (commit SHA) to check out
    pub revision: String,
}

impl SourceDescriptor {
    /// Create a new source descriptor
    pub fn new(repo_url: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            revision: revision.into(),
        }
    }
}

/// The workspace the run's tasks share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceBinding {
    /// Logical workspace name
    pub name: String,

    /// The caller-provisioned volume backing the workspace
    pub volume: String,

    /// Path the workspace is mounted at inside task containers
    pub mount_path: String,
}

/// Inferred type of a resolved parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// String parameter (the default)
    String,
    /// Numeric parameter
    Number,
    /// Boolean parameter
    Boolean,
}

impl ParamType {
    /// Infer the declared type from a resolved value. Strings and nulls
    /// declare as string.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Number(_) => ParamType::Number,
            Value::Bool(_) => ParamType::Boolean,
            Value::String(_) | Value::Null => ParamType::String,
        }
    }
}

/// A declared, resolved parameter in the compiled specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// The resolved value
    pub value: Value,

    /// Optional description carried over from the definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A compiled step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name
    pub name: String,

    /// Container image
    pub image: String,

    /// Command to run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    /// Inline script body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// A compiled task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Task name
    pub name: String,

    /// The task's steps, in order
    pub steps: Vec<StepSpec>,
}

/// The complete compiled execution specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSpec {
    /// Resolved parameter declarations, in binding order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamSpec>,

    /// Ordered task list; the synthesized checkout task comes first when
    /// the definition declared any work
    pub tasks: Vec<TaskSpec>,

    /// The workspace the run executes in
    pub workspace: WorkspaceBinding,
}

impl ExecutionSpec {
    /// Number of tasks, including the synthesized checkout task
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the specification carries no executable work
    pub fn has_work(&self) -> bool {
        !self.tasks.is_empty()
    }
}
