//! Hook handling errors

use crate::runs::SubmitError;
use crate::scm::ScmError;
use crate::volumes::VolumeError;
use cicada_compiler::CompileError;
use cicada_parser::ParseError;
use thiserror::Error;

/// Hook handling error
///
/// Definition and compilation failures are non-retryable: the document or
/// its binding of event fields is itself invalid, and retrying without
/// changing the document reproduces the same failure.
#[derive(Error, Debug)]
pub enum HookError {
    /// Fetching the definition file failed (other than not-found, which is
    /// handled as "no run")
    #[error(transparent)]
    Scm(#[from] ScmError),

    /// The definition document failed to parse
    #[error("invalid pipeline definition: {0}")]
    Parse(#[from] ParseError),

    /// Trigger evaluation, parameter resolution, or compilation failed
    #[error("pipeline compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// Workspace volume provisioning failed
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// Run submission failed
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;
