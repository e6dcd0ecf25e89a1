//! Compiler error types

use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// A comparison or logical operand the expression grammar gives no
    /// meaning to (e.g. `&&` over a string)
    #[error("type mismatch in '{expression}': {message}")]
    TypeMismatch { expression: String, message: String },

    /// A parameter binding or reference that cannot be resolved
    #[error("unresolved parameter '{name}': {message}")]
    UnresolvedParameter { name: String, message: String },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
