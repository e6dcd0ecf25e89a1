//! Cicada Core - Core types for the Cicada pipeline compiler
//!
//! This crate provides the fundamental types used across the Cicada ecosystem:
//! - Value types for event fields and resolved parameters
//! - AST definitions for pipeline documents and trigger expressions
//! - The event context evaluated against trigger expressions
//! - The compiled execution specification model

pub mod ast;
pub mod context;
pub mod execution;
pub mod types;

// Re-export commonly used types
pub use context::{ContextBuilder, EventContext};
pub use execution::{ExecutionSpec, SourceDescriptor};
pub use types::Value;
