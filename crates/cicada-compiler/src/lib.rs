//! Cicada Compiler - pipeline definitions to execution specifications
//!
//! Given a parsed [`cicada_core::ast::PipelineDefinition`] and the event
//! context built by the caller, this crate decides whether the trigger
//! fires, resolves the parameter bindings, and compiles the definition into
//! a complete [`cicada_core::ExecutionSpec`]. Everything here is pure and
//! deterministic: no I/O, no shared state, identical inputs produce
//! identical output.

pub mod compiler;
pub mod error;
mod eval;
pub mod params;
pub mod trigger;

// Re-export main types
pub use compiler::{Compiler, CompilerOptions, CHECKOUT_STEP_NAME, CHECKOUT_TASK_NAME};
pub use error::{CompileError, Result};
pub use params::ResolvedParams;
pub use trigger::TriggerDecision;
