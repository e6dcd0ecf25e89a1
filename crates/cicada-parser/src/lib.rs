//! Cicada Parser - pipeline definition documents to AST
//!
//! This crate decodes `.cicada.yaml` documents into [`cicada_core::ast`]
//! structures, pre-flighting the trigger expression and every parameter
//! binding so that expression syntax errors surface once per definition
//! rather than once per event.

pub mod definition;
pub mod error;
pub mod expression;
mod yaml;

// Re-export main parser types
pub use definition::DefinitionParser;
pub use error::{ParseError, Result};
pub use expression::ExpressionParser;
