//! Parameter binding resolution
//!
//! Resolves each binding's source expression against the event context. A
//! binding must resolve: an undefined source path is a fatal
//! `UnresolvedParameter`, never a silent empty substitution.

use crate::error::{CompileError, Result};
use crate::eval::{Evaluated, Evaluator};
use cicada_core::ast::ParamBinding;
use cicada_core::{EventContext, Value};
use std::collections::HashMap;

/// Resolved parameter values, preserving binding declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    names: Vec<String>,
    values: HashMap<String, Value>,
}

impl ResolvedParams {
    /// Look up a resolved value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if the name resolved
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate resolved parameters in binding declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names
            .iter()
            .map(|name| (name.as_str(), &self.values[name]))
    }

    /// Number of resolved parameters
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing resolved
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert(&mut self, name: String, value: Value) {
        self.names.push(name.clone());
        self.values.insert(name, value);
    }
}

/// Resolve every binding against the event context
pub fn resolve(bindings: &[ParamBinding], context: &EventContext) -> Result<ResolvedParams> {
    let mut resolved = ResolvedParams::default();

    for binding in bindings {
        let mut evaluator = Evaluator::new(context);
        match evaluator.eval(&binding.expression)? {
            Evaluated::Known(value) => {
                tracing::debug!(
                    name = %binding.name,
                    source = %binding.source,
                    "parameter resolved"
                );
                resolved.insert(binding.name.clone(), value);
            }
            Evaluated::Undefined => {
                return Err(CompileError::UnresolvedParameter {
                    name: binding.name.clone(),
                    message: format!(
                        "source '{}' is not defined in the event context",
                        binding.source
                    ),
                });
            }
        }
    }

    Ok(resolved)
}
