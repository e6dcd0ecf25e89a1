//! Trigger evaluation
//!
//! Decides whether a parsed trigger expression fires for a given event
//! context. Undefined event fields suppress the trigger instead of failing
//! the handler; the missing paths are reported back so the caller can log
//! them.

use crate::error::{CompileError, Result};
use crate::eval::{render, Evaluated, Evaluator};
use cicada_core::ast::Expression;
use cicada_core::{EventContext, Value};

/// The outcome of evaluating a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDecision {
    /// Whether the trigger fired
    pub fired: bool,

    /// Context paths the expression referenced but the event did not carry
    pub undefined: Vec<String>,
}

/// Evaluate a trigger expression against an event context
pub fn evaluate(expression: &Expression, context: &EventContext) -> Result<TriggerDecision> {
    let mut evaluator = Evaluator::new(context);
    let fired = match evaluator.eval(expression)? {
        // missing event fields suppress the run, they never crash the handler
        Evaluated::Undefined => false,
        Evaluated::Known(Value::Bool(b)) => b,
        Evaluated::Known(other) => {
            return Err(CompileError::TypeMismatch {
                expression: render(expression),
                message: format!(
                    "trigger must evaluate to a boolean, got {}",
                    other.type_name()
                ),
            });
        }
    };

    let undefined = evaluator.into_undefined();
    tracing::debug!(fired, undefined = ?undefined, "trigger evaluated");
    Ok(TriggerDecision { fired, undefined })
}
