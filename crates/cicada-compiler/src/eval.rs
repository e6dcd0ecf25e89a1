//! Shared expression evaluation
//!
//! Pure recursive evaluation of [`Expression`] trees against an
//! [`EventContext`], used by both the trigger evaluator and the parameter
//! resolver. A context path that does not exist evaluates to the
//! distinguished undefined state rather than an error: `undefined == x` is
//! false, `undefined != x` is true, and an undefined logical operand is
//! false. Every undefined lookup is recorded so the caller can surface the
//! missing paths as diagnostics.

use crate::error::{CompileError, Result};
use cicada_core::ast::{Expression, Operator, UnaryOperator};
use cicada_core::{EventContext, Value};

/// Result of evaluating a sub-expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Evaluated {
    /// The expression touched a context path that is absent
    Undefined,
    /// A concrete value
    Known(Value),
}

/// Evaluator over a single event context, collecting undefined-path
/// diagnostics as it goes
pub(crate) struct Evaluator<'a> {
    context: &'a EventContext,
    undefined: Vec<String>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(context: &'a EventContext) -> Self {
        Self {
            context,
            undefined: Vec::new(),
        }
    }

    /// The paths that evaluated to undefined, in evaluation order
    pub(crate) fn into_undefined(self) -> Vec<String> {
        self.undefined
    }

    pub(crate) fn eval(&mut self, expr: &Expression) -> Result<Evaluated> {
        match expr {
            Expression::Literal(value) => Ok(Evaluated::Known(value.clone())),

            Expression::FieldAccess(path) => {
                let dotted = path.join(".");
                match self.context.lookup(&dotted) {
                    Some(value) => Ok(Evaluated::Known(value.clone())),
                    None => {
                        self.undefined.push(dotted);
                        Ok(Evaluated::Undefined)
                    }
                }
            }

            Expression::Binary { left, op, right } => match op {
                Operator::Eq | Operator::Ne => {
                    let lhs = self.eval(left)?;
                    let rhs = self.eval(right)?;
                    Ok(Evaluated::Known(Value::Bool(compare(&lhs, &rhs, *op))))
                }
                Operator::And | Operator::Or => {
                    // both sides evaluate so diagnostics stay complete
                    let lhs = self.eval_bool_operand(left)?;
                    let rhs = self.eval_bool_operand(right)?;
                    let result = match op {
                        Operator::And => lhs && rhs,
                        _ => lhs || rhs,
                    };
                    Ok(Evaluated::Known(Value::Bool(result)))
                }
            },

            Expression::Unary { op, operand } => match op {
                UnaryOperator::Not => {
                    let value = self.eval_bool_operand(operand)?;
                    Ok(Evaluated::Known(Value::Bool(!value)))
                }
            },
        }
    }

    /// Evaluate an operand of a logical operator. Undefined is false;
    /// any defined non-boolean is a type mismatch.
    fn eval_bool_operand(&mut self, expr: &Expression) -> Result<bool> {
        match self.eval(expr)? {
            Evaluated::Undefined => Ok(false),
            Evaluated::Known(Value::Bool(b)) => Ok(b),
            Evaluated::Known(other) => Err(CompileError::TypeMismatch {
                expression: render(expr),
                message: format!("expected a boolean operand, got {}", other.type_name()),
            }),
        }
    }
}

/// Equality over evaluated operands. Undefined never equals anything, and
/// values of differing runtime types compare unequal rather than erroring.
fn compare(left: &Evaluated, right: &Evaluated, op: Operator) -> bool {
    let equal = match (left, right) {
        (Evaluated::Undefined, _) | (_, Evaluated::Undefined) => false,
        (Evaluated::Known(l), Evaluated::Known(r)) => {
            if std::mem::discriminant(l) != std::mem::discriminant(r) {
                tracing::debug!(
                    left = l.type_name(),
                    right = r.type_name(),
                    "mixed-type comparison is false"
                );
                false
            } else {
                l == r
            }
        }
    };
    match op {
        Operator::Ne => !equal,
        _ => equal,
    }
}

/// Render an expression back to source-like text for diagnostics
pub(crate) fn render(expr: &Expression) -> String {
    match expr {
        Expression::Literal(value) => match value {
            Value::String(s) => format!("'{}'", s),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
        },
        Expression::FieldAccess(path) => path.join("."),
        Expression::Binary { left, op, right } => {
            format!("{} {} {}", render(left), op.symbol(), render(right))
        }
        Expression::Unary { operand, .. } => format!("!{}", render(operand)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicada_parser::ExpressionParser;

    fn eval_trigger(input: &str, context: &EventContext) -> Result<Evaluated> {
        let expr = ExpressionParser::parse_trigger(input).unwrap();
        Evaluator::new(context).eval(&expr)
    }

    fn known_bool(result: Result<Evaluated>) -> bool {
        match result.unwrap() {
            Evaluated::Known(Value::Bool(b)) => b,
            other => panic!("Expected boolean, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_against_context() {
        let ctx = EventContext::builder().string("action", "opened").build();
        assert!(known_bool(eval_trigger("action == 'opened'", &ctx)));
        assert!(!known_bool(eval_trigger("action == 'closed'", &ctx)));
        assert!(known_bool(eval_trigger("action != 'closed'", &ctx)));
    }

    #[test]
    fn test_undefined_path_compares_false() {
        let ctx = EventContext::builder().build();
        assert!(!known_bool(eval_trigger("action == 'opened'", &ctx)));
        assert!(known_bool(eval_trigger("action != 'opened'", &ctx)));
    }

    #[test]
    fn test_undefined_paths_are_recorded() {
        let ctx = EventContext::builder().build();
        let expr = ExpressionParser::parse_trigger("action == 'opened'").unwrap();
        let mut evaluator = Evaluator::new(&ctx);
        evaluator.eval(&expr).unwrap();
        assert_eq!(evaluator.into_undefined(), vec!["action".to_string()]);
    }

    #[test]
    fn test_mixed_type_equality_is_false() {
        let ctx = EventContext::builder().number("count", 1.0).build();
        assert!(!known_bool(eval_trigger("count == '1'", &ctx)));
        assert!(known_bool(eval_trigger("count != '1'", &ctx)));
    }

    #[test]
    fn test_logical_operators() {
        let ctx = EventContext::builder()
            .string("action", "opened")
            .string("hook.ref", "refs/pull/2/head")
            .build();
        assert!(known_bool(eval_trigger(
            "action == 'opened' && hook.ref != 'refs/heads/main'",
            &ctx
        )));
        assert!(known_bool(eval_trigger(
            "action == 'closed' || action == 'opened'",
            &ctx
        )));
        assert!(!known_bool(eval_trigger(
            "action == 'closed' && action == 'opened'",
            &ctx
        )));
    }

    #[test]
    fn test_not_operator() {
        let ctx = EventContext::builder().boolean("hook.draft", true).build();
        assert!(!known_bool(eval_trigger("!hook.draft", &ctx)));
        assert!(known_bool(eval_trigger("!(hook.draft == false)", &ctx)));
    }

    #[test]
    fn test_undefined_logical_operand_is_false() {
        let ctx = EventContext::builder().string("action", "opened").build();
        assert!(!known_bool(eval_trigger("action == 'opened' && hook.draft", &ctx)));
        assert!(known_bool(eval_trigger("action == 'opened' || hook.draft", &ctx)));
    }

    #[test]
    fn test_non_boolean_logical_operand_is_type_mismatch() {
        let ctx = EventContext::builder().string("action", "opened").build();
        let err = eval_trigger("action && true", &ctx).unwrap_err();
        match err {
            CompileError::TypeMismatch { message, .. } => {
                assert!(message.contains("string"));
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_not_over_non_boolean_is_type_mismatch() {
        let ctx = EventContext::builder().string("action", "opened").build();
        assert!(eval_trigger("!action", &ctx).is_err());
    }

    #[test]
    fn test_render_round_trips_shape() {
        let expr = ExpressionParser::parse_trigger("action == 'opened' && !hook.draft").unwrap();
        assert_eq!(render(&expr), "action == 'opened' && !hook.draft");
    }
}
