//! Expression AST nodes

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Field access into the event context (e.g., action, hook.sha)
    FieldAccess(Vec<String>),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (!)
    Not,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Create a field access expression
    pub fn field_access(path: Vec<String>) -> Self {
        Expression::FieldAccess(path)
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_expression() {
        let expr = Expression::literal(Value::String("opened".to_string()));
        assert_eq!(
            expr,
            Expression::Literal(Value::String("opened".to_string()))
        );
    }

    #[test]
    fn test_field_access_expression() {
        let expr = Expression::field_access(vec!["hook".to_string(), "sha".to_string()]);
        assert_eq!(
            expr,
            Expression::FieldAccess(vec!["hook".to_string(), "sha".to_string()])
        );
    }

    #[test]
    fn test_binary_expression() {
        // action == 'opened'
        let expr = Expression::binary(
            Expression::field_access(vec!["action".to_string()]),
            Operator::Eq,
            Expression::literal(Value::String("opened".to_string())),
        );

        match expr {
            Expression::Binary { left, op, right } => {
                assert_eq!(op, Operator::Eq);
                assert_eq!(*left, Expression::FieldAccess(vec!["action".to_string()]));
                assert_eq!(
                    *right,
                    Expression::Literal(Value::String("opened".to_string()))
                );
            }
            _ => panic!("Expected Binary expression"),
        }
    }

    #[test]
    fn test_unary_expression() {
        let expr = Expression::unary(
            UnaryOperator::Not,
            Expression::field_access(vec!["draft".to_string()]),
        );

        match expr {
            Expression::Unary { op, .. } => {
                assert_eq!(op, UnaryOperator::Not);
            }
            _ => panic!("Expected Unary expression"),
        }
    }

    #[test]
    fn test_expression_clone() {
        let expr = Expression::binary(
            Expression::field_access(vec!["action".to_string()]),
            Operator::Ne,
            Expression::literal(Value::String("closed".to_string())),
        );

        let cloned = expr.clone();
        assert_eq!(expr, cloned);
    }
}
