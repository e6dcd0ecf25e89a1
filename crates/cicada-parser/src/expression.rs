//! Expression parser
//!
//! Parses trigger expressions into [`Expression`] trees via a hand-rolled
//! lexer and recursive descent.
//!
//! Supported syntax:
//! - Field paths: `action`, `hook.sha`
//! - Literals: `'opened'`, `"opened"`, `42`, `3.5`, `true`, `false`
//! - Comparison: `==`, `!=`
//! - Logical: `&&`, `||`, `!` (highest precedence, then `&&`, then `||`)
//! - Parentheses for grouping
//!
//! Parameter binding sources use the restricted form: a bare field path or
//! a single literal.

use crate::error::{ParseError, Result};
use cicada_core::ast::{Expression, Operator, UnaryOperator};
use cicada_core::Value;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse a boolean trigger expression
    pub fn parse_trigger(input: &str) -> Result<Expression> {
        let mut parser = Parser::new(input)?;
        let expr = parser.parse_or()?;
        parser.expect_end()?;
        Ok(expr)
    }

    /// Parse a parameter binding source: a bare field path or a literal
    pub fn parse_value_source(input: &str) -> Result<Expression> {
        let tokens = lex(input)?;
        match tokens.as_slice() {
            [Token::Path(path)] => Ok(Expression::field_access(path.clone())),
            [Token::Str(s)] => Ok(Expression::literal(Value::String(s.clone()))),
            [Token::Number(n)] => Ok(Expression::literal(Value::Number(*n))),
            [Token::True] => Ok(Expression::literal(Value::Bool(true))),
            [Token::False] => Ok(Expression::literal(Value::Bool(false))),
            [] => Err(syntax_error(input, "empty expression")),
            _ => Err(syntax_error(
                input,
                "a parameter source must be a field path or a literal",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Path(Vec<String>),
    Str(String),
    Number(f64),
    True,
    False,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Bang,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Path(path) => format!("'{}'", path.join(".")),
            Token::Str(s) => format!("'{}'", s),
            Token::Number(n) => format!("'{}'", n),
            Token::True => "'true'".to_string(),
            Token::False => "'false'".to_string(),
            Token::EqEq => "'=='".to_string(),
            Token::NotEq => "'!='".to_string(),
            Token::AndAnd => "'&&'".to_string(),
            Token::OrOr => "'||'".to_string(),
            Token::Bang => "'!'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn syntax_error(source: &str, message: impl Into<String>) -> ParseError {
    ParseError::ExpressionSyntax {
        expression: source.trim().to_string(),
        message: message.into(),
    }
}

fn lex(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '=' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::EqEq);
                    i += 2;
                } else {
                    return Err(syntax_error(input, "expected '==' after '='"));
                }
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::NotEq);
                    i += 2;
                } else {
                    tokens.push(Token::Bang);
                    i += 1;
                }
            }
            '&' => {
                if chars.get(i + 1) == Some(&'&') {
                    tokens.push(Token::AndAnd);
                    i += 2;
                } else {
                    return Err(syntax_error(input, "expected '&&' after '&'"));
                }
            }
            '|' => {
                if chars.get(i + 1) == Some(&'|') {
                    tokens.push(Token::OrOr);
                    i += 2;
                } else {
                    return Err(syntax_error(input, "expected '||' after '|'"));
                }
            }
            '\'' | '"' => {
                let quote = c;
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end] != quote {
                    end += 1;
                }
                if end >= chars.len() {
                    return Err(syntax_error(input, "unterminated string literal"));
                }
                tokens.push(Token::Str(chars[start..end].iter().collect()));
                i = end + 1;
            }
            c if c.is_ascii_digit() || (c == '-' && next_is_digit(&chars, i)) => {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let number = text
                    .parse::<f64>()
                    .map_err(|_| syntax_error(input, format!("invalid number '{}'", text)))?;
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut segments = Vec::new();
                loop {
                    let start = i;
                    while i < chars.len() && is_ident_char(chars[i]) {
                        i += 1;
                    }
                    segments.push(chars[start..i].iter().collect::<String>());
                    // a dot continues the path only when an identifier follows
                    if chars.get(i) == Some(&'.') && next_is_ident_start(&chars, i) {
                        i += 1;
                    } else {
                        break;
                    }
                }
                if chars.get(i) == Some(&'.') {
                    return Err(syntax_error(input, "field path ends with '.'"));
                }
                match segments.as_slice() {
                    [s] if s == "true" => tokens.push(Token::True),
                    [s] if s == "false" => tokens.push(Token::False),
                    _ => tokens.push(Token::Path(segments)),
                }
            }
            other => {
                return Err(syntax_error(input, format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

fn next_is_ident_start(chars: &[char], i: usize) -> bool {
    chars
        .get(i + 1)
        .is_some_and(|c| c.is_ascii_alphabetic() || *c == '_')
}

struct Parser {
    source: String,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        let tokens = lex(input)?;
        if tokens.is_empty() {
            return Err(syntax_error(input, "empty expression"));
        }
        Ok(Self {
            source: input.trim().to_string(),
            tokens,
            pos: 0,
        })
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::ExpressionSyntax {
            expression: self.source.clone(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(self.err(format!("unexpected {}", token.describe()))),
        }
    }

    // or_expr := and_expr ( '||' and_expr )*
    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        Ok(left)
    }

    // and_expr := equality ( '&&' equality )*
    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.parse_equality()?;
            left = Expression::binary(left, Operator::And, right);
        }
        Ok(left)
    }

    // equality := unary ( ('==' | '!=') unary )*
    fn parse_equality(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.eat(&Token::EqEq) {
                Operator::Eq
            } else if self.eat(&Token::NotEq) {
                Operator::Ne
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    // unary := '!' unary | primary
    fn parse_unary(&mut self) -> Result<Expression> {
        if self.eat(&Token::Bang) {
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(UnaryOperator::Not, operand));
        }
        self.parse_primary()
    }

    // primary := literal | path | '(' or_expr ')'
    fn parse_primary(&mut self) -> Result<Expression> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.err("unexpected end of expression")),
        };
        self.pos += 1;

        match token {
            Token::Path(path) => Ok(Expression::field_access(path)),
            Token::Str(s) => Ok(Expression::literal(Value::String(s))),
            Token::Number(n) => Ok(Expression::literal(Value::Number(n))),
            Token::True => Ok(Expression::literal(Value::Bool(true))),
            Token::False => Ok(Expression::literal(Value::Bool(false))),
            Token::LParen => {
                let expr = self.parse_or()?;
                if !self.eat(&Token::RParen) {
                    return Err(self.err("expected ')'"));
                }
                Ok(expr)
            }
            other => Err(self.err(format!("unexpected {}", other.describe()))),
        }
    }
}
