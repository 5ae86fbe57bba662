//! Arithmetic evaluator for Spotlight's inline calculator.
//!
//! Grammar (whitespace ignored):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("operand followed by more input")]
    TrailingInput,
    #[error("unbalanced parentheses")]
    Unbalanced,
    #[error("result is not a finite number")]
    NotFinite,
    #[error("expression nests deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Nesting allowed for parentheses and unary signs combined.
pub const MAX_DEPTH: usize = 64;

/// Returns `true` when `query` looks like arithmetic: only digits, operators, parentheses, dots and
/// whitespace, with at least one digit.
pub fn looks_like_arithmetic(query: &str) -> bool {
    query.chars().any(|c| c.is_ascii_digit())
        && query
            .chars()
            .all(|c| c.is_ascii_digit() || "+-*/(). ".contains(c) || c.is_whitespace())
}

pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => {}
        Some(Token::Close) => return Err(CalcError::Unbalanced),
        Some(_) => return Err(CalcError::TrailingInput),
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}

pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }

    let mut text = format!("{value:.12}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
    Open,
    Close,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::MalformedNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '+' | '-' | '*' | '/' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            other => return Err(CalcError::UnexpectedChar(other)),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().copied() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek().copied() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = self.factor_inner();
        self.depth -= 1;
        value
    }

    fn factor_inner(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Op('+')) => self.factor(),
            Some(Token::Op('-')) => Ok(-self.factor()?),
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(CalcError::Unbalanced),
                }
            }
            Some(Token::Close) => Err(CalcError::Unbalanced),
            Some(Token::Op(op)) => Err(CalcError::UnexpectedChar(op)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("10 / 4"), Ok(2.5));
        assert_eq!(evaluate("-(3 - 5)"), Ok(2.0));
        assert_eq!(evaluate(" .5 + 1."), Ok(1.5));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(evaluate("2 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(2 + 3"), Err(CalcError::Unbalanced));
        assert_eq!(evaluate("2 + 3)"), Err(CalcError::Unbalanced));
        assert_eq!(evaluate("2 (3)"), Err(CalcError::TrailingInput));
        assert_eq!(
            evaluate("1.2.3"),
            Err(CalcError::MalformedNumber("1.2.3".to_string()))
        );
        assert_eq!(evaluate("alert(1)"), Err(CalcError::UnexpectedChar('a')));
    }

    #[test]
    fn division_by_zero_is_not_a_result() {
        assert_eq!(evaluate("1 / 0"), Err(CalcError::NotFinite));
        assert_eq!(evaluate("0 / 0"), Err(CalcError::NotFinite));
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(evaluate(&nested(MAX_DEPTH - 1)), Ok(1.0));
        assert_eq!(evaluate(&nested(20_000)), Err(CalcError::TooDeep));
        assert_eq!(evaluate(&format!("{}1", "-".repeat(20_000))), Err(CalcError::TooDeep));
        assert_eq!(evaluate("--1"), Ok(1.0));
    }

    #[test]
    fn arithmetic_detection_requires_a_digit() {
        assert!(looks_like_arithmetic("12 * (3 + 4)"));
        assert!(!looks_like_arithmetic("( + )"));
        assert!(!looks_like_arithmetic("notes"));
        assert!(!looks_like_arithmetic("2 ** x"));
    }

    #[test]
    fn formatting_trims_float_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(-2.5), "-2.5");
    }
}
