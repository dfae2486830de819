//! Arithmetic evaluation for the calculator action.
//!
//! The grammar accepts numbers, `+ - * /`, unary signs and parentheses:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('+' | '-') factor | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression nested too deeply")]
    TooDeep,
    #[error("result is not a finite number")]
    NonFinite,
}

/// Keeps only digits and `+-*/().`, the characters the evaluator understands.
pub fn sanitize_expression(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect()
}

pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    if expression.trim().is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        chars: expression.chars().filter(|c| !c.is_whitespace()).collect(),
        position: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(&found) = parser.chars.get(parser.position) {
        if found == ')' {
            return Err(CalcError::UnbalancedParens);
        }
        return Err(CalcError::UnexpectedChar {
            found,
            position: parser.position,
        });
    }
    if !value.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(value)
}

/// Renders a result the way it is copied to the clipboard: integral values
/// carry no fractional part, negative zero prints as `0`, and magnitudes
/// outside `[1e-7, 1e21)` switch to exponent form with a signed exponent
/// (`1e+21`, `1.5e-8`).
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-7..1e21).contains(&magnitude) {
        let exponent_form = format!("{value:e}");
        return match exponent_form.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => exponent_form,
        };
    }
    format!("{value}")
}

struct Parser {
    chars: Vec<char>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.position += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.position += 1;
            let rhs = self.factor()?;
            if op == '*' {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(sign @ ('+' | '-')) => {
                self.position += 1;
                let value = self.nested(Self::factor)?;
                Ok(if sign == '-' { -value } else { value })
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            None => Err(CalcError::UnexpectedEnd),
            Some('(') => {
                self.position += 1;
                let value = self.nested(Self::expr)?;
                if self.peek() != Some(')') {
                    return Err(CalcError::UnbalancedParens);
                }
                self.position += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(found) => Err(CalcError::UnexpectedChar {
                found,
                position: self.position,
            }),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.position += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.position].iter().collect();
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(CalcError::MalformedNumber(literal));
        }
        literal
            .parse::<f64>()
            .map_err(|_| CalcError::MalformedNumber(literal))
    }

    fn nested(&mut self, rule: fn(&mut Self) -> Result<f64, CalcError>) -> Result<f64, CalcError> {
        if self.depth >= MAX_NESTING {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = rule(self);
        self.depth -= 1;
        value
    }
}
