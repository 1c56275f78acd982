// File: src/expression.rs
//
// Recursive descent expression evaluator for the Rill language.
//
// Expressions are parsed and evaluated in a single pass: each routine
// consumes tokens from the front of the shared cursor and produces a value
// directly, with no intermediate tree. Standard precedence, left to right:
//
//   arith  := term (('+' | '-') term)*
//   term   := factor (('*' | '/') factor)*
//   factor := INT | IDENT | '(' arith ')' | '-' factor
//
// Comparisons are a separate, non-nestable layer: exactly one arithmetic
// expression, one comparison operator, one arithmetic expression.

use crate::cursor::TokenCursor;
use crate::errors::{ErrorKind, RillError};
use crate::interpreter::Environment;
use crate::lexer::TokenKind;

/// Parse and evaluate one arithmetic expression from the cursor
pub fn parse_arithmetic(cursor: &mut TokenCursor, env: &Environment) -> Result<i64, RillError> {
    let mut value = parse_term(cursor, env)?;
    while let Some(next) = cursor.peek() {
        if next.kind != TokenKind::Punctuation {
            break;
        }
        match next.text.as_str() {
            "+" => {
                cursor.pop()?;
                value = value.wrapping_add(parse_term(cursor, env)?);
            }
            "-" => {
                cursor.pop()?;
                value = value.wrapping_sub(parse_term(cursor, env)?);
            }
            _ => break,
        }
    }
    Ok(value)
}

/// Parse and evaluate one comparison: `arith ('>'|'<'|'=='|'!=') arith`
pub fn parse_comparison(cursor: &mut TokenCursor, env: &Environment) -> Result<bool, RillError> {
    let left = parse_arithmetic(cursor, env)?;
    let op = cursor.pop()?;
    if op.kind != TokenKind::Punctuation || !matches!(op.text.as_str(), ">" | "<" | "==" | "!=") {
        return Err(RillError::unexpected_token(&op, "a comparison operator ('>', '<', '==' or '!=')"));
    }
    let right = parse_arithmetic(cursor, env)?;
    Ok(match op.text.as_str() {
        ">" => left > right,
        "<" => left < right,
        "==" => left == right,
        _ => left != right,
    })
}

fn parse_term(cursor: &mut TokenCursor, env: &Environment) -> Result<i64, RillError> {
    let mut value = parse_factor(cursor, env)?;
    while let Some(next) = cursor.peek() {
        if next.kind != TokenKind::Punctuation {
            break;
        }
        match next.text.as_str() {
            "*" => {
                cursor.pop()?;
                value = value.wrapping_mul(parse_factor(cursor, env)?);
            }
            "/" => {
                let op = cursor.pop()?;
                let divisor = parse_factor(cursor, env)?;
                if divisor == 0 {
                    return Err(RillError::division_by_zero(op.location()));
                }
                value = value.wrapping_div(divisor);
            }
            _ => break,
        }
    }
    Ok(value)
}

fn parse_factor(cursor: &mut TokenCursor, env: &Environment) -> Result<i64, RillError> {
    let token = cursor.pop()?;
    match token.kind {
        TokenKind::Integer => token.text.parse::<i64>().map_err(|_| {
            RillError::new(
                ErrorKind::UnexpectedToken,
                format!("Integer literal '{}' is out of range", token.text),
                token.location(),
            )
        }),
        TokenKind::Identifier => env
            .get(&token.text)
            .ok_or_else(|| RillError::undefined_variable(&token.text, token.location(), &env.names())),
        TokenKind::Punctuation if token.text == "(" => {
            let value = parse_arithmetic(cursor, env)?;
            let close = cursor.pop()?;
            if !close.is_punct(")") {
                return Err(RillError::unexpected_token(&close, "')'"));
            }
            Ok(value)
        }
        TokenKind::Punctuation if token.text == "-" => {
            Ok(parse_factor(cursor, env)?.wrapping_neg())
        }
        _ => Err(RillError::unexpected_token(&token, "an integer, a variable, '(' or '-'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn eval(source: &str, env: &Environment) -> Result<i64, RillError> {
        let tokens = tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        let mut cursor = TokenCursor::new(tokens);
        parse_arithmetic(&mut cursor, env)
    }

    fn eval_bool(source: &str, env: &Environment) -> Result<bool, RillError> {
        let tokens = tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        let mut cursor = TokenCursor::new(tokens);
        parse_comparison(&mut cursor, env)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let env = Environment::new();
        assert_eq!(eval("2 + 3 * 4", &env).unwrap(), 14);
        assert_eq!(eval("(2 + 3) * 4", &env).unwrap(), 20);
    }

    #[test]
    fn same_precedence_is_left_associative() {
        let env = Environment::new();
        assert_eq!(eval("10 - 3 - 2", &env).unwrap(), 5);
        assert_eq!(eval("20 / 2 / 5", &env).unwrap(), 2);
    }

    #[test]
    fn integer_division_truncates() {
        let env = Environment::new();
        assert_eq!(eval("7 / 2", &env).unwrap(), 3);
        assert_eq!(eval("-7 / 2", &env).unwrap(), -3);
    }

    #[test]
    fn unary_minus_applies_to_factors() {
        let env = Environment::new();
        assert_eq!(eval("-5 + 3", &env).unwrap(), -2);
        assert_eq!(eval("2 * -3", &env).unwrap(), -6);
        assert_eq!(eval("--4", &env).unwrap(), 4);
    }

    #[test]
    fn identifiers_are_looked_up_in_the_environment() {
        let mut env = Environment::new();
        env.set("x".to_string(), 6);
        assert_eq!(eval("x * 7", &env).unwrap(), 42);
    }

    #[test]
    fn undefined_variable_is_reported() {
        let env = Environment::new();
        let err = eval("y + 1", &env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable);
    }

    #[test]
    fn division_by_zero_is_an_error_not_a_crash() {
        let env = Environment::new();
        let err = eval("1 / 0", &env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn comparisons_evaluate_both_sides() {
        let mut env = Environment::new();
        env.set("n".to_string(), 4);
        assert!(eval_bool("n * 2 < 10", &env).unwrap());
        assert!(eval_bool("n + 1 == 5", &env).unwrap());
        assert!(eval_bool("n != 5", &env).unwrap());
        assert!(!eval_bool("n > 4", &env).unwrap());
    }

    #[test]
    fn missing_comparison_operator_is_unexpected_token() {
        let env = Environment::new();
        let err = eval_bool("1 + 2", &env).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedToken | ErrorKind::EmptyCursor));
    }

    #[test]
    fn stray_token_where_expression_expected() {
        let env = Environment::new();
        let err = eval("* 3", &env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }
}
