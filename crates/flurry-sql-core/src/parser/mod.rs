//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.

mod error;
mod parser;
mod pratt;

use tracing::debug;

use crate::ast::{Expr, SelectStatement};

pub use error::{ParseError, ParseErrorKind};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};

/// Parses a document of one or more `;`-terminated SELECT statements.
///
/// # Errors
///
/// Returns the furthest failure if any part of the document is malformed.
pub fn parse_sql(input: &str) -> Result<Vec<SelectStatement>, ParseError> {
    let result = Parser::new(input).parse_statements();
    match &result {
        Ok(statements) => debug!(
            input_len = input.len(),
            statements = statements.len(),
            "parsed document"
        ),
        Err(err) => debug!(
            input_len = input.len(),
            offset = err.span.start,
            "rejected document"
        ),
    }
    result
}

/// Parses a single standalone expression.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not exactly one expression.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).complete(Parser::expression)
}
