//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// What caused a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No grammar alternative could proceed.
    Syntax,
    /// The input contains text that is not a token (e.g. `1y`, `"x"`).
    Lexical,
    /// Expressions are nested deeper than the parser's limit.
    DepthLimit,
}

/// A parse error.
///
/// This is the only failure the parser reports. It describes the furthest
/// point the parser reached, and which tokens would have let it continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The cause of the error.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Descriptions of what would have been accepted here.
    pub expected: Vec<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    ///
    /// A lexical error token produces a [`ParseErrorKind::Lexical`] error
    /// carrying the lexer's description.
    #[must_use]
    pub fn unexpected(expected: Vec<String>, found: TokenKind, span: Span) -> Self {
        let (kind, message) = match &found {
            TokenKind::Error(message) => (ParseErrorKind::Lexical, message.clone()),
            _ => (ParseErrorKind::Syntax, describe(&expected, &found)),
        };
        Self {
            kind,
            message,
            span,
            expected,
            found: Some(found),
        }
    }

    /// Creates the error reported when nesting exceeds `limit`.
    #[must_use]
    pub fn depth_limit(limit: usize, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::DepthLimit,
            message: format!("nesting depth limit exceeded (limit {limit})"),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Returns true if this error was caused by the nesting limit.
    #[must_use]
    pub const fn is_depth_limit(&self) -> bool {
        matches!(self.kind, ParseErrorKind::DepthLimit)
    }

    /// Folds the expectations of another failure at the same position into this one.
    pub fn merge(&mut self, other: Self) {
        for item in other.expected {
            if !self.expected.contains(&item) {
                self.expected.push(item);
            }
        }
        if self.kind == ParseErrorKind::Syntax {
            if let Some(found) = &self.found {
                self.message = describe(&self.expected, found);
            }
        }
    }
}

/// Builds "Expected a, b or c, found x".
fn describe(expected: &[String], found: &TokenKind) -> String {
    let alternatives = match expected {
        [] => String::from("something else"),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    };
    format!("Expected {alternatives}, found {found}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn test_unexpected_message() {
        let err = ParseError::unexpected(strings(&["`)`"]), TokenKind::Comma, Span::new(8, 9));
        assert_eq!(err.to_string(), "Expected `)`, found `,` at position 8..9");
        assert_eq!(err.kind, ParseErrorKind::Syntax);
    }

    #[test]
    fn test_lexical_error() {
        let found = TokenKind::Error(String::from("Unterminated string literal"));
        let err = ParseError::unexpected(strings(&["expression"]), found, Span::new(7, 11));
        assert_eq!(err.kind, ParseErrorKind::Lexical);
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_merge_unions_expected() {
        let mut err = ParseError::unexpected(strings(&["identifier"]), TokenKind::Eof, Span::point(6));
        err.merge(ParseError::unexpected(
            strings(&["number", "identifier", "`(`"]),
            TokenKind::Eof,
            Span::point(6),
        ));
        assert_eq!(err.expected, strings(&["identifier", "number", "`(`"]));
        assert_eq!(
            err.message,
            "Expected identifier, number or `(`, found end of input"
        );
    }

    #[test]
    fn test_depth_limit() {
        let err = ParseError::depth_limit(4, Span::new(3, 4));
        assert!(err.is_depth_limit());
        assert!(err.to_string().contains("nesting depth limit exceeded"));
    }
}
