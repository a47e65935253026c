//! Binding powers for the arithmetic and boolean operator layers.
//!
//! The two layers are parsed by separate Pratt loops, so their powers only
//! need to be ordered within a layer.

use crate::ast::{ArithmeticOp, ComparisonOp, LogicalOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the operand of unary `+`/`-`; tighter than any infix operator.
pub const UNARY_BP: u8 = 5;

/// Binding power of the operand of `NOT`; tighter than `AND` and `OR`.
pub const NOT_BP: u8 = 5;

/// Returns `(left_bp, right_bp)` for an arithmetic operator.
///
/// All arithmetic operators are left associative (`left_bp < right_bp`).
#[must_use]
pub const fn arithmetic_binding_power(op: ArithmeticOp) -> (u8, u8) {
    match op {
        ArithmeticOp::Add | ArithmeticOp::Sub => (1, 2),
        ArithmeticOp::Mul | ArithmeticOp::Div | ArithmeticOp::Mod => (3, 4),
    }
}

/// Returns `(left_bp, right_bp)` for a boolean connective.
#[must_use]
pub const fn logical_binding_power(op: LogicalOp) -> (u8, u8) {
    match op {
        LogicalOp::Or => (1, 2),
        LogicalOp::And => (3, 4),
    }
}

/// Converts a token to an infix arithmetic operator.
#[must_use]
pub const fn token_to_arithmetic_op(kind: &TokenKind) -> Option<ArithmeticOp> {
    match kind {
        TokenKind::Plus => Some(ArithmeticOp::Add),
        TokenKind::Minus => Some(ArithmeticOp::Sub),
        TokenKind::Star => Some(ArithmeticOp::Mul),
        TokenKind::Slash => Some(ArithmeticOp::Div),
        TokenKind::Percent => Some(ArithmeticOp::Mod),
        _ => None,
    }
}

/// Converts a token to a unary arithmetic operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Neg),
        _ => None,
    }
}

/// Converts a token to a comparison operator.
#[must_use]
pub const fn token_to_comparison_op(kind: &TokenKind) -> Option<ComparisonOp> {
    match kind {
        TokenKind::Eq => Some(ComparisonOp::Eq),
        TokenKind::NotEq => Some(ComparisonOp::NotEq),
        TokenKind::LtGt => Some(ComparisonOp::LtGt),
        TokenKind::Lt => Some(ComparisonOp::Lt),
        TokenKind::LtEq => Some(ComparisonOp::LtEq),
        TokenKind::Gt => Some(ComparisonOp::Gt),
        TokenKind::GtEq => Some(ComparisonOp::GtEq),
        _ => None,
    }
}

/// Converts a token to a boolean connective.
///
/// `AND` and `OR` are not reserved, so they arrive as identifiers.
#[must_use]
pub fn token_to_logical_op(kind: &TokenKind) -> Option<LogicalOp> {
    if kind.is_word("AND") {
        Some(LogicalOp::And)
    } else if kind.is_word("OR") {
        Some(LogicalOp::Or)
    } else {
        None
    }
}

/// Returns true if the token is the prefix `NOT` keyword.
#[must_use]
pub const fn is_not(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Keyword(Keyword::Not))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = arithmetic_binding_power(ArithmeticOp::Add);
        let mul_bp = arithmetic_binding_power(ArithmeticOp::Mul);
        assert!(mul_bp.0 > add_bp.0);
        assert!(UNARY_BP > mul_bp.1);

        // AND should bind tighter than OR, NOT tighter than both
        let and_bp = logical_binding_power(LogicalOp::And);
        let or_bp = logical_binding_power(LogicalOp::Or);
        assert!(and_bp.0 > or_bp.0);
        assert!(NOT_BP > and_bp.1);
    }

    #[test]
    fn test_left_associativity() {
        for op in [ArithmeticOp::Add, ArithmeticOp::Mod] {
            let (left, right) = arithmetic_binding_power(op);
            assert!(left < right);
        }
        let (left, right) = logical_binding_power(LogicalOp::And);
        assert!(left < right);
    }

    #[test]
    fn test_token_conversions() {
        assert_eq!(token_to_arithmetic_op(&TokenKind::Percent), Some(ArithmeticOp::Mod));
        assert_eq!(token_to_arithmetic_op(&TokenKind::Eq), None);
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(UnaryOp::Neg));
        assert_eq!(token_to_comparison_op(&TokenKind::LtGt), Some(ComparisonOp::LtGt));
        assert_eq!(
            token_to_logical_op(&TokenKind::Identifier(String::from("or"))),
            Some(LogicalOp::Or)
        );
        assert_eq!(token_to_logical_op(&TokenKind::Identifier(String::from("x"))), None);
        assert!(is_not(&TokenKind::Keyword(Keyword::Not)));
    }
}
