//! Tests for arithmetic, comparison, and boolean expressions.

mod common;
use common::*;

use flurry_sql_core::ast::{ArithmeticOp, ComparisonOp, Expr, LogicalOp, UnaryOp};

// ===================================================================
// Arithmetic
// ===================================================================

#[test]
fn arithmetic_precedence() {
    let expected = Expr::integer("1").binary(
        ArithmeticOp::Add,
        Expr::integer("2").binary(ArithmeticOp::Mul, Expr::integer("3")),
    );
    assert_eq!(parse_expr("1+2*3"), expected);
}

#[test]
fn arithmetic_explicit_grouping() {
    let expected = Expr::integer("1")
        .binary(ArithmeticOp::Add, Expr::integer("2"))
        .binary(ArithmeticOp::Mul, Expr::integer("3"));
    assert_eq!(parse_expr("(1+2)*3"), expected);
}

#[test]
fn arithmetic_left_associative() {
    let expected = Expr::integer("8")
        .binary(ArithmeticOp::Sub, Expr::integer("4"))
        .binary(ArithmeticOp::Sub, Expr::integer("2"));
    assert_eq!(parse_expr("8 - 4 - 2"), expected);
}

#[test]
fn arithmetic_modulo_and_division() {
    assert!(matches!(
        parse_expr("a % 2"),
        Expr::Binary {
            op: ArithmeticOp::Mod,
            ..
        }
    ));
    assert!(matches!(
        parse_expr("a / b * c"),
        Expr::Binary {
            op: ArithmeticOp::Mul,
            ..
        }
    ));
}

#[test]
fn unary_minus() {
    assert_eq!(
        parse_expr("-x"),
        Expr::unary(UnaryOp::Neg, Expr::identifier("x"))
    );
    let expected = Expr::unary(UnaryOp::Neg, Expr::integer("1"))
        .binary(ArithmeticOp::Add, Expr::integer("2"));
    assert_eq!(parse_expr("-1 + 2"), expected);
}

#[test]
fn unbalanced_parentheses() {
    assert!(rejects("select (1+1;"));
    assert!(rejects("select 1+1);"));
    assert!(rejects("select ((1);"));
}

#[test]
fn dangling_operator() {
    assert!(rejects("select 1 +;"));
    assert!(rejects("select * 2;"));
}

#[test]
fn function_in_arithmetic() {
    let e = parse_expr("abs(x) + 1");
    let Expr::Binary { left, op, .. } = e else {
        panic!("Expected binary expression");
    };
    assert_eq!(op, ArithmeticOp::Add);
    assert!(matches!(*left, Expr::Function(_)));
}

#[test]
fn arithmetic_round_trip() {
    round_trip("select 1 + 2 * 3, (1 + 2) * 3, 1 - (2 - 3), -(a + b), - -1 from t;");
}

// ===================================================================
// Comparison
// ===================================================================

#[test]
fn comparison_operators() {
    for (sql, op) in [
        ("a = 1", ComparisonOp::Eq),
        ("a != 1", ComparisonOp::NotEq),
        ("a <> 1", ComparisonOp::LtGt),
        ("a < 1", ComparisonOp::Lt),
        ("a <= 1", ComparisonOp::LtEq),
        ("a > 1", ComparisonOp::Gt),
        ("a >= 1", ComparisonOp::GtEq),
    ] {
        assert_eq!(
            parse_expr(sql),
            Expr::identifier("a").compare(op, Expr::integer("1")),
            "{sql}"
        );
    }
}

#[test]
fn comparison_of_arithmetic() {
    let expected = Expr::identifier("a")
        .binary(ArithmeticOp::Add, Expr::integer("1"))
        .compare(ComparisonOp::Gt, Expr::identifier("b"));
    assert_eq!(parse_expr("a + 1 > b"), expected);
}

#[test]
fn comparison_is_not_chained() {
    assert!(rejects("select a < b < c;"));
}

#[test]
fn is_null() {
    assert_eq!(parse_expr("x is null"), Expr::identifier("x").is_null());
    assert_eq!(parse_expr("x IS NOT NULL"), Expr::identifier("x").is_not_null());
    assert!(rejects("select x is;"));
    assert!(rejects("select x is not;"));
}

#[test]
fn comparison_round_trip() {
    round_trip("select a <> 1, b != 2, c >= d + 1, e IS NOT NULL from t;");
}

// ===================================================================
// Boolean
// ===================================================================

#[test]
fn and_binds_tighter_than_or() {
    let expected = Expr::identifier("a").or(Expr::identifier("b").and(Expr::identifier("c")));
    assert_eq!(parse_expr("a or b and c"), expected);
}

#[test]
fn not_binds_tighter_than_and() {
    let expected = Expr::identifier("a").not().and(Expr::identifier("b"));
    assert_eq!(parse_expr("not a and b"), expected);
}

#[test]
fn boolean_literals() {
    let expected = Expr::boolean(true).and(Expr::boolean(false));
    assert_eq!(parse_expr("TRUE and false"), expected);
    assert_eq!(parse_expr("not true"), Expr::boolean(true).not());
}

#[test]
fn boolean_over_comparisons() {
    let expected = Expr::identifier("x")
        .compare(ComparisonOp::Eq, Expr::integer("1"))
        .or(Expr::identifier("y").is_null());
    assert_eq!(parse_expr("x = 1 OR y IS NULL"), expected);
}

#[test]
fn parenthesized_boolean() {
    let expected = Expr::identifier("a")
        .or(Expr::identifier("b"))
        .and(Expr::identifier("c"));
    assert_eq!(parse_expr("(a or b) and c"), expected);
    assert!(matches!(
        parse_expr("not (a or b)"),
        Expr::Not(inner) if matches!(*inner, Expr::Logical { op: LogicalOp::Or, .. })
    ));
}

#[test]
fn boolean_round_trip() {
    round_trip("select (a OR b) AND c, NOT (x = 1 AND y), a AND (b AND c), NOT NOT z from t;");
}

#[test]
fn dangling_connective() {
    // `select a and;` is legal: `and` is taken as a bare alias.
    assert!(accepts("select a and;"));
    assert!(rejects("select a and 1;"));
    assert!(rejects("select not;"));
}
