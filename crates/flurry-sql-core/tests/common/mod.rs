#![allow(dead_code)]

use flurry_sql_core::ast::{Expr, SelectStatement};
use flurry_sql_core::{parse_expression, parse_sql, ParseError};

pub fn parse(sql: &str) -> Vec<SelectStatement> {
    parse_sql(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    let mut statements = parse(sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_sql(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_expr(sql: &str) -> Expr {
    parse_expression(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_expr_err(sql: &str) -> ParseError {
    parse_expression(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn accepts(sql: &str) -> bool {
    parse_sql(sql).is_ok()
}

pub fn rejects(sql: &str) -> bool {
    parse_sql(sql).is_err()
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() re-parses into an equal tree that
/// renders to the same string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1: String = ast1.iter().map(ToString::to_string).collect();
    let ast2 = parse(&rendered1);
    let rendered2: String = ast2.iter().map(ToString::to_string).collect();
    assert_eq!(ast1, ast2, "Re-parsed tree differs for: {sql}");
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
