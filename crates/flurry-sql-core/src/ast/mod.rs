//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node implements `Display`, which renders canonical SQL that parses
//! back into an equal tree.

mod expression;
mod statement;

pub use expression::{
    ArithmeticOp, ComparisonOp, Expr, FunctionCall, Literal, LogicalOp, UnaryOp, WhenClause,
};
pub use statement::{Projection, SelectColumn, SelectModifier, SelectStatement, TableObject};
