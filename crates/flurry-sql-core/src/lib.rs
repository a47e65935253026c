//! # flurry-sql-core
//!
//! A parser for a small SQL SELECT dialect with a fixed built-in function
//! catalog.
//!
//! This crate provides:
//! - A hand-written lexer with byte-offset spans
//! - A recursive descent parser with Pratt expression parsing
//! - A catalog of built-in functions whose arity is checked while parsing
//! - An AST that prints back to canonical SQL
//!
//! ## Parsing
//!
//! ```rust
//! use flurry_sql_core::parse_sql;
//!
//! let statements = parse_sql("select distinct abs(x) as a, y from db.s.t;").unwrap();
//! assert_eq!(statements.len(), 1);
//! assert_eq!(
//!     statements[0].to_string(),
//!     "SELECT DISTINCT ABS(x) AS a, y FROM db.s.t;"
//! );
//! ```
//!
//! ## Arity Checking
//!
//! Calls are matched against the catalog, so a wrong argument count is a
//! syntax error rather than something to check later:
//!
//! ```rust
//! use flurry_sql_core::parse_sql;
//!
//! assert!(parse_sql("select ceil(1, 2);").is_ok());
//! assert!(parse_sql("select ceil(1, 2, 3);").is_err());
//! assert!(parse_sql("select current_date;").is_ok());
//! ```

pub mod ast;
pub mod catalog;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, SelectStatement};
pub use catalog::CallShape;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{parse_expression, parse_sql, ParseError, ParseErrorKind, Parser};
