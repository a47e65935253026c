//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for the SELECT dialect that produces a
//! stream of tokens. Lexical failures are reported in-band as [`TokenKind::Error`]
//! tokens so the parser can attach them to a position.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
