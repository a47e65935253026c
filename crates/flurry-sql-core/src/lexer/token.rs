//! Token types for the SQL lexer.

use std::fmt;

use super::Span;

/// Reserved SQL keywords.
///
/// This is the complete reserved set of the dialect. A word matching one of
/// these (ignoring ASCII case) is never an identifier. The splat `*` is also
/// reserved but lexes as [`TokenKind::Star`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Is,
    Not,
    Null,
    Case,
    When,
    Then,
    Else,
    End,
    As,
    Distinct,
    All,
}

impl Keyword {
    /// Every reserved keyword, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Select,
        Self::From,
        Self::Where,
        Self::Is,
        Self::Not,
        Self::Null,
        Self::Case,
        Self::When,
        Self::Then,
        Self::Else,
        Self::End,
        Self::As,
        Self::Distinct,
        Self::All,
    ];

    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the keyword as an upper-case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Is => "IS",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::As => "AS",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Integer literal, digits kept verbatim (e.g. `42`).
    Integer(String),
    /// Real literal, `digits.digits` kept verbatim (e.g. `1.5`).
    Real(String),
    /// Single-quoted string literal, with `''` unescaped.
    String(String),

    // Words
    /// Identifier (any word that is not a reserved keyword).
    Identifier(String),
    /// Reserved keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// !=
    NotEq,
    /// <>
    LtGt,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    // Punctuation
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Lexical failure, with a description.
    Error(String),
}

impl TokenKind {
    /// Returns true if this is an identifier spelled `word` (ignoring case).
    ///
    /// Used for the contextual words `AND`, `OR`, `TRUE` and `FALSE`, which
    /// are not reserved.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Self::Identifier(name) if name.eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(text) | Self::Real(text) => write!(f, "number `{text}`"),
            Self::String(value) => write!(f, "string '{value}'"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Plus => f.write_str("`+`"),
            Self::Minus => f.write_str("`-`"),
            Self::Star => f.write_str("`*`"),
            Self::Slash => f.write_str("`/`"),
            Self::Percent => f.write_str("`%`"),
            Self::Eq => f.write_str("`=`"),
            Self::NotEq => f.write_str("`!=`"),
            Self::LtGt => f.write_str("`<>`"),
            Self::Lt => f.write_str("`<`"),
            Self::LtEq => f.write_str("`<=`"),
            Self::Gt => f.write_str("`>`"),
            Self::GtEq => f.write_str("`>=`"),
            Self::LeftParen => f.write_str("`(`"),
            Self::RightParen => f.write_str("`)`"),
            Self::Comma => f.write_str("`,`"),
            Self::Semicolon => f.write_str("`;`"),
            Self::Dot => f.write_str("`.`"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
