//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// Returns true for characters allowed after the first character of a word.
const fn is_word_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Consumes the rest of a malformed word so the error span covers it.
    fn error_through_word(&mut self, message: String) -> Token {
        while self.peek().is_some_and(is_word_continue) {
            self.advance();
        }
        self.make_token(TokenKind::Error(message))
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(is_word_continue) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        Keyword::from_str(text).map_or_else(
            || self.make_token(TokenKind::Identifier(String::from(text))),
            |keyword| self.make_token(TokenKind::Keyword(keyword)),
        )
    }

    /// Scans a number: `digits` or `digits.digits`.
    fn scan_number(&mut self) -> Token {
        let mut is_real = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_real = true;
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(is_word_continue) {
            let number = &self.input[self.start..self.pos];
            return self.error_through_word(format!("Invalid number: {number} followed by a word"));
        }

        let text = String::from(&self.input[self.start..self.pos]);
        if is_real {
            self.make_token(TokenKind::Real(text))
        } else {
            self.make_token(TokenKind::Integer(text))
        }
    }

    /// Scans a single-quoted string literal.
    fn scan_string(&mut self) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some('\'') => {
                    if self.peek_next() == Some('\'') {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated string literal",
                    )));
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String(value))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '=' => self.make_token(TokenKind::Eq),

            // Potentially multi-character tokens
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::LtGt)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Error(String::from("Unexpected character: !")))
                }
            }

            '\'' => {
                self.pos = self.start; // Reset position to scan from quote
                self.scan_string()
            }
            '"' => self.make_token(TokenKind::Error(String::from(
                "Double quotes do not delimit strings; use single quotes",
            ))),

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_ascii_alphabetic() => {
                self.pos = self.start;
                self.scan_word()
            }

            '_' | '$' => self.error_through_word(format!("Identifiers cannot start with {c}")),

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    ///
    /// The result always ends with exactly one `Eof` token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(String::from(name))
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            token_kinds("foodlion x11 x11_version2 SYSTEM$TYPEOF"),
            vec![
                ident("foodlion"),
                ident("x11"),
                ident("x11_version2"),
                ident("SYSTEM$TYPEOF"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_boolean_words_lex_as_identifiers() {
        assert_eq!(
            token_kinds("true AND not x"),
            vec![
                ident("true"),
                ident("AND"),
                TokenKind::Keyword(Keyword::Not),
                ident("x"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_leading_underscore_is_error() {
        let tokens = tokenize("_hornswoggler");
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
        assert_eq!(tokens[0].span, Span::new(0, 13));
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 0 1.5 007.250"),
            vec![
                TokenKind::Integer(String::from("42")),
                TokenKind::Integer(String::from("0")),
                TokenKind::Real(String::from("1.5")),
                TokenKind::Real(String::from("007.250")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integer_then_dot() {
        assert_eq!(
            token_kinds("1."),
            vec![
                TokenKind::Integer(String::from("1")),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_followed_by_word_is_error() {
        for input in ["1y", "1.7y", "1hornswoggler", "12_3"] {
            let tokens = tokenize(input);
            assert!(
                matches!(tokens[0].kind, TokenKind::Error(_)),
                "{input} should not lex as a number"
            );
            assert_eq!(tokens[0].span, Span::new(0, input.len()));
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds("'hello' '' 'it''s'"),
            vec![
                TokenKind::String(String::from("hello")),
                TokenKind::String(String::new()),
                TokenKind::String(String::from("it's")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("'abc");
        assert!(matches!(&tokens[0].kind, TokenKind::Error(m) if m.contains("Unterminated")));
    }

    #[test]
    fn test_double_quote_is_error() {
        let tokens = tokenize("\"abc\"");
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != <> < <= > >="),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::LtGt,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("( ) , ; ."),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            token_kinds("select quogwinkle x from fun.crodscollop.hornswoggler;"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("quogwinkle"),
                ident("x"),
                TokenKind::Keyword(Keyword::From),
                ident("fun"),
                TokenKind::Dot,
                ident("crodscollop"),
                TokenKind::Dot,
                ident("hornswoggler"),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
        assert_eq!(tokens[2].span, Span::new(9, 9));
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = tokenize("a ~ b");
        assert!(matches!(&tokens[1].kind, TokenKind::Error(m) if m.contains('~')));
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }
}
