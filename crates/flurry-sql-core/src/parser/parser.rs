//! SQL Parser implementation.
//!
//! The parser works over a fully tokenized buffer with a movable cursor, so an
//! alternative that fails part way can be abandoned by resetting the cursor.
//! Grammar rules are plain methods that call each other recursively; the
//! cycle between expressions and function arguments needs no special wiring.

use std::collections::HashMap;

use tracing::trace;

use super::error::ParseError;
use super::pratt::{
    arithmetic_binding_power, is_not, logical_binding_power, token_to_arithmetic_op,
    token_to_comparison_op, token_to_logical_op, token_to_unary_op, NOT_BP, UNARY_BP,
};
use crate::ast::{
    Expr, FunctionCall, Literal, Projection, SelectColumn, SelectModifier, SelectStatement,
    TableObject, WhenClause,
};
use crate::catalog::{self, Parens};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Default limit on how deeply rules may recurse into each other.
pub const DEFAULT_MAX_DEPTH: usize = 128;

type PResult<T> = Result<T, ParseError>;

/// A rule parsing one alternative of the root expression.
type ExprRule = fn(&mut Parser) -> PResult<Expr>;

/// SQL Parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    /// Failure at the largest offset seen so far.
    furthest: Option<ParseError>,
    /// Depth limit hit; aborts every remaining alternative.
    fatal: Option<ParseError>,
    /// Function calls already parsed, by starting token, with the end position.
    calls: HashMap<usize, PResult<(FunctionCall, usize)>>,
}

impl Parser {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            tokens: Lexer::new(input).tokenize(),
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            furthest: None,
            fatal: None,
            calls: HashMap::new(),
        }
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// Runs `rule` and requires that it consumes the whole input.
    ///
    /// # Errors
    ///
    /// Returns the furthest failure reached if the rule fails or leaves input
    /// unconsumed.
    pub fn complete<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let result = rule(self).and_then(|value| {
            if self.is_at_end() {
                Ok(value)
            } else {
                self.error(&["end of input"])
            }
        });
        result.map_err(|err| self.report(err))
    }

    /// Parses one or more statements up to the end of input.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if any statement is malformed; nothing is returned
    /// for the statements before it.
    pub fn parse_statements(&mut self) -> PResult<Vec<SelectStatement>> {
        self.complete(|p| {
            let mut statements = vec![p.select_statement()?];
            while !p.is_at_end() {
                statements.push(p.select_statement()?);
            }
            Ok(statements)
        })
    }

    // --- Statements ---

    /// Parses `SELECT [DISTINCT | ALL] (* | columns) [FROM table] ;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SELECT statement.
    pub fn select_statement(&mut self) -> PResult<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;

        let modifier = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            Some(SelectModifier::Distinct)
        } else if self.check_keyword(Keyword::All) {
            self.advance();
            Some(SelectModifier::All)
        } else {
            None
        };

        let projection = if self.check(&TokenKind::Star) {
            self.advance();
            Projection::Wildcard
        } else {
            Projection::Columns(self.column_list()?)
        };

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.table_object()?)
        } else {
            None
        };

        if !self.check(&TokenKind::Semicolon) {
            return match (&projection, &from) {
                (Projection::Columns(_), None) => self.error(&["`,`", "FROM", "`;`"]),
                (Projection::Wildcard, None) => self.error(&["FROM", "`;`"]),
                (_, Some(_)) => self.error(&["`.`", "`;`"]),
            };
        }
        self.advance();

        Ok(SelectStatement {
            modifier,
            projection,
            from,
        })
    }

    /// Parses a comma-separated, non-empty list of columns.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if any column is malformed.
    pub fn column_list(&mut self) -> PResult<Vec<SelectColumn>> {
        let mut columns = vec![self.column()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            columns.push(self.column()?);
        }
        Ok(columns)
    }

    /// Parses an expression with an optional `[AS] alias`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the expression is malformed or `AS` is not
    /// followed by an identifier.
    pub fn column(&mut self) -> PResult<SelectColumn> {
        let expr = self.expression()?;

        let alias = if self.check_keyword(Keyword::As) {
            self.advance();
            Some(self.identifier()?)
        } else if matches!(self.current().kind, TokenKind::Identifier(_)) {
            Some(self.identifier()?)
        } else {
            None
        };

        Ok(SelectColumn { expr, alias })
    }

    /// Parses `[[database.]schema.]table`, taking as many segments as are present.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if a segment is not an identifier.
    pub fn table_object(&mut self) -> PResult<TableObject> {
        let span = self.current().span;
        let mut parts = vec![self.identifier()?];
        while parts.len() < 3 && self.check(&TokenKind::Dot) {
            self.advance();
            parts.push(self.identifier()?);
        }
        TableObject::from_parts(parts).ok_or_else(|| ParseError::new("Invalid table path", span))
    }

    // --- Expressions ---

    /// Parses the root expression rule.
    ///
    /// Every alternative is tried from the same position. The one that
    /// consumes the most tokens wins; ties go to the earlier alternative.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no alternative matches.
    pub fn expression(&mut self) -> PResult<Expr> {
        self.descend(|p| {
            let alternatives: [ExprRule; 7] = [
                |p| p.function_call().map(Expr::Function),
                |p| p.identifier().map(Expr::Identifier),
                Self::case_expression,
                Self::boolean_expression,
                Self::comparison_expression,
                Self::arithmetic_expression,
                Self::quoted_string,
            ];

            let start = p.pos;
            let mut best: Option<(Expr, usize)> = None;
            for rule in alternatives {
                p.pos = start;
                if let Some(expr) = p.attempt(rule)? {
                    let longer = match &best {
                        Some((_, end)) => p.pos > *end,
                        None => true,
                    };
                    if longer {
                        best = Some((expr, p.pos));
                    }
                }
            }

            match best {
                Some((expr, end)) => {
                    p.pos = end;
                    Ok(expr)
                }
                None => {
                    p.pos = start;
                    Err(p.unexpected(&["expression"]))
                }
            }
        })
    }

    /// Parses `CASE (WHEN condition THEN value)+ [ELSE value] END`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the CASE expression is malformed.
    pub fn case_expression(&mut self) -> PResult<Expr> {
        self.descend(|p| {
            p.expect_keyword(Keyword::Case)?;

            let mut when_clauses = vec![p.when_clause()?];
            while p.check_keyword(Keyword::When) {
                when_clauses.push(p.when_clause()?);
            }

            let else_clause = if p.check_keyword(Keyword::Else) {
                p.advance();
                Some(Box::new(p.expression()?))
            } else {
                None
            };

            if !p.check_keyword(Keyword::End) {
                return if else_clause.is_some() {
                    p.error(&["END"])
                } else {
                    p.error(&["WHEN", "ELSE", "END"])
                };
            }
            p.advance();

            Ok(Expr::Case {
                when_clauses,
                else_clause,
            })
        })
    }

    fn when_clause(&mut self) -> PResult<WhenClause> {
        self.expect_keyword(Keyword::When)?;
        let condition = self.boolean_expression()?;
        self.expect_keyword(Keyword::Then)?;
        let result = self.expression()?;
        Ok(WhenClause { condition, result })
    }

    /// Parses a boolean expression: `NOT`, `AND`, `OR` over boolean operands.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a boolean expression.
    pub fn boolean_expression(&mut self) -> PResult<Expr> {
        self.descend(|p| p.boolean_bp(0))
    }

    /// Pratt loop for the boolean layer.
    fn boolean_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut lhs = if is_not(&self.current().kind) {
            self.advance();
            let operand = self.descend(|p| p.boolean_bp(NOT_BP))?;
            operand.not()
        } else {
            self.boolean_operand()?
        };

        loop {
            let Some(op) = token_to_logical_op(&self.current().kind) else {
                break;
            };
            let (l_bp, r_bp) = logical_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.boolean_bp(r_bp)?;
            lhs = Expr::Logical {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /// Parses `TRUE`, `FALSE`, a comparison, an identifier, or `( boolean )`.
    fn boolean_operand(&mut self) -> PResult<Expr> {
        let kind = &self.current().kind;
        if kind.is_word("TRUE") || kind.is_word("FALSE") {
            let value = kind.is_word("TRUE");
            self.advance();
            return Ok(Expr::boolean(value));
        }

        if let Some(comparison) = self.attempt(Self::comparison_expression)? {
            return Ok(comparison);
        }

        match self.current().kind {
            TokenKind::Identifier(_) => self.identifier().map(Expr::Identifier),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.boolean_expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(inner)
            }
            _ => self.error(&["TRUE", "FALSE", "identifier", "`(`"]),
        }
    }

    /// Parses `arith IS [NOT] NULL` or `arith op arith`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single comparison.
    pub fn comparison_expression(&mut self) -> PResult<Expr> {
        let left = self.arithmetic_expression()?;

        if self.check_keyword(Keyword::Is) {
            self.advance();
            let negated = if self.check_keyword(Keyword::Not) {
                self.advance();
                true
            } else {
                false
            };
            self.expect_keyword(Keyword::Null)?;
            return Ok(Expr::IsNull {
                expr: Box::new(left),
                negated,
            });
        }

        let Some(op) = token_to_comparison_op(&self.current().kind) else {
            return self.error(&["comparison operator", "IS"]);
        };
        self.advance();
        let right = self.arithmetic_expression()?;
        Ok(left.compare(op, right))
    }

    /// Parses an arithmetic expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not an arithmetic expression or
    /// its parentheses are unbalanced.
    pub fn arithmetic_expression(&mut self) -> PResult<Expr> {
        self.descend(|p| p.arithmetic_bp(0))
    }

    /// Pratt loop for the arithmetic layer.
    fn arithmetic_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut lhs = if let Some(op) = token_to_unary_op(&self.current().kind) {
            self.advance();
            let operand = self.descend(|p| p.arithmetic_bp(UNARY_BP))?;
            Expr::unary(op, operand)
        } else {
            self.arithmetic_leaf()?
        };

        loop {
            let Some(op) = token_to_arithmetic_op(&self.current().kind) else {
                break;
            };
            let (l_bp, r_bp) = arithmetic_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.arithmetic_bp(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        Ok(lhs)
    }

    /// Parses a number, function call, identifier, or `( arithmetic )`.
    fn arithmetic_leaf(&mut self) -> PResult<Expr> {
        match self.current().kind {
            TokenKind::Integer(_) | TokenKind::Real(_) => self.number(),
            TokenKind::Identifier(_) => {
                if let Some(call) = self.attempt(Self::function_call)? {
                    return Ok(Expr::Function(call));
                }
                self.identifier().map(Expr::Identifier)
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.arithmetic_expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(inner)
            }
            _ => self.error(&["number", "identifier", "`(`"]),
        }
    }

    /// Parses a call to a catalog function, enforcing its arity.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the name is not a catalog function or the
    /// call does not fit the function's shape.
    pub fn function_call(&mut self) -> PResult<FunctionCall> {
        let start = self.pos;
        if let Some(cached) = self.calls.get(&start) {
            return match cached.clone() {
                Ok((call, end)) => {
                    self.pos = end;
                    Ok(call)
                }
                Err(err) => Err(err),
            };
        }

        let result = self.descend(Self::function_call_uncached);
        let entry = result.clone().map(|call| (call, self.pos));
        self.calls.insert(start, entry);
        result
    }

    fn function_call_uncached(&mut self) -> PResult<FunctionCall> {
        let resolved = match &self.current().kind {
            TokenKind::Identifier(word) => catalog::resolve(word),
            _ => None,
        };
        let Some((name, shape)) = resolved else {
            return self.error(&["function name"]);
        };
        trace!(
            function = name,
            required = shape.required,
            optional = shape.optional,
            "dispatching function call"
        );
        self.advance();

        let mut call = FunctionCall {
            name: String::from(name),
            args: Vec::with_capacity(usize::from(shape.required)),
            optional_args: Vec::new(),
        };

        if shape.parens == Parens::Omittable {
            if self.check(&TokenKind::LeftParen) {
                self.advance();
                self.expect(&TokenKind::RightParen)?;
            }
            return Ok(call);
        }

        self.expect(&TokenKind::LeftParen)?;

        for i in 0..shape.required {
            if i > 0 {
                self.expect(&TokenKind::Comma)?;
            }
            call.args.push(self.expression()?);
        }

        // Each optional slot is entered only if every slot before it was.
        let mut slots_left = shape.optional;
        while slots_left > 0 {
            if call.arg_count() > 0 {
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            } else if self.check(&TokenKind::RightParen) {
                break;
            }
            call.optional_args.push(self.expression()?);
            slots_left -= 1;
        }

        if !self.check(&TokenKind::RightParen) {
            return if slots_left > 0 && call.arg_count() > 0 {
                self.error(&["`,`", "`)`"])
            } else {
                self.error(&["`)`"])
            };
        }
        self.advance();

        Ok(call)
    }

    // --- Lexical rules ---

    /// Parses an identifier (never a reserved keyword).
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is not an identifier.
    pub fn identifier(&mut self) -> PResult<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => self.error(&["identifier"]),
        }
    }

    /// Parses a single-quoted string literal.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is not a string.
    pub fn quoted_string(&mut self) -> PResult<Expr> {
        match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            _ => self.error(&["string"]),
        }
    }

    /// Parses an integer or real literal.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is not a number.
    pub fn number(&mut self) -> PResult<Expr> {
        let literal = match &self.current().kind {
            TokenKind::Integer(text) => Literal::Integer(text.clone()),
            TokenKind::Real(text) => Literal::Real(text.clone()),
            _ => return self.error(&["number"]),
        };
        self.advance();
        Ok(Expr::Literal(literal))
    }

    // --- Helper methods ---

    /// Returns the current token.
    fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    /// Advances to the next token, staying on `Eof` once reached.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> PResult<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            self.error(&[&kind.to_string()])
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> PResult<()> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            self.error(&[keyword.as_str()])
        }
    }

    /// Builds an error at the current token without recording it.
    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let token = self.current();
        ParseError::unexpected(
            expected.iter().map(|s| String::from(*s)).collect(),
            token.kind.clone(),
            token.span,
        )
    }

    /// Records a failure at the current token and returns it.
    fn error<T>(&mut self, expected: &[&str]) -> PResult<T> {
        let err = self.unexpected(expected);
        self.record(&err);
        Err(err)
    }

    /// Keeps the failure with the largest offset, merging ties.
    fn record(&mut self, err: &ParseError) {
        match &mut self.furthest {
            Some(furthest) if furthest.span.start > err.span.start => {}
            Some(furthest) if furthest.span.start == err.span.start => {
                furthest.merge(err.clone());
            }
            slot => *slot = Some(err.clone()),
        }
    }

    /// Picks the error to hand back to the caller once a parse has failed.
    fn report(&mut self, err: ParseError) -> ParseError {
        if let Some(fatal) = self.fatal.take() {
            return fatal;
        }
        match self.furthest.take() {
            Some(furthest) if furthest.span.start >= err.span.start => furthest,
            _ => err,
        }
    }

    /// Runs `rule` one level deeper, failing once the nesting limit is hit.
    fn descend<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if let Some(fatal) = &self.fatal {
            return Err(fatal.clone());
        }
        if self.depth >= self.max_depth {
            let err = ParseError::depth_limit(self.max_depth, self.current().span);
            self.fatal = Some(err.clone());
            return Err(err);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Tries `rule`, rewinding the cursor if it fails.
    ///
    /// Returns `Ok(None)` on an ordinary failure so the caller can try
    /// something else. A depth-limit failure is passed through.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<Option<T>> {
        let start = self.pos;
        match rule(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_depth_limit() => Err(err),
            Err(_) => {
                self.pos = start;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ArithmeticOp, ComparisonOp, LogicalOp};

    fn expr(sql: &str) -> Result<Expr, ParseError> {
        Parser::new(sql).complete(Parser::expression)
    }

    #[test]
    fn test_simple_select() {
        let stmts = Parser::new("select this, that from hornswoggler;")
            .parse_statements()
            .unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].columns().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let Expr::Binary { op, right, .. } = expr("1 + 2 * 3").unwrap() else {
            panic!("Expected binary expression");
        };
        assert_eq!(op, ArithmeticOp::Add);
        assert!(matches!(
            right.as_ref(),
            Expr::Binary {
                op: ArithmeticOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_longest_alternative_wins() {
        // Identifier alone would stop after `x`.
        assert!(matches!(expr("x + 1").unwrap(), Expr::Binary { .. }));
        assert!(matches!(
            expr("x = 1 or y").unwrap(),
            Expr::Logical {
                op: LogicalOp::Or,
                ..
            }
        ));
        assert!(matches!(
            expr("x <> 1").unwrap(),
            Expr::Comparison {
                op: ComparisonOp::LtGt,
                ..
            }
        ));
    }

    #[test]
    fn test_tie_prefers_earlier_alternative() {
        // A bare context function is both a call and an identifier.
        assert!(matches!(expr("current_date").unwrap(), Expr::Function(_)));
        // `true` alone is an identifier before it is a boolean.
        assert_eq!(expr("true").unwrap(), Expr::identifier("true"));
    }

    #[test]
    fn test_function_call_memoized() {
        let mut parser = Parser::new("abs(x) + 1");
        parser.complete(Parser::expression).unwrap();
        assert!(matches!(parser.calls.get(&0), Some(Ok((_, 4)))));
    }

    #[test]
    fn test_depth_limit_is_fatal() {
        let err = Parser::new("((((1))))")
            .with_max_depth(3)
            .complete(Parser::expression)
            .unwrap_err();
        assert!(err.is_depth_limit());
    }

    #[test]
    fn test_cursor_rewinds_after_failed_attempt() {
        let mut parser = Parser::new("foo(1)");
        assert!(parser.attempt(Parser::function_call).unwrap().is_none());
        assert_eq!(parser.pos, 0);
    }
}
