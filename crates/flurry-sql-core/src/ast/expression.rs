//! Expression AST types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value.
///
/// Numbers keep the digits as written, so no precision is lost and printing
/// reproduces the source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal.
    Integer(String),
    /// Real literal (`digits.digits`).
    Real(String),
    /// Single-quoted string literal, unescaped.
    String(String),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
        }
    }
}

/// Unary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Unary plus (+)
    Plus,
    /// Negation (-)
    Neg,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
        }
    }
}

/// Comparison operators.
///
/// `!=` and `<>` mean the same thing but are kept apart so the printer can
/// echo the spelling that was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    LtGt,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::LtGt => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
        }
    }
}

/// A call to a catalog function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The upper-case catalog name.
    pub name: String,
    /// The required arguments.
    pub args: Vec<Expr>,
    /// The optional trailing arguments that were supplied.
    pub optional_args: Vec<Expr>,
}

impl FunctionCall {
    /// Total number of supplied arguments.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len() + self.optional_args.len()
    }

    /// Iterates over required then optional arguments.
    pub fn all_args(&self) -> impl Iterator<Item = &Expr> {
        self.args.iter().chain(&self.optional_args)
    }
}

/// One `WHEN condition THEN result` branch of a CASE expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhenClause {
    /// Boolean condition.
    pub condition: Expr,
    /// Value produced when the condition holds.
    pub result: Expr,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A bare identifier (column reference).
    Identifier(String),

    /// A literal value.
    Literal(Literal),

    /// A unary arithmetic expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary arithmetic expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: ArithmeticOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A comparison between two arithmetic expressions.
    Comparison {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: ComparisonOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// Boolean negation.
    Not(Box<Expr>),

    /// AND / OR.
    Logical {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: LogicalOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// CASE expression.
    Case {
        /// WHEN/THEN clauses, never empty.
        when_clauses: Vec<WhenClause>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },
}

impl Expr {
    /// Creates a new identifier.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Creates a new integer literal.
    #[must_use]
    pub fn integer(text: impl Into<String>) -> Self {
        Self::Literal(Literal::Integer(text.into()))
    }

    /// Creates a new real literal.
    #[must_use]
    pub fn real(text: impl Into<String>) -> Self {
        Self::Literal(Literal::Real(text.into()))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a binary arithmetic expression.
    #[must_use]
    pub fn binary(self, op: ArithmeticOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a unary arithmetic expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates a comparison.
    #[must_use]
    pub fn compare(self, op: ComparisonOp, right: Self) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.logical(LogicalOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.logical(LogicalOp::Or, right)
    }

    fn logical(self, op: LogicalOp, right: Self) -> Self {
        Self::Logical {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a NOT expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Creates a function call with only required arguments.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            name: name.into(),
            args,
            optional_args: Vec::new(),
        })
    }

    /// Printing precedence of the node (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Logical { op, .. } => op.precedence(),
            Self::Not(_) => 3,
            Self::Comparison { .. } | Self::IsNull { .. } => 4,
            Self::Binary { op, .. } => op.precedence(),
            Self::Unary { .. } => 7,
            Self::Identifier(_) | Self::Literal(_) | Self::Function(_) | Self::Case { .. } => 8,
        }
    }
}

/// Writes `expr`, parenthesized when it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

/// Writes `items` separated by `, `.
pub(crate) fn write_list(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = impl fmt::Display>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(text) | Self::Real(text) => f.write_str(text),
            Self::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, self.all_args())?;
        f.write_str(")")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Unary { op, operand } => {
                f.write_str(op.as_str())?;
                if matches!(**operand, Self::Unary { .. } | Self::Binary { .. }) {
                    write!(f, "({operand})")
                } else {
                    write_operand(f, operand, prec)
                }
            }
            Self::Binary { left, op, right } => {
                write_operand(f, left, prec)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right, prec + 1)
            }
            Self::Comparison { left, op, right } => {
                write_operand(f, left, prec + 1)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right, prec + 1)
            }
            Self::IsNull { expr, negated } => {
                write_operand(f, expr, prec + 1)?;
                f.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" })
            }
            Self::Not(operand) => {
                f.write_str("NOT ")?;
                write_operand(f, operand, prec)
            }
            Self::Logical { left, op, right } => {
                write_operand(f, left, prec)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right, prec + 1)
            }
            Self::Function(call) => write!(f, "{call}"),
            Self::Case {
                when_clauses,
                else_clause,
            } => {
                f.write_str("CASE")?;
                for clause in when_clauses {
                    write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
                }
                if let Some(else_expr) = else_clause {
                    write!(f, " ELSE {else_expr}")?;
                }
                f.write_str(" END")
            }
        }
    }
}
