//! SQL statement AST types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::expression::{write_list, Expr};

/// Row filter keyword after SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectModifier {
    /// SELECT DISTINCT.
    Distinct,
    /// SELECT ALL.
    All,
}

impl SelectModifier {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
        }
    }
}

/// A table reference in the FROM clause: `[[database.]schema.]name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableObject {
    /// Database name.
    pub database: Option<String>,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableObject {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            database: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Builds a table reference from one to three path segments.
    ///
    /// Segments are right-aligned: the last is always the table name. Returns
    /// `None` for an empty path or one longer than three segments.
    #[must_use]
    pub fn from_parts(parts: Vec<String>) -> Option<Self> {
        let mut parts = parts.into_iter().rev();
        let name = parts.next()?;
        let schema = parts.next();
        let database = parts.next();
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            database,
            schema,
            name,
        })
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// What a SELECT produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// `*`
    Wildcard,
    /// A non-empty column list.
    Columns(Vec<SelectColumn>),
}

/// A `;`-terminated SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// DISTINCT / ALL, if written.
    pub modifier: Option<SelectModifier>,
    /// The selected columns.
    pub projection: Projection,
    /// The FROM clause.
    pub from: Option<TableObject>,
}

impl SelectStatement {
    /// Returns the column list, or `None` for `SELECT *`.
    #[must_use]
    pub fn columns(&self) -> Option<&[SelectColumn]> {
        match &self.projection {
            Projection::Wildcard => None,
            Projection::Columns(columns) => Some(columns),
        }
    }
}

impl fmt::Display for TableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in [&self.database, &self.schema].into_iter().flatten() {
            write!(f, "{segment}.")?;
        }
        f.write_str(&self.name)
    }
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Columns(columns) => write_list(f, columns),
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if let Some(modifier) = self.modifier {
            write!(f, "{} ", modifier.as_str())?;
        }
        write!(f, "{}", self.projection)?;
        if let Some(table) = &self.from {
            write!(f, " FROM {table}")?;
        }
        f.write_str(";")
    }
}
