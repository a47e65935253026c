//! Built-in function catalog.
//!
//! Every callable name maps to exactly one [`CallShape`]: how many arguments it
//! requires, how many optional trailing arguments it may take, and whether the
//! parentheses may be omitted. The parser looks a name up once and then runs a
//! single shape-parametric argument parser, so the table is the only place that
//! knows about individual functions.
//!
//! The table is built on first use and never mutated afterwards, so it can be
//! shared freely between threads parsing independent documents.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Whether a function call needs its parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parens {
    /// `NAME` and `NAME()` are both accepted.
    Omittable,
    /// Only `NAME(...)` is accepted.
    Mandatory,
}

/// Broad partition of call shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeCategory {
    /// Zero arguments, parentheses optional.
    Context,
    /// Zero arguments, parentheses required.
    Nullary,
    /// Exactly `required` arguments.
    Fixed,
    /// `required` arguments followed by up to `optional` more.
    Optional,
}

/// The arity contract of a catalog function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallShape {
    /// Number of arguments that must be supplied.
    pub required: u8,
    /// Number of trailing arguments that may additionally be supplied.
    pub optional: u8,
    /// Whether the parentheses may be left off.
    pub parens: Parens,
}

impl CallShape {
    /// Shape of a context function such as `CURRENT_DATE`.
    pub const CONTEXT: Self = Self {
        required: 0,
        optional: 0,
        parens: Parens::Omittable,
    };

    /// A shape taking exactly `required` arguments inside mandatory parentheses.
    #[must_use]
    pub const fn fixed(required: u8) -> Self {
        Self::with_optional(required, 0)
    }

    /// A shape taking `required` arguments plus up to `optional` trailing ones.
    #[must_use]
    pub const fn with_optional(required: u8, optional: u8) -> Self {
        Self {
            required,
            optional,
            parens: Parens::Mandatory,
        }
    }

    /// Largest number of arguments the shape accepts.
    #[must_use]
    pub const fn max_args(&self) -> usize {
        self.required as usize + self.optional as usize
    }

    /// Returns true if a call with `count` arguments is well formed.
    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        count >= self.required as usize && count <= self.max_args()
    }

    /// Returns the partition this shape belongs to.
    #[must_use]
    pub const fn category(&self) -> ShapeCategory {
        match (self.parens, self.required, self.optional) {
            (Parens::Omittable, _, _) => ShapeCategory::Context,
            (Parens::Mandatory, 0, 0) => ShapeCategory::Nullary,
            (Parens::Mandatory, _, 0) => ShapeCategory::Fixed,
            (Parens::Mandatory, _, _) => ShapeCategory::Optional,
        }
    }
}

/// A group of functions sharing one shape.
struct Family {
    shape: CallShape,
    names: &'static [&'static str],
}

const CONTEXT_FUNCTIONS: &[&str] = &[
    "CURRENT_CLIENT",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_VERSION",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "CURRENT_ROLE",
    "CURRENT_SESSION",
    "CURRENT_STATEMENT",
    "CURRENT_TRANSACTION",
    "CURRENT_USER",
    "LAST_QUERY_ID",
    "LAST_TRANSACTION",
    "CURRENT_DATABASE",
    "CURRENT_SCHEMA",
    "CURRENT_SCHEMAS",
    "CURRENT_WAREHOUSE",
];

const UNARY_FUNCTIONS: &[&str] = &[
    // Bitwise
    "BITAND_AGG",
    "BITNOT",
    "BITOR_AGG",
    "BITXOR_AGG",
    // Numeric
    "SIGN",
    "CBRT",
    "EXP",
    "FACTORIAL",
    "SQRT",
    "SQUARE",
    "LN",
    "ACOS",
    "ACOSH",
    "ASIN",
    "ASINH",
    "ATAN",
    "ATAN2",
    "ATANH",
    "COS",
    "COSH",
    "COT",
    "DEGREES",
    "RADIANS",
    "SIN",
    "SINH",
    "TAN",
    "TANH",
    // String
    "ASCII",
    "BIT_LENGTH",
    "CHR",
    "CHAR",
    "LENGTH",
    "LOWER",
    "OCTET_LENGTH",
    "REVERSE",
    "RTRIMMED_LENGTH",
    "SPACE",
    "UNICODE",
    "UPPER",
    "HEX_DECODE_BINARY",
    "HEX_DECODE_STRING",
    "TRY_HEX_DECODE_BINARY",
    "TRY_HEX_DECODE_STRING",
    "MD5",
    "MD5_HEX",
    "MD5_BINARY",
    "MD5_NUMBER",
    "SHA1",
    "SHA1_HEX",
    "SHA1_BINARY",
    // Date and time
    "DAYNAME",
    "HOUR",
    "MINUTE",
    "SECOND",
    "MONTHNAME",
    "YEAR",
    "YEAROFWEEK",
    "YEAROFWEEKISO",
    "DAY",
    "DAYOFMONTH",
    "DAYOFWEEK",
    "DAYOFWEEKISO",
    "DAYOFYEAR",
    "WEEK",
    "WEEKOFYEAR",
    "WEEKISO",
    "MONTH",
    "QUARTER",
    // Semi-structured data
    "CHECK_JSON",
    "CHECK_XML",
    "PARSE_JSON",
    "PARSE_XML",
    "STRIP_NULL_VALUE",
    "ARRAY_COMPACT",
    "ARRAY_SIZE",
    "AS_ARRAY",
    "AS_BINARY",
    "AS_CHAR",
    "AS_VARCHAR",
    "AS_DATE",
    "AS_DOUBLE",
    "AS_REAL",
    "AS_INTEGER",
    "AS_OBJECT",
    "AS_TIME",
    "AS_TIMESTAMP_LTZ",
    "AS_TIMESTAMP_NTZ",
    "AS_TIMESTAMP_TZ",
    "TO_ARRAY",
    "TO_JSON",
    "TO_OBJECT",
    "TO_VARIANT",
    "TO_XML",
    "IS_ARRAY",
    "IS_BINARY",
    "IS_BOOLEAN",
    "IS_CHAR",
    "IS_VARCHAR",
    "IS_DATE",
    "IS_DATE_VALUE",
    "IS_DECIMAL",
    "IS_DOUBLE",
    "IS_REAL",
    "IS_INTEGER",
    "IS_NULL_VALUE",
    "IS_OBJECT",
    "IS_TIME",
    "IS_TIMESTAMP_LTZ",
    "IS_TIMESTAMP_NTZ",
    "IS_TIMESTAMP_TZ",
    "TYPEOF",
    // Conversion
    "TRY_TO_DOUBLE",
    "TO_BOOLEAN",
    "TRY_TO_BOOLEAN",
    "TRY_TO_DATE",
    "TRY_TO_TIME",
    "TRY_TO_TIMESTAMP",
    "TRY_TO_TIMESTAMP_LTZ",
    "TRY_TO_TIMESTAMP_NTZ",
    "TRY_TO_TIMESTAMP_TZ",
    // System
    "SYSTEM$ABORT_SESSION",
    "SYSTEM$ABORT_TRANSACTION",
    "SYSTEM$CANCEL_ALL_QUERIES",
    "SYSTEM$CANCEL_QUERY",
    "SYSTEM$LAST_CHANGE_COMMIT_TIME",
    "SYSTEM$PIPE_FORCE_RESUME",
    "SYSTEM$PIPE_STATUS",
    "SYSTEM$TYPEOF",
    // Sequences
    "SEQ1",
    "SEQ2",
    "SEQ4",
    "SEQ8",
];

const UNARY_ONE_OPTIONAL: &[&str] = &[
    "ABS",
    "CEIL",
    "FLOOR",
    "ROUND",
    "TRUNCATE",
    "TRUNC",
    "INITCAP",
    "LTRIM",
    "PARSE_URL",
    "REPEAT",
    "RTRIM",
    "TRIM",
    "BASE64_DECODE_BINARY",
    "BASE64_DECODE_STRING",
    "HEX_ENCODE",
    "TRY_BASE64_DECODE_BINARY",
    "TRY_BASE64_DECODE_STRING",
    "SHA2",
    "SHA2_HEX",
    "SHA2_BINARY",
    "LAST_DAY",
    "TO_DATE",
    "TO_TIME",
    "TO_TIMESTAMP_LTZ",
    "TO_TIMESTAMP_NTZ",
    "TO_TIMESTAMP_TZ",
    "TO_CHAR",
    "TO_VARCHAR",
    "TO_BINARY",
    "TRY_TO_BINARY",
    "TO_DOUBLE",
    "SYSTEM$WAIT",
];

const UNARY_TWO_OPTIONAL: &[&str] = &["BASE64_ENCODE", "AS_DECIMAL", "AS_NUMBER"];

const UNARY_THREE_OPTIONAL: &[&str] = &[
    "TO_DECIMAL",
    "TO_NUMBER",
    "TO_NUMERIC",
    "TRY_TO_DECIMAL",
    "TRY_TO_NUMBER",
    "TRY_TO_NUMERIC",
];

const BINARY_FUNCTIONS: &[&str] = &[
    "BITAND",
    "BITOR",
    "BITSHIFTLEFT",
    "BITSHIFTRIGHT",
    "BITXOR",
    "MOD",
    "POW",
    "POWER",
    "LOG",
    "CONCAT",
    "CONTAINS",
    "EDITDISTANCE",
    "ENDSWITH",
    "LEFT",
    "RIGHT",
    "SPLIT",
    "STARTSWITH",
    "DATE_PART",
    "NEXT_DAY",
    "PREVIOUS_DAY",
    "ADD_MONTHS",
    "DATE_TRUNC",
    // Shadowed by the unary family, which is listed first.
    "TRUNC",
    "ARRAY_APPEND",
    "ARRAY_CAT",
    "ARRAY_CONTAINS",
    "ARRAY_POSITION",
    "ARRAY_PREPEND",
    "ARRAY_TO_STRING",
    "ARRAYS_OVERLAP",
    "OBJECT_AGG",
    "GET",
    "GET_PATH",
    "GET_DDL",
    "RANDSTR",
];

const BINARY_ONE_OPTIONAL: &[&str] = &[
    "CHARINDEX",
    "ILIKE",
    "LIKE",
    "LPAD",
    "PARSE_IP",
    "REPLACE",
    "RPAD",
    "SUBSTR",
    "SUBSTRING",
    "REGEXP_LIKE",
    "RLIKE",
    "CONVERT_TIMEZONE",
    "XMLGET",
];

const TERNARY_FUNCTIONS: &[&str] = &[
    "SPLIT_PART",
    "TRANSLATE",
    "DATE_FROM_PARTS",
    "DATEADD",
    "DATEDIFF",
    "TIMEADD",
    "TIMEDIFF",
    "TIMESTAMPADD",
    "TIMESTAMPDIFF",
    "ARRAY_INSERT",
    "ARRAY_SLICE",
    "NORMAL",
    "UNIFORM",
    "ZIPF",
];

/// All families, in priority order. A name appearing in more than one family
/// binds to the first.
const FAMILIES: &[Family] = &[
    Family {
        shape: CallShape::CONTEXT,
        names: CONTEXT_FUNCTIONS,
    },
    Family {
        shape: CallShape::fixed(0),
        names: &["PI"],
    },
    Family {
        shape: CallShape::with_optional(0, 1),
        names: &["RANDOM"],
    },
    Family {
        shape: CallShape::fixed(1),
        names: UNARY_FUNCTIONS,
    },
    Family {
        shape: CallShape::with_optional(1, 1),
        names: UNARY_ONE_OPTIONAL,
    },
    Family {
        shape: CallShape::with_optional(1, 2),
        names: UNARY_TWO_OPTIONAL,
    },
    Family {
        shape: CallShape::with_optional(1, 3),
        names: UNARY_THREE_OPTIONAL,
    },
    Family {
        shape: CallShape::fixed(2),
        names: BINARY_FUNCTIONS,
    },
    Family {
        shape: CallShape::with_optional(2, 1),
        names: BINARY_ONE_OPTIONAL,
    },
    Family {
        shape: CallShape::with_optional(2, 2),
        names: &["REGEXP_COUNT"],
    },
    Family {
        shape: CallShape::with_optional(2, 3),
        names: &["REGEXP_SUBSTR"],
    },
    Family {
        shape: CallShape::with_optional(2, 4),
        names: &["REGEXP_INSTR", "REGEXP_REPLACE"],
    },
    Family {
        shape: CallShape::fixed(3),
        names: TERNARY_FUNCTIONS,
    },
    Family {
        shape: CallShape::with_optional(3, 1),
        names: &["TIME_FROM_PARTS", "OBJECT_INSERT"],
    },
    Family {
        shape: CallShape::fixed(4),
        names: &["HAVERSINE", "INSERT"],
    },
];

/// Name to shape table keyed by upper-case name.
static CATALOG: LazyLock<HashMap<&'static str, CallShape>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for family in FAMILIES {
        for &name in family.names {
            table.entry(name).or_insert(family.shape);
        }
    }
    trace!(entries = table.len(), "built function catalog");
    table
});

/// Resolves `name` (ignoring ASCII case) to its catalog spelling and shape.
#[must_use]
pub fn resolve(name: &str) -> Option<(&'static str, CallShape)> {
    let upper = name.to_ascii_uppercase();
    CATALOG
        .get_key_value(upper.as_str())
        .map(|(name, shape)| (*name, *shape))
}

/// Looks up the call shape of `name`, ignoring ASCII case.
#[must_use]
pub fn lookup(name: &str) -> Option<CallShape> {
    resolve(name).map(|(_, shape)| shape)
}

/// Returns the upper-case catalog spelling of `name`, if it is a function.
#[must_use]
pub fn canonical_name(name: &str) -> Option<&'static str> {
    resolve(name).map(|(name, _)| name)
}

/// Iterates over every catalog entry in family order.
pub fn functions() -> impl Iterator<Item = (&'static str, CallShape)> {
    FAMILIES.iter().flat_map(|family| {
        family
            .names
            .iter()
            .filter(move |name| CATALOG.get(**name) == Some(&family.shape))
            .map(move |name| (*name, family.shape))
    })
}

/// Number of distinct function names.
#[must_use]
pub fn len() -> usize {
    CATALOG.len()
}
