//! Boolean filter trees.
//!
//! A [`Condition`] is either a leaf comparing one property with a literal, or an
//! `AND`/`OR` node over two sub-conditions. Trees are immutable: combining two
//! conditions builds a new root that shares both operands, so the operands stay usable
//! on their own.
//!
//! ```
//! use buoy::{Comparator, Condition};
//!
//! let minor = Condition::leaf("age", Comparator::Lt, 18);
//! let tall = Condition::leaf("height", Comparator::Gt, 120);
//! let either = minor.or(&tall);
//!
//! assert!(either.is_combinator());
//! assert!(minor.is_leaf());
//! ```

use crate::value::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Comparison operator of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `<>`
    NotEq,
}

impl Comparator {
    /// SQL token for this comparator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Gte => ">=",
            Comparator::NotEq => "<>",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparator token that is not one of `= != > < <= >= <>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComparatorError(pub String);

impl fmt::Display for ParseComparatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported comparator `{}`", self.0)
    }
}

impl std::error::Error for ParseComparatorError {}

impl FromStr for Comparator {
    type Err = ParseComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Comparator::Eq),
            "!=" => Ok(Comparator::Ne),
            ">" => Ok(Comparator::Gt),
            "<" => Ok(Comparator::Lt),
            "<=" => Ok(Comparator::Lte),
            ">=" => Ok(Comparator::Gte),
            "<>" => Ok(Comparator::NotEq),
            other => Err(ParseComparatorError(other.to_string())),
        }
    }
}

/// Logical operator of a combinator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field comparator value`, with `field` a model property
    Leaf {
        field: String,
        comparator: Comparator,
        value: Value,
    },
    /// `left operator right`
    Combinator {
        operator: LogicalOperator,
        left: Arc<Condition>,
        right: Arc<Condition>,
    },
}

impl Condition {
    /// Build a leaf. The field is resolved against the schema only at compile time.
    pub fn leaf(field: impl Into<String>, comparator: Comparator, value: impl Into<Value>) -> Self {
        Condition::Leaf {
            field: field.into(),
            comparator,
            value: value.into(),
        }
    }

    /// `self AND other`, with `self` as the left operand.
    pub fn and(&self, other: &Condition) -> Condition {
        self.combine(LogicalOperator::And, other)
    }

    /// `self OR other`, with `self` as the left operand.
    pub fn or(&self, other: &Condition) -> Condition {
        self.combine(LogicalOperator::Or, other)
    }

    fn combine(&self, operator: LogicalOperator, other: &Condition) -> Condition {
        Condition::Combinator {
            operator,
            left: Arc::new(self.clone()),
            right: Arc::new(other.clone()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Leaf { .. })
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, Condition::Combinator { .. })
    }

    /// Every property referenced by a leaf, left to right.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::Leaf { field, .. } => out.push(field),
            Condition::Combinator { left, right, .. } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
        }
    }
}
