use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::engine::errors::IntentError;
use crate::engine::table::Table;
use crate::engine::types::ScalarValue;

/// Column name to row condition. Conditions on different columns are ANDed.
pub type SliceSpec = IndexMap<String, SliceCondition>;

/// A restriction on the values of one column.
///
/// Equality is type-aware with integer/float widening. A null cell never
/// satisfies `Equal`, `In` or an ordering condition, and always satisfies
/// `NotEqual` and `NotIn`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SliceConditionRepr")]
pub enum SliceCondition {
    Equal(ScalarValue),
    NotEqual(ScalarValue),
    In(Vec<ScalarValue>),
    NotIn(Vec<ScalarValue>),
    Less(ScalarValue),
    LessOrEqual(ScalarValue),
    Greater(ScalarValue),
    GreaterOrEqual(ScalarValue),
}

impl SliceCondition {
    pub fn matches(&self, cell: &ScalarValue) -> bool {
        match self {
            SliceCondition::Equal(v) => cell.matches(v),
            SliceCondition::NotEqual(v) => !cell.matches(v),
            SliceCondition::In(vs) => vs.iter().any(|v| cell.matches(v)),
            SliceCondition::NotIn(vs) => !vs.iter().any(|v| cell.matches(v)),
            SliceCondition::Less(v) => cell.compare(v) == Some(Ordering::Less),
            SliceCondition::LessOrEqual(v) => {
                matches!(cell.compare(v), Some(Ordering::Less | Ordering::Equal))
            }
            SliceCondition::Greater(v) => cell.compare(v) == Some(Ordering::Greater),
            SliceCondition::GreaterOrEqual(v) => {
                matches!(cell.compare(v), Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }
}

impl From<ScalarValue> for SliceCondition {
    fn from(value: ScalarValue) -> Self {
        SliceCondition::Equal(value)
    }
}

impl From<Vec<ScalarValue>> for SliceCondition {
    fn from(values: Vec<ScalarValue>) -> Self {
        SliceCondition::In(values)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SliceOp {
    Equal,
    NotEqual,
    In,
    NotIn,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SliceOperand {
    Single(ScalarValue),
    Multiple(Vec<ScalarValue>),
}

/// Accepted shapes: a scalar (equality), a list (membership), or an explicit
/// `{ op, value }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SliceConditionRepr {
    Single(ScalarValue),
    Multiple(Vec<ScalarValue>),
    Explicit { op: SliceOp, value: SliceOperand },
}

impl TryFrom<SliceConditionRepr> for SliceCondition {
    type Error = IntentError;

    fn try_from(repr: SliceConditionRepr) -> Result<Self, Self::Error> {
        let (op, operand) = match repr {
            SliceConditionRepr::Single(v) => return Ok(SliceCondition::Equal(v)),
            SliceConditionRepr::Multiple(vs) => return Ok(SliceCondition::In(vs)),
            SliceConditionRepr::Explicit { op, value } => (op, value),
        };
        match (op, operand) {
            (SliceOp::In, SliceOperand::Single(v)) => Ok(SliceCondition::In(vec![v])),
            (SliceOp::In, SliceOperand::Multiple(vs)) => Ok(SliceCondition::In(vs)),
            (SliceOp::NotIn, SliceOperand::Single(v)) => Ok(SliceCondition::NotIn(vec![v])),
            (SliceOp::NotIn, SliceOperand::Multiple(vs)) => Ok(SliceCondition::NotIn(vs)),
            (SliceOp::Equal, SliceOperand::Single(v)) => Ok(SliceCondition::Equal(v)),
            (SliceOp::NotEqual, SliceOperand::Single(v)) => Ok(SliceCondition::NotEqual(v)),
            (SliceOp::Less, SliceOperand::Single(v)) => Ok(SliceCondition::Less(v)),
            (SliceOp::LessOrEqual, SliceOperand::Single(v)) => Ok(SliceCondition::LessOrEqual(v)),
            (SliceOp::Greater, SliceOperand::Single(v)) => Ok(SliceCondition::Greater(v)),
            (SliceOp::GreaterOrEqual, SliceOperand::Single(v)) => {
                Ok(SliceCondition::GreaterOrEqual(v))
            }
            (op, SliceOperand::Multiple(_)) => Err(IntentError::InvalidParameter(format!(
                "Slice operator {op:?} expects a single value, got a list"
            ))),
        }
    }
}

/// Checks that every column named by `spec` exists in `table`.
pub fn validate_slices(table: &Table, spec: &SliceSpec) -> Result<(), IntentError> {
    for column in spec.keys() {
        table.require_column(column)?;
    }
    Ok(())
}

/// Keeps rows satisfying every condition in `spec`.
///
/// A `None` or empty spec returns the table unchanged.
pub fn slice_table(table: &Table, spec: Option<&SliceSpec>) -> Result<Table, IntentError> {
    let Some(spec) = spec.filter(|s| !s.is_empty()) else {
        return Ok(table.clone());
    };
    validate_slices(table, spec)?;

    let mut mask = vec![true; table.row_count()];
    for (column, condition) in spec {
        let col = table.require_column(column)?;
        for (keep, cell) in mask.iter_mut().zip(col.values()) {
            if *keep && !condition.matches(cell) {
                *keep = false;
            }
        }
    }

    let out = table.filter_rows(&mask);
    debug!(
        target: "slice_compare::ops",
        conditions = spec.len(),
        rows_in = table.row_count(),
        rows_out = out.row_count(),
        "Applied slices"
    );
    Ok(out)
}
