use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::engine::errors::IntentError;
use crate::engine::types::{GroupValue, ScalarValue};

/// Aggregation applied to the metric column after grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryOperator {
    Sum,
    Mean,
    Median,
    /// Count of non-null values
    Count,
    Max,
    Min,
    /// Sample standard deviation
    Std,
    /// Sample variance
    Var,
    First,
    Last,
    /// Count of distinct non-null values
    Distinct,
}

impl SummaryOperator {
    pub const ALL: [SummaryOperator; 11] = [
        SummaryOperator::Sum,
        SummaryOperator::Mean,
        SummaryOperator::Median,
        SummaryOperator::Count,
        SummaryOperator::Max,
        SummaryOperator::Min,
        SummaryOperator::Std,
        SummaryOperator::Var,
        SummaryOperator::First,
        SummaryOperator::Last,
        SummaryOperator::Distinct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryOperator::Sum => "SUM",
            SummaryOperator::Mean => "MEAN",
            SummaryOperator::Median => "MEDIAN",
            SummaryOperator::Count => "COUNT",
            SummaryOperator::Max => "MAX",
            SummaryOperator::Min => "MIN",
            SummaryOperator::Std => "STD",
            SummaryOperator::Var => "VAR",
            SummaryOperator::First => "FIRST",
            SummaryOperator::Last => "LAST",
            SummaryOperator::Distinct => "DISTINCT",
        }
    }
}

impl fmt::Display for SummaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryOperator {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" | "TOTAL" => Ok(SummaryOperator::Sum),
            "MEAN" | "AVG" => Ok(SummaryOperator::Mean),
            "MEDIAN" => Ok(SummaryOperator::Median),
            "COUNT" => Ok(SummaryOperator::Count),
            "MAX" => Ok(SummaryOperator::Max),
            "MIN" => Ok(SummaryOperator::Min),
            "STD" | "STDDEV" => Ok(SummaryOperator::Std),
            "VAR" | "VARIANCE" => Ok(SummaryOperator::Var),
            "FIRST" => Ok(SummaryOperator::First),
            "LAST" => Ok(SummaryOperator::Last),
            "DISTINCT" | "COUNT_UNIQUE" => Ok(SummaryOperator::Distinct),
            _ => Err(IntentError::InvalidParameter(format!(
                "Unknown summary operator: {s}"
            ))),
        }
    }
}

impl Serialize for SummaryOperator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SummaryOperator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Aggregator enum with concrete implementations per operator
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorImpl {
    Sum(Sum),
    Mean(Mean),
    Median(Median),
    Count(Count),
    Extreme(Extreme),
    Spread(Spread),
    Pick(Pick),
    Distinct(Distinct),
}

impl AggregatorImpl {
    pub fn from_operator(op: SummaryOperator, field: &str) -> Self {
        let field = field.to_string();
        match op {
            SummaryOperator::Sum => Self::Sum(Sum::new(field)),
            SummaryOperator::Mean => Self::Mean(Mean::new(field)),
            SummaryOperator::Median => Self::Median(Median::new(field)),
            SummaryOperator::Count => Self::Count(Count::new(field)),
            SummaryOperator::Max => Self::Extreme(Extreme::new(field, Ordering::Greater)),
            SummaryOperator::Min => Self::Extreme(Extreme::new(field, Ordering::Less)),
            SummaryOperator::Std => Self::Spread(Spread::new(field, true)),
            SummaryOperator::Var => Self::Spread(Spread::new(field, false)),
            SummaryOperator::First => Self::Pick(Pick::new(field, false)),
            SummaryOperator::Last => Self::Pick(Pick::new(field, true)),
            SummaryOperator::Distinct => Self::Distinct(Distinct::new(field)),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            AggregatorImpl::Sum(a) => &a.field,
            AggregatorImpl::Mean(a) => &a.field,
            AggregatorImpl::Median(a) => &a.field,
            AggregatorImpl::Count(a) => &a.field,
            AggregatorImpl::Extreme(a) => &a.field,
            AggregatorImpl::Spread(a) => &a.field,
            AggregatorImpl::Pick(a) => &a.field,
            AggregatorImpl::Distinct(a) => &a.field,
        }
    }

    /// Feed one cell. Nulls are skipped by every aggregator.
    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        if value.is_null() {
            return Ok(());
        }
        match self {
            AggregatorImpl::Sum(a) => a.update(value),
            AggregatorImpl::Mean(a) => a.update(value),
            AggregatorImpl::Median(a) => a.update(value),
            AggregatorImpl::Count(a) => {
                a.update();
                Ok(())
            }
            AggregatorImpl::Extreme(a) => a.update(value),
            AggregatorImpl::Spread(a) => a.update(value),
            AggregatorImpl::Pick(a) => {
                a.update(value);
                Ok(())
            }
            AggregatorImpl::Distinct(a) => {
                a.update(value);
                Ok(())
            }
        }
    }

    pub fn finalize(&self) -> ScalarValue {
        match self {
            AggregatorImpl::Sum(a) => a.finalize(),
            AggregatorImpl::Mean(a) => a.finalize(),
            AggregatorImpl::Median(a) => a.finalize(),
            AggregatorImpl::Count(a) => a.finalize(),
            AggregatorImpl::Extreme(a) => a.finalize(),
            AggregatorImpl::Spread(a) => a.finalize(),
            AggregatorImpl::Pick(a) => a.finalize(),
            AggregatorImpl::Distinct(a) => a.finalize(),
        }
    }
}

fn numeric(field: &str, op: &str, value: &ScalarValue) -> Result<f64, IntentError> {
    value.as_f64().ok_or_else(|| {
        IntentError::InvalidParameter(format!(
            "{op} requires a numeric column, but '{field}' holds {} value '{}'",
            value.logical_type(),
            value
        ))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    pub field: String,
    int_sum: i64,
    float_sum: f64,
    all_int: bool,
}

impl Sum {
    pub fn new(field: String) -> Self {
        Self {
            field,
            int_sum: 0,
            float_sum: 0.0,
            all_int: true,
        }
    }

    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        let f = numeric(&self.field, "SUM", value)?;
        self.float_sum += f;
        if self.all_int {
            match value.as_i64().and_then(|i| self.int_sum.checked_add(i)) {
                Some(next) => self.int_sum = next,
                // Floats or overflow switch the result to Float64
                None => self.all_int = false,
            }
        }
        Ok(())
    }

    pub fn finalize(&self) -> ScalarValue {
        if self.all_int {
            ScalarValue::Int64(self.int_sum)
        } else {
            ScalarValue::Float64(self.float_sum)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mean {
    pub field: String,
    sum: f64,
    count: u64,
}

impl Mean {
    pub fn new(field: String) -> Self {
        Self {
            field,
            sum: 0.0,
            count: 0,
        }
    }

    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        self.sum += numeric(&self.field, "MEAN", value)?;
        self.count += 1;
        Ok(())
    }

    pub fn finalize(&self) -> ScalarValue {
        if self.count == 0 {
            ScalarValue::Null
        } else {
            ScalarValue::Float64(self.sum / self.count as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Median {
    pub field: String,
    values: Vec<f64>,
}

impl Median {
    pub fn new(field: String) -> Self {
        Self {
            field,
            values: Vec::new(),
        }
    }

    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        self.values.push(numeric(&self.field, "MEDIAN", value)?);
        Ok(())
    }

    pub fn finalize(&self) -> ScalarValue {
        if self.values.is_empty() {
            return ScalarValue::Null;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        ScalarValue::Float64(median)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub field: String,
    count: i64,
}

impl Count {
    pub fn new(field: String) -> Self {
        Self { field, count: 0 }
    }

    #[inline]
    pub fn update(&mut self) {
        self.count += 1;
    }

    pub fn finalize(&self) -> ScalarValue {
        ScalarValue::Int64(self.count)
    }
}

/// MAX (`keep == Greater`) or MIN (`keep == Less`) over comparable values.
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub field: String,
    keep: Ordering,
    best: Option<ScalarValue>,
}

impl Extreme {
    pub fn new(field: String, keep: Ordering) -> Self {
        Self {
            field,
            keep,
            best: None,
        }
    }

    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        let Some(current) = &self.best else {
            self.best = Some(value.clone());
            return Ok(());
        };
        match value.compare(current) {
            Some(ord) if ord == self.keep => self.best = Some(value.clone()),
            Some(_) => {}
            None => {
                let op = if self.keep == Ordering::Greater {
                    "MAX"
                } else {
                    "MIN"
                };
                return Err(IntentError::InvalidParameter(format!(
                    "{op} cannot compare {} with {} in column '{}'",
                    value.logical_type(),
                    current.logical_type(),
                    self.field
                )));
            }
        }
        Ok(())
    }

    pub fn finalize(&self) -> ScalarValue {
        self.best.clone().unwrap_or(ScalarValue::Null)
    }
}

/// Sample variance (or its square root) using Welford's online update.
#[derive(Debug, Clone, PartialEq)]
pub struct Spread {
    pub field: String,
    sqrt: bool,
    count: u64,
    mean: f64,
    m2: f64,
}

impl Spread {
    pub fn new(field: String, sqrt: bool) -> Self {
        Self {
            field,
            sqrt,
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    pub fn update(&mut self, value: &ScalarValue) -> Result<(), IntentError> {
        let op = if self.sqrt { "STD" } else { "VAR" };
        let x = numeric(&self.field, op, value)?;
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        Ok(())
    }

    pub fn finalize(&self) -> ScalarValue {
        if self.count < 2 {
            return ScalarValue::Null;
        }
        let var = self.m2 / (self.count - 1) as f64;
        ScalarValue::Float64(if self.sqrt { var.sqrt() } else { var })
    }
}

/// FIRST (`last == false`) or LAST (`last == true`) non-null value.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub field: String,
    last: bool,
    value: Option<ScalarValue>,
}

impl Pick {
    pub fn new(field: String, last: bool) -> Self {
        Self {
            field,
            last,
            value: None,
        }
    }

    pub fn update(&mut self, value: &ScalarValue) {
        if self.last || self.value.is_none() {
            self.value = Some(value.clone());
        }
    }

    pub fn finalize(&self) -> ScalarValue {
        self.value.clone().unwrap_or(ScalarValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distinct {
    pub field: String,
    seen: HashSet<GroupValue>,
}

impl Distinct {
    pub fn new(field: String) -> Self {
        Self {
            field,
            seen: HashSet::new(),
        }
    }

    pub fn update(&mut self, value: &ScalarValue) {
        self.seen.insert(GroupValue::from(value));
    }

    pub fn finalize(&self) -> ScalarValue {
        ScalarValue::Int64(self.seen.len() as i64)
    }
}
