use crate::engine::types::ScalarValue;

/// A named, ordered sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<ScalarValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<ScalarValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&ScalarValue> {
        self.values.get(row)
    }

    /// Copies the cells at `rows`, in the given order.
    pub fn take(&self, rows: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            values: rows.iter().map(|&r| self.values[r].clone()).collect(),
        }
    }

    pub(crate) fn push(&mut self, value: ScalarValue) {
        self.values.push(value);
    }
}
