use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    /// Input rows, one object per row
    pub table: Vec<IndexMap<String, JsonValue>>,
    /// Raw query, deserialized by the runner so malformed queries can be tested too
    pub query: JsonValue,
    pub expect: Expectation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Exact output: column order and row order both matter
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<JsonValue>>,
    },
    /// Failure of the given kind (`missing_column`, `invalid_parameter`,
    /// `date_parse`, `invalid_query`)
    Error { kind: String },
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
