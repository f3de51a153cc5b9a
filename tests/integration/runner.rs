use crate::integration::scenarios::{Expectation, TestScenario};
use serde_json::Value as JsonValue;
use slice_compare::{IntentError, SliceCompareQuery, Table};
use tracing::{debug, info};

fn error_kind(err: &IntentError) -> &'static str {
    match err {
        IntentError::MissingColumn { .. } => "missing_column",
        IntentError::InvalidParameter(_) => "invalid_parameter",
        IntentError::DateParse { .. } => "date_parse",
        IntentError::Table(_) => "table",
    }
}

pub fn run_scenario(scenario: &TestScenario) -> Result<(), String> {
    info!("▶ Running scenario: {}", scenario.name);

    let table = Table::from_records(scenario.table.clone())
        .map_err(|e| format!("bad scenario table: {e}"))?;

    let query = match serde_json::from_value::<SliceCompareQuery>(scenario.query.clone()) {
        Ok(q) => q,
        Err(e) => {
            debug!("Query rejected during parsing: {}", e);
            return match &scenario.expect {
                Expectation::Error { kind } if kind == "invalid_query" => Ok(()),
                _ => Err(format!("query failed to parse: {e}")),
            };
        }
    };

    match (query.execute(&table), &scenario.expect) {
        (Ok(out), Expectation::Rows { columns, rows }) => {
            let got_columns: Vec<String> =
                out.column_names().iter().map(|c| c.to_string()).collect();
            if &got_columns != columns {
                return Err(format!(
                    "columns differ: expected {columns:?}, got {got_columns:?}"
                ));
            }
            let got_rows: Vec<Vec<JsonValue>> = out
                .to_records()
                .iter()
                .map(|r| r.values().map(|v| v.to_json()).collect())
                .collect();
            if &got_rows != rows {
                return Err(format!("rows differ: expected {rows:?}, got {got_rows:?}"));
            }
            Ok(())
        }
        (Err(err), Expectation::Error { kind }) => {
            if error_kind(&err) == kind {
                Ok(())
            } else {
                Err(format!("expected {kind} error, got {err}"))
            }
        }
        (Ok(out), Expectation::Error { kind }) => Err(format!(
            "expected {kind} error, got {} rows",
            out.row_count()
        )),
        (Err(err), Expectation::Rows { .. }) => Err(format!("unexpected error: {err}")),
    }
}
