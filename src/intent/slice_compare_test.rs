use serde_json::json;

use crate::engine::errors::IntentError;
use crate::engine::ops::{DateRange, SummaryOperator};
use crate::engine::table::Table;
use crate::engine::types::ScalarValue;
use crate::intent::slice_compare::{
    SliceCompareColumn, SliceCompareOptions, SliceCompareQuery, slice_compare,
};
use crate::logging;
use crate::shared::config::QueryConfig;
use crate::test_helpers::factory::Factory;

fn india_vs_australia() -> Vec<ScalarValue> {
    vec![ScalarValue::from("India"), ScalarValue::from("Australia")]
}

fn rows(table: &Table) -> Vec<Vec<String>> {
    table
        .to_records()
        .into_iter()
        .map(|r| r.values().map(ScalarValue::to_string_repr).collect())
        .collect()
}

#[test]
fn compares_teams_with_compare_column_innermost() {
    logging::init_for_tests();
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_slice("team", india_vs_australia())
        .create();

    let out = query.execute(&table).unwrap();

    assert_eq!(out.column_names(), vec!["player", "team", "runs"]);
    assert_eq!(
        rows(&out),
        vec![
            vec!["Kohli", "India", "120"],
            vec!["Rohit", "India", "90"],
            vec!["Smith", "Australia", "50"],
            vec!["Warner", "Australia", "40"],
        ]
    );
}

#[test]
fn date_range_is_applied_before_everything_else() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_slice("team", india_vs_australia())
        .with_date_range("2020-01-01", "2020-01-31")
        .create();

    let out = query.execute(&table).unwrap();

    // Rohit only played outside January
    assert_eq!(
        rows(&out),
        vec![
            vec!["Kohli", "India", "120"],
            vec!["Smith", "Australia", "30"],
            vec!["Warner", "Australia", "40"],
        ]
    );
}

#[test]
fn without_filters_no_rows_are_dropped_before_grouping() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_dimensions(&["team", "player", "date"])
        .with_operator(SummaryOperator::Count)
        .create();

    let out = query.execute(&table).unwrap();

    // every (team, player, date) triple is unique, so each row survives as its own group
    assert_eq!(out.row_count(), table.row_count());
    assert_eq!(out.column_names(), vec!["player", "date", "team", "runs"]);
    let total: i64 = out
        .require_column("runs")
        .unwrap()
        .values()
        .iter()
        .filter_map(ScalarValue::as_i64)
        .sum();
    assert_eq!(total, 8);
}

#[test]
fn compare_column_moves_last_from_any_position() {
    let table = Factory::cricket_table().create();
    for dims in [
        ["team", "player", "date"],
        ["player", "team", "date"],
        ["player", "date", "team"],
    ] {
        let query = Factory::query().with_dimensions(&dims).create();
        let out = query.execute(&table).unwrap();
        let names = out.column_names();
        assert_eq!(names[2], "team", "dims {dims:?}");
        assert_eq!(names[3], "runs");
    }
}

#[test]
fn caller_dimensions_are_left_untouched() {
    let table = Factory::cricket_table().create();
    let dimensions = vec!["team".to_string(), "player".to_string()];
    let compare = SliceCompareColumn::new("team", ["India", "Australia"]);

    slice_compare(
        &table,
        "runs",
        &dimensions,
        None,
        &compare,
        SummaryOperator::Sum,
        &SliceCompareOptions::default(),
    )
    .unwrap();

    assert_eq!(dimensions, vec!["team", "player"]);
}

#[test]
fn mean_over_single_dimension() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_dimensions(&["team"])
        .with_operator(SummaryOperator::Mean)
        .create();

    let out = query.execute(&table).unwrap();

    assert_eq!(out.column_names(), vec!["team", "runs"]);
    assert_eq!(out.value(0, "runs"), Some(&ScalarValue::Float64(30.0)));
    assert_eq!(out.value(2, "runs"), Some(&ScalarValue::Float64(52.5)));
}

#[test]
fn missing_slice_column_fails_before_any_work() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_slice("venue", ScalarValue::from("MCG"))
        .create();

    assert_eq!(
        query.execute(&table).unwrap_err(),
        IntentError::MissingColumn {
            column: "venue".into()
        }
    );
}

#[test]
fn missing_metric_or_dimension_fails() {
    let table = Factory::cricket_table().create();

    let bad_metric = Factory::query().with_metric("wickets").create();
    assert_eq!(
        bad_metric.execute(&table).unwrap_err(),
        IntentError::missing_column("wickets")
    );

    let bad_dim = Factory::query().with_dimensions(&["team", "venue"]).create();
    assert_eq!(
        bad_dim.execute(&table).unwrap_err(),
        IntentError::missing_column("venue")
    );
}

#[test]
fn missing_date_column_fails_only_with_a_range() {
    let table = Factory::cricket_table().create();
    let options = SliceCompareOptions::default().with_date_column("match_day");

    let no_range = Factory::query().with_options(options.clone()).create();
    assert!(no_range.execute(&table).is_ok());

    let with_range = Factory::query()
        .with_options(options.with_date_range(DateRange::new("2020-01-01", "2020-01-31")))
        .create();
    assert_eq!(
        with_range.execute(&table).unwrap_err(),
        IntentError::missing_column("match_day")
    );
}

#[test]
fn compare_column_must_be_a_dimension() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_dimensions(&["player"])
        .create();

    assert!(matches!(
        query.execute(&table),
        Err(IntentError::InvalidParameter(msg)) if msg.contains("team")
    ));
}

#[test]
fn bad_date_format_surfaces_parse_error() {
    let table = Factory::cricket_table().create();
    let query = Factory::query()
        .with_options(
            SliceCompareOptions::default()
                .with_date_format("%d/%m/%Y")
                .with_date_range(DateRange::new("01/01/2020", "31/01/2020")),
        )
        .create();

    assert!(matches!(
        query.execute(&table),
        Err(IntentError::DateParse { value, .. }) if value == "2019-12-30"
    ));
}

#[test]
fn compare_column_parts() {
    let col = SliceCompareColumn::try_from(vec![
        "team".to_string(),
        "India".to_string(),
        "Australia".to_string(),
    ])
    .unwrap();
    assert_eq!(col.column(), "team");
    assert_eq!(col.values(), ["India", "Australia"]);

    assert!(matches!(
        SliceCompareColumn::try_from(Vec::new()),
        Err(IntentError::InvalidParameter(_))
    ));
}

#[test]
fn options_follow_query_config() {
    let cfg = QueryConfig {
        date_column_name: "played_on".to_string(),
        date_format: "%d.%m.%Y".to_string(),
    };
    let options = SliceCompareOptions::from_query_config(&cfg);
    assert_eq!(options.date_column_name, "played_on");
    assert_eq!(options.date_format, "%d.%m.%Y");
    assert_eq!(options.date_range, None);
}

#[test]
fn query_deserializes_from_json() {
    let query: SliceCompareQuery = serde_json::from_value(json!({
        "metric": "runs",
        "dimensions": ["team", "player"],
        "slices": { "team": ["India", "Australia"] },
        "slice_compare_column": ["team", "India", "Australia"],
        "summary_operator": "sum",
        "date_range": ["2020-01-01", "2020-01-31"],
        "date_format": "%Y-%m-%d"
    }))
    .unwrap();

    assert_eq!(query.metric, "runs");
    assert_eq!(query.summary_operator, SummaryOperator::Sum);
    assert_eq!(query.slice_compare_column.column(), "team");
    assert_eq!(
        query.options.date_range,
        Some(DateRange::new("2020-01-01", "2020-01-31"))
    );
    assert_eq!(query.options.date_column_name, "date");

    let expected = Factory::query()
        .with_slice("team", india_vs_australia())
        .with_date_range("2020-01-01", "2020-01-31")
        .create();
    assert_eq!(query, expected);
}

#[test]
fn query_with_empty_compare_column_is_rejected() {
    let result = serde_json::from_value::<SliceCompareQuery>(json!({
        "metric": "runs",
        "dimensions": ["team"],
        "slice_compare_column": [],
        "summary_operator": "sum"
    }));
    assert!(result.is_err());
}

#[test]
fn query_keeps_slice_order_from_json() {
    let query: SliceCompareQuery = serde_json::from_value(json!({
        "metric": "runs",
        "dimensions": ["team", "player"],
        "slices": {
            "team": ["India", "Australia"],
            "runs": { "op": "greater_or_equal", "value": 20 },
            "date": { "op": "not_equal", "value": "2019-12-30" }
        },
        "slice_compare_column": ["team", "India", "Australia"],
        "summary_operator": "sum"
    }))
    .unwrap();

    let slices = query.slices.as_ref().unwrap();
    assert_eq!(
        slices.keys().collect::<Vec<_>>(),
        vec!["team", "runs", "date"]
    );

    let out = query.execute(&Factory::cricket_table().create()).unwrap();
    assert_eq!(
        rows(&out),
        vec![
            vec!["Kohli", "India", "120"],
            vec!["Rohit", "India", "80"],
            vec!["Smith", "Australia", "50"],
            vec!["Warner", "Australia", "40"],
        ]
    );
}
