use crate::engine::errors::IntentError;
use crate::engine::ops::crop::crop_other_columns;
use crate::test_helpers::factories::TableFactory;

fn names(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

#[test]
fn keeps_requested_columns_in_table_order() {
    let table = TableFactory::cricket().create();

    let out = crop_other_columns(&table, &names(&["runs", "team"])).unwrap();

    assert_eq!(out.column_names(), vec!["team", "runs"]);
    assert_eq!(out.row_count(), table.row_count());
}

#[test]
fn repeated_names_collapse() {
    let table = TableFactory::cricket().create();

    let out = crop_other_columns(&table, &names(&["runs", "runs", "player"])).unwrap();

    assert_eq!(out.column_names(), vec!["player", "runs"]);
}

#[test]
fn cropping_twice_is_a_no_op() {
    let table = TableFactory::cricket().create();
    let keep = names(&["team", "player", "runs"]);

    let once = crop_other_columns(&table, &keep).unwrap();
    let twice = crop_other_columns(&once, &keep).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn unknown_column_fails() {
    let table = TableFactory::cricket().create();
    assert_eq!(
        crop_other_columns(&table, &names(&["team", "venue"])).unwrap_err(),
        IntentError::MissingColumn {
            column: "venue".into()
        }
    );
}
