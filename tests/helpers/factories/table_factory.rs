use crate::engine::table::{Column, Table};
use crate::engine::types::ScalarValue;

pub struct TableFactory {
    columns: Vec<String>,
    rows: Vec<Vec<ScalarValue>>,
}

impl TableFactory {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// `[date, team, player, runs]` over late December 2019 to early February 2020.
    pub fn cricket() -> Self {
        let rows: [(&str, &str, &str, i64); 8] = [
            ("2019-12-30", "India", "Rohit", 10),
            ("2020-01-05", "India", "Kohli", 50),
            ("2020-01-05", "Australia", "Smith", 30),
            ("2020-01-10", "India", "Kohli", 70),
            ("2020-01-10", "Australia", "Warner", 40),
            ("2020-01-20", "England", "Root", 60),
            ("2020-02-02", "India", "Rohit", 80),
            ("2020-02-02", "Australia", "Smith", 20),
        ];
        let mut factory = Self::new().with_columns(&["date", "team", "player", "runs"]);
        for (date, team, player, runs) in rows {
            factory = factory.with_row(vec![
                date.into(),
                team.into(),
                player.into(),
                runs.into(),
            ]);
        }
        factory
    }

    pub fn with_columns(mut self, names: &[&str]) -> Self {
        self.columns = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_row(mut self, row: Vec<ScalarValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn create(self) -> Table {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = self.rows.iter().map(|r| r[idx].clone()).collect();
                Column::new(name.as_str(), values)
            })
            .collect();
        Table::new(columns).expect("factory table must be well formed")
    }
}
