use serde_json::{Map, Value};

use crate::{Cell, Table};

pub const DATE_COLUMN: &str = "Date";
pub const TIME_COLUMN: &str = "Time";

/// Flat JSON-line record: insertion-ordered keys to scalar-ish values.
pub type Record = Map<String, Value>;

/// Builds one table from schemaless records.
///
/// The header is `Date`, `Time`, then every other key in first-seen order
/// across the whole record set. Keys a record lacks render as empty cells.
pub fn record_table(records: &[Record]) -> Table {
    let mut header: Vec<String> = vec![DATE_COLUMN.to_string(), TIME_COLUMN.to_string()];
    for record in records {
        for key in record.keys() {
            if !header.iter().any(|h| h == key) {
                header.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|column| record.get(column).map(Cell::from_json).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    let mut table = Table::new(header);
    table.extend_rows(rows);
    table
}

#[cfg(test)]
mod tests {
    use super::{record_table, Record};
    use crate::Cell;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn date_and_time_lead_then_first_seen_order() {
        let records = vec![
            record(json!({"b": 1, "Time": "10:00:00", "a": 2, "Date": "2024-01-01"})),
            record(json!({"c": 3, "a": 4})),
        ];
        let table = record_table(&records);
        assert_eq!(table.header(), ["Date", "Time", "b", "a", "c"]);
        assert_eq!(
            table.rows()[1],
            vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Integer(4), Cell::Integer(3)]
        );
    }

    #[test]
    fn no_records_gives_header_only() {
        let table = record_table(&[]);
        assert_eq!(table.header(), ["Date", "Time"]);
        assert!(table.is_empty());
    }
}
