use diagx_core::{Record, DATE_COLUMN, TIME_COLUMN};
use lazy_regex::regex_captures;
use serde_json::Value;

use crate::jsonline::{
    json_fragment, merge_items, parse_object, report_malformed, scan_lines, take_items,
};
use crate::staging::StagedFileGuard;
use crate::{FileOutcome, RawFile};

/// Scan and remove one staged link-status feed.
pub fn extract_link_status(file: &RawFile) -> FileOutcome<Vec<Record>> {
    let _guard = StagedFileGuard::new(&file.path);
    let mut records = Vec::new();
    let scanned = scan_lines(file, |line_no, line| {
        records.extend(link_line_records(&file.filename, line_no, line));
    });
    match scanned {
        Err(err) => FileOutcome::Failed(err),
        Ok(()) if records.is_empty() => FileOutcome::Empty,
        Ok(()) => FileOutcome::Extracted(records),
    }
}

/// Records carried by one line. Only lines that start with an
/// `INFO - YYYY-MM-DD HH:MM:SS` prefix are used; the prefix supplies the
/// `Date` and `Time` of every item on the line.
pub fn link_line_records(filename: &str, line_no: usize, line: &str) -> Vec<Record> {
    let Some(fragment) = json_fragment(line) else {
        return Vec::new();
    };
    let Some((_, date, time)) =
        regex_captures!(r"^INFO - (\d{4}-\d{2}-\d{2}) (\d{2}:\d{2}:\d{2})", line)
    else {
        return Vec::new();
    };

    let mut parent = match parse_object(fragment) {
        Ok(parent) => parent,
        Err(message) => {
            report_malformed(filename, line_no, message);
            return Vec::new();
        }
    };
    parent.insert(DATE_COLUMN.to_string(), Value::String(date.to_string()));
    parent.insert(TIME_COLUMN.to_string(), Value::String(time.to_string()));

    let items = match take_items(&mut parent) {
        Ok(items) => items,
        Err(message) => {
            report_malformed(filename, line_no, message);
            return Vec::new();
        }
    };
    merge_items(&parent, items, |bad| {
        report_malformed(filename, line_no, format!("item {bad} is not an object"));
    })
}

#[cfg(test)]
mod tests {
    use super::link_line_records;
    use serde_json::json;

    #[test]
    fn prefix_supplies_date_and_time() {
        let line = r#"INFO - 2024-01-01 10:00:00 link status {"node": "X", "items": [{"a": 1}, {"a": 2}]}"#;
        let records = link_line_records("link.log", 1, line);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Date"], json!("2024-01-01"));
        assert_eq!(records[0]["Time"], json!("10:00:00"));
        assert_eq!(records[1]["node"], json!("X"));
        assert_eq!(records[1]["a"], json!(2));
    }

    #[test]
    fn lines_without_prefix_are_ignored() {
        let line = r#"DEBUG - 2024-01-01 10:00:00 {"items": [{"a": 1}]}"#;
        assert!(link_line_records("link.log", 1, line).is_empty());
    }

    #[test]
    fn invalid_json_yields_nothing() {
        let line = r#"INFO - 2024-01-01 10:00:00 {"items": [{"a": 1}]"#;
        assert!(link_line_records("link.log", 1, line).is_empty());
        let trailing = r#"INFO - 2024-01-01 10:00:00 {"items": [{"a": 1}]} trailing"#;
        assert!(link_line_records("link.log", 2, trailing).is_empty());
    }

    #[test]
    fn message_without_items_yields_nothing() {
        let line = r#"INFO - 2024-01-01 10:00:00 {"node": "X"}"#;
        assert!(link_line_records("link.log", 1, line).is_empty());
    }
}
