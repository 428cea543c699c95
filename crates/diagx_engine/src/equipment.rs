use diagx_core::{Record, DATE_COLUMN, TIME_COLUMN};
use serde_json::Value;

use crate::jsonline::{
    json_fragment, merge_items, parse_object, report_malformed, scan_lines, take_items,
};
use crate::staging::StagedFileGuard;
use crate::{FileOutcome, RawFile};

pub const MESSAGE_SEND_TIME_FIELD: &str = "messageSendTime";
pub const EQUIPMENT_ITEMS_FIELD: &str = "equipmentItems";

/// Scan and remove one staged equipment-status feed.
pub fn extract_equipment_status(file: &RawFile) -> FileOutcome<Vec<Record>> {
    let _guard = StagedFileGuard::new(&file.path);
    let mut records = Vec::new();
    let scanned = scan_lines(file, |line_no, line| {
        records.extend(equipment_line_records(&file.filename, line_no, line));
    });
    match scanned {
        Err(err) => FileOutcome::Failed(err),
        Ok(()) if records.is_empty() => FileOutcome::Empty,
        Ok(()) => FileOutcome::Extracted(records),
    }
}

/// Split `2024-03-01T10:20:30.123+01:00` into `2024-03-01` and `10:20:30`.
///
/// Only a `+` offset is cut; the value must contain exactly one `T`.
pub fn split_send_time(value: &str) -> Option<(&str, &str)> {
    let (date, time) = value.split_once('T')?;
    if time.contains('T') {
        return None;
    }
    let time = time.split('+').next().unwrap_or(time);
    let time = time.split('.').next().unwrap_or(time);
    Some((date, time))
}

/// Render a nested `equipmentItems` structure as one text value.
pub fn flatten_item(item: Value) -> Value {
    match item {
        Value::Object(mut fields) => {
            if let Some(nested) = fields.get_mut(EQUIPMENT_ITEMS_FIELD) {
                if !nested.is_string() {
                    *nested = Value::String(nested.to_string());
                }
            }
            Value::Object(fields)
        }
        other => other,
    }
}

/// Records carried by one line. Date and time come from the payload's own
/// `messageSendTime`; without it the records carry neither.
pub fn equipment_line_records(filename: &str, line_no: usize, line: &str) -> Vec<Record> {
    let Some(fragment) = json_fragment(line) else {
        return Vec::new();
    };
    let mut parent = match parse_object(fragment) {
        Ok(parent) => parent,
        Err(message) => {
            report_malformed(filename, line_no, message);
            return Vec::new();
        }
    };

    if let Some(send_time) = parent.get(MESSAGE_SEND_TIME_FIELD).cloned() {
        let split = send_time
            .as_str()
            .and_then(split_send_time)
            .map(|(date, time)| (date.to_string(), time.to_string()));
        let Some((date, time)) = split else {
            report_malformed(
                filename,
                line_no,
                format!("unusable {MESSAGE_SEND_TIME_FIELD} {send_time}"),
            );
            return Vec::new();
        };
        parent.insert(DATE_COLUMN.to_string(), Value::String(date));
        parent.insert(TIME_COLUMN.to_string(), Value::String(time));
    }

    let items = match take_items(&mut parent) {
        Ok(items) => items,
        Err(message) => {
            report_malformed(filename, line_no, message);
            return Vec::new();
        }
    };
    let items = items.into_iter().map(flatten_item).collect();
    merge_items(&parent, items, |bad| {
        report_malformed(filename, line_no, format!("item {bad} is not an object"));
    })
}
