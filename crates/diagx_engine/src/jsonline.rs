//! Line scanning shared by the link-status and equipment-status feeds.
//!
//! Both feeds are plain log files where some lines carry a JSON object after a
//! free-form prefix. Lines are read as UTF-8 one at a time; bad lines are
//! logged and skipped, never fatal for the file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use diagx_core::Record;
use diagx_logging::diagx_warn;
use lazy_regex::regex_is_match;
use serde_json::Value;

use crate::{ExtractError, RawFile};

/// Field holding the per-message item array.
pub const ITEMS_FIELD: &str = "items";

/// JSON text of a line, from its first `{`, if the line carries a braced fragment.
pub fn json_fragment(line: &str) -> Option<&str> {
    if !regex_is_match!(r"\{.*\}", line) {
        return None;
    }
    line.find('{').map(|start| &line[start..])
}

/// Parse a fragment into an object record.
pub fn parse_object(fragment: &str) -> Result<Record, String> {
    match serde_json::from_str::<Value>(fragment) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, found {}", kind_of(&other))),
        Err(err) => Err(err.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Call `on_line` with the 1-based number and text of every UTF-8 line of the file.
pub fn scan_lines<F>(file: &RawFile, mut on_line: F) -> Result<(), ExtractError>
where
    F: FnMut(usize, &str),
{
    let handle = File::open(&file.path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ExtractError::MissingFile {
            path: file.path.clone(),
        },
        _ => ExtractError::Io {
            path: file.path.clone(),
            source,
        },
    })?;
    let reader = BufReader::new(handle);
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(|source| ExtractError::Io {
            path: file.path.clone(),
            source,
        })?;
        match String::from_utf8(raw) {
            Ok(line) => on_line(idx + 1, &line),
            Err(_) => diagx_warn!(
                "{} line {} is not valid UTF-8, skipped",
                file.filename,
                idx + 1
            ),
        }
    }
    Ok(())
}

/// Log a line-level payload fault and move on.
pub fn report_malformed(filename: &str, line: usize, message: impl Into<String>) {
    let err = ExtractError::MalformedPayload {
        filename: filename.to_string(),
        line,
        message: message.into(),
    };
    diagx_warn!("{}", err);
}

/// Remove the item array from a parsed message. A missing field means no items.
pub fn take_items(record: &mut Record) -> Result<Vec<Value>, String> {
    match record.shift_remove(ITEMS_FIELD) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(format!("`items` is {}, not an array", kind_of(&other))),
    }
}

/// Merge every parent field into each item. Parent values win on shared keys;
/// a shared key keeps the item's column position.
pub fn merge_items<F>(parent: &Record, items: Vec<Value>, mut on_bad_item: F) -> Vec<Record>
where
    F: FnMut(&Value),
{
    let mut merged = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(mut fields) => {
                for (key, value) in parent {
                    fields.insert(key.clone(), value.clone());
                }
                merged.push(fields);
            }
            other => on_bad_item(&other),
        }
    }
    merged
}
