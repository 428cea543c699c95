use serde::Serialize;

use crate::Cell;

pub const EVENT_LOG_HEADER: [&str; 11] = [
    "IP Device",
    "System Name",
    "Entry ID",
    "Date",
    "Time",
    "Error Type",
    "Error Code",
    "TaskName",
    "Filename",
    "Line",
    "Parameter",
];

pub const SYSLOG_HEADER: [&str; 9] = [
    "System Name",
    "Month",
    "Date",
    "Timestamp",
    "Facility",
    "Severity Level",
    "Mnemonic",
    "Message Text",
    "Traceback",
];

/// One event row of a rendered HTML event log.
///
/// `ip_device` and `system_name` are per-file header values repeated on every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub ip_device: String,
    pub system_name: String,
    /// Digits as matched; may exceed any integer width.
    pub entry_id: String,
    pub date: String,
    pub time: String,
    pub error_type: String,
    pub error_code: String,
    pub task_name: String,
    pub filename: String,
    pub line: String,
    pub parameter: String,
}

impl EventRecord {
    /// Key ordering entry ids by numeric value without parsing them.
    pub fn entry_order(&self) -> (usize, &str) {
        let digits = self.entry_id.trim_start_matches('0');
        (digits.len(), digits)
    }

    pub fn into_row(self) -> Vec<Cell> {
        let entry_id = match self.entry_id.parse::<i64>() {
            Ok(id) => Cell::Integer(id),
            Err(_) => Cell::Text(self.entry_id),
        };
        vec![
            Cell::Text(self.ip_device),
            Cell::Text(self.system_name),
            entry_id,
            Cell::Text(self.date),
            Cell::Text(self.time),
            Cell::Text(self.error_type),
            Cell::Text(self.error_code),
            Cell::Text(self.task_name),
            Cell::Text(self.filename),
            Cell::Text(self.line),
            Cell::Text(self.parameter),
        ]
    }
}

/// One `%FACILITY-SEVERITY-MNEMONIC` line of a syslog export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyslogRecord {
    pub system_name: String,
    pub month: String,
    pub date: String,
    pub timestamp: String,
    pub facility: String,
    pub severity_level: u8,
    pub mnemonic: String,
    pub message_text: String,
    /// Empty when the line carries no `-Traceback=`.
    pub traceback: String,
}

impl SyslogRecord {
    pub fn into_row(self) -> Vec<Cell> {
        vec![
            Cell::Text(self.system_name),
            Cell::Text(self.month),
            Cell::Text(self.date),
            Cell::Text(self.timestamp),
            Cell::Text(self.facility),
            Cell::from(self.severity_level),
            Cell::Text(self.mnemonic),
            Cell::Text(self.message_text),
            Cell::Text(self.traceback),
        ]
    }
}
