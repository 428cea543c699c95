//! Diagx engine: reads staged diagnostic exports and turns each batch into tables.
mod batch;
mod decode;
mod equipment;
mod event_log;
mod jsonline;
mod link;
mod persist;
mod report;
mod settings;
mod staging;
mod syslog;
mod types;

pub use batch::BatchProcessor;
pub use decode::{
    decode_with_candidates, read_with_candidates, resolve_encodings, DecodeError, DecodedText,
    DEFAULT_ENCODING_LABELS,
};
pub use equipment::{
    equipment_line_records, extract_equipment_status, flatten_item, split_send_time,
    EQUIPMENT_ITEMS_FIELD, MESSAGE_SEND_TIME_FIELD,
};
pub use event_log::{extract_event_log, parse_event_log, EventLogFile};
pub use jsonline::json_fragment;
pub use link::{extract_link_status, link_line_records};
pub use persist::{ensure_output_dir, write_atomically, write_json, PersistError};
pub use report::{Report, Sheet};
pub use settings::{ExtractSettings, DEFAULT_MAX_ROWS_PER_TABLE};
pub use staging::{display_name, secure_filename, stage_upload, stage_uploads, StagedFileGuard};
pub use syslog::{extract_syslog, parse_syslog, system_name_from_filename, SyslogFile};
pub use types::{ExtractError, FileOutcome, RawFile, Upload};
