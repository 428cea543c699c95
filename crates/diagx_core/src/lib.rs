//! Diagx core: pure tabular data model shared by the extractors and the delivery layer.
mod category;
mod cell;
mod event;
mod record;
mod summary;
mod table;

pub use category::{Category, Format};
pub use cell::Cell;
pub use event::{EventRecord, SyslogRecord, EVENT_LOG_HEADER, SYSLOG_HEADER};
pub use record::{record_table, Record, DATE_COLUMN, TIME_COLUMN};
pub use summary::{Summary, SummaryEntry, SummarySection};
pub use table::Table;
