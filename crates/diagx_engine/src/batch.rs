use std::path::{Path, PathBuf};

use diagx_core::{
    record_table, Category, EventRecord, Format, Record, SummaryEntry, SyslogRecord, Table,
    EVENT_LOG_HEADER, SYSLOG_HEADER,
};
use diagx_logging::{diagx_info, diagx_warn};
use encoding_rs::Encoding;
use tempfile::TempDir;

use crate::equipment::extract_equipment_status;
use crate::event_log::extract_event_log;
use crate::link::extract_link_status;
use crate::persist::PersistError;
use crate::staging::stage_uploads;
use crate::syslog::extract_syslog;
use crate::{DecodeError, ExtractSettings, FileOutcome, RawFile, Report, Upload};

/// Runs every category batch of a request, one file at a time, into a [`Report`].
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    encodings: Vec<&'static Encoding>,
    max_rows_per_table: usize,
    staging_dir: Option<PathBuf>,
}

impl BatchProcessor {
    pub fn new(settings: &ExtractSettings) -> Result<Self, DecodeError> {
        Ok(Self {
            encodings: settings.candidate_encodings()?,
            max_rows_per_table: settings.max_rows_per_table.max(1),
            staging_dir: settings.staging_dir.clone(),
        })
    }

    /// Stage the uploads and process them category by category.
    pub fn run(&self, uploads: &[Upload]) -> Result<Report, PersistError> {
        // Removed on return, after every staged file has been processed.
        let scratch: TempDir;
        let dir: &Path = match &self.staging_dir {
            Some(dir) => dir,
            None => {
                scratch = TempDir::new()?;
                scratch.path()
            }
        };

        let staged = stage_uploads(dir, uploads)?;
        let mut report = Report::new();
        for category in Category::ALL {
            let batch: Vec<RawFile> = staged
                .iter()
                .filter(|file| file.category == category)
                .cloned()
                .collect();
            if !batch.is_empty() {
                self.process(category, &batch, &mut report);
            }
        }
        Ok(report)
    }

    /// Process one category batch of already staged files.
    pub fn process(&self, category: Category, files: &[RawFile], report: &mut Report) {
        diagx_info!("Processing {} {:?} file(s)", files.len(), category);
        report.summary_mut().section(category);
        match category.format() {
            Format::EventLog => self.process_event_logs(category, files, report),
            Format::Syslog => self.process_syslogs(category, files, report),
            Format::LinkStatus => self.process_link_status(category, files, report),
            Format::EquipmentStatus => self.process_equipment_status(category, files, report),
        }
    }

    fn process_event_logs(&self, category: Category, files: &[RawFile], report: &mut Report) {
        let mut table = Table::new(EVENT_LOG_HEADER);
        for file in files {
            match extract_event_log(file, &self.encodings) {
                FileOutcome::Extracted(parsed) => {
                    diagx_info!("{}: {} event(s)", file.filename, parsed.events.len());
                    report.summary_mut().push(
                        category,
                        SummaryEntry::EventLog {
                            index: file.position,
                            filename: file.filename.clone(),
                            ip_device: parsed.ip_device,
                            system_name: parsed.system_name,
                        },
                    );
                    table.extend_rows(parsed.events.into_iter().map(EventRecord::into_row));
                }
                other => log_skipped(file, &other),
            }
        }
        report.add_sheet(category.sheet_title(), category, table);
    }

    fn process_syslogs(&self, category: Category, files: &[RawFile], report: &mut Report) {
        let mut table = Table::new(SYSLOG_HEADER);
        for file in files {
            match extract_syslog(file, &self.encodings) {
                FileOutcome::Extracted(parsed) => {
                    diagx_info!("{}: {} syslog line(s)", file.filename, parsed.records.len());
                    report.summary_mut().push(
                        category,
                        SummaryEntry::Syslog {
                            index: file.position,
                            filename: file.filename.clone(),
                            system_name: parsed.system_name,
                        },
                    );
                    table.extend_rows(parsed.records.into_iter().map(SyslogRecord::into_row));
                }
                other => log_skipped(file, &other),
            }
        }
        report.add_sheet(category.sheet_title(), category, table);
    }

    fn process_link_status(&self, category: Category, files: &[RawFile], report: &mut Report) {
        let records = collect_records(files, extract_link_status);
        if records.is_empty() {
            diagx_info!("No JSON data found in {} link file(s)", files.len());
            return;
        }
        report.add_sheet(category.sheet_title(), category, record_table(&records));
        push_batch_entry(category, files, report);
    }

    fn process_equipment_status(&self, category: Category, files: &[RawFile], report: &mut Report) {
        let records = collect_records(files, extract_equipment_status);
        if records.is_empty() {
            diagx_info!("No JSON data found in {} equipment file(s)", files.len());
            return;
        }
        let pages = record_table(&records).paginate(self.max_rows_per_table);
        if pages.len() > 1 {
            diagx_info!(
                "{} equipment row(s) split over {} tables of at most {}",
                records.len(),
                pages.len(),
                self.max_rows_per_table
            );
        }
        let base = category.sheet_title();
        for (page_no, page) in pages.into_iter().enumerate() {
            let title = match page_no {
                0 => base.to_string(),
                n => format!("{base}_{}", n + 1),
            };
            report.add_sheet(&title, category, page);
        }
        push_batch_entry(category, files, report);
    }
}

fn collect_records<F>(files: &[RawFile], extract: F) -> Vec<Record>
where
    F: Fn(&RawFile) -> FileOutcome<Vec<Record>>,
{
    let mut records = Vec::new();
    for file in files {
        match extract(file) {
            FileOutcome::Extracted(found) => {
                diagx_info!("{}: {} item(s)", file.filename, found.len());
                records.extend(found);
            }
            other => log_skipped(file, &other),
        }
    }
    records
}

/// JSON-line feeds report once per batch: file count and the last file.
fn push_batch_entry(category: Category, files: &[RawFile], report: &mut Report) {
    if let Some(last) = files.last() {
        report.summary_mut().push(
            category,
            SummaryEntry::Batch {
                file_count: files.len(),
                filename: last.filename.clone(),
            },
        );
    }
}

fn log_skipped<T>(file: &RawFile, outcome: &FileOutcome<T>) {
    match outcome {
        FileOutcome::Extracted(_) => {}
        FileOutcome::Empty => diagx_info!("No events found in {}", file.filename),
        FileOutcome::Failed(err) => diagx_warn!("Error processing {}: {}", file.filename, err),
    }
}
