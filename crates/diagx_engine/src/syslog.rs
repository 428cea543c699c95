use diagx_core::SyslogRecord;
use encoding_rs::Encoding;
use lazy_regex::regex;

use crate::decode::read_with_candidates;
use crate::staging::StagedFileGuard;
use crate::{ExtractError, FileOutcome, RawFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogFile {
    pub system_name: String,
    /// Sorted ascending by timestamp text.
    pub records: Vec<SyslogRecord>,
}

/// System name encoded in an export filename: the part before the first `.`,
/// last `_`-separated token. `router_core1.log` yields `core1`.
pub fn system_name_from_filename(filename: &str) -> &str {
    let stem = filename.split('.').next().unwrap_or(filename);
    stem.rsplit('_').next().unwrap_or(stem)
}

/// Decode, parse and remove one staged log or text export.
pub fn extract_syslog(file: &RawFile, encodings: &[&'static Encoding]) -> FileOutcome<SyslogFile> {
    let _guard = StagedFileGuard::new(&file.path);
    let system_name = system_name_from_filename(&file.filename);
    read_with_candidates(&file.path, encodings)
        .and_then(|decoded| parse_syslog(&file.filename, system_name, &decoded.text))
        .into()
}

pub fn parse_syslog(
    filename: &str,
    system_name: &str,
    text: &str,
) -> Result<SyslogFile, ExtractError> {
    // A traceback is only picked up from the line after the message; on the
    // message line itself it stays part of the message text.
    let line = regex!(
        r"\**(\w{2,3})\s+(\d{1,2}) (\d{2}:\d{2}:\d{2}\.\d{3}\s*\S*): %(\S+)-(\d)-(\w+): (.+)\s*(?:\s*-Traceback=(.+))?"
    );

    let mut records: Vec<SyslogRecord> = line
        .captures_iter(text)
        .filter_map(|caps| {
            let severity_level = caps[5].chars().next()?.to_digit(10)? as u8;
            Some(SyslogRecord {
                system_name: system_name.to_string(),
                month: caps[1].to_string(),
                date: caps[2].to_string(),
                timestamp: caps[3].trim_end().to_string(),
                facility: caps[4].to_string(),
                severity_level,
                mnemonic: caps[6].to_string(),
                message_text: caps[7].trim_end().to_string(),
                traceback: caps
                    .get(8)
                    .map(|m| m.as_str().trim_end().to_string())
                    .unwrap_or_default(),
            })
        })
        .collect();

    if records.is_empty() {
        return Err(ExtractError::NoMatch {
            filename: filename.to_string(),
        });
    }
    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    Ok(SyslogFile {
        system_name: system_name.to_string(),
        records,
    })
}
