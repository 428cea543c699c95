use diagx_core::EventRecord;
use encoding_rs::Encoding;
use lazy_regex::{regex, regex_captures};

use crate::decode::read_with_candidates;
use crate::staging::StagedFileGuard;
use crate::{ExtractError, FileOutcome, RawFile};

const UNKNOWN: &str = "Unknown";

/// Header values and event rows of one HTML event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogFile {
    pub ip_device: String,
    pub system_name: String,
    /// Sorted ascending by numeric entry id.
    pub events: Vec<EventRecord>,
}

/// Decode, parse and remove one staged HTML export.
pub fn extract_event_log(
    file: &RawFile,
    encodings: &[&'static Encoding],
) -> FileOutcome<EventLogFile> {
    let _guard = StagedFileGuard::new(&file.path);
    read_with_candidates(&file.path, encodings)
        .and_then(|decoded| parse_event_log(&file.filename, &decoded.text))
        .into()
}

/// Parse the device header and every colored event row of an HTML export.
pub fn parse_event_log(filename: &str, html: &str) -> Result<EventLogFile, ExtractError> {
    let ip_device = device_ip(html).unwrap_or(UNKNOWN).to_string();
    let system_name = system_name(html).unwrap_or_else(|| UNKNOWN.to_string());

    let row = regex!(
        r##"<tr><td>(\d+): <font color="#(?:3366FF|606060|009900)">(\d{2}\.\d{2}\.\d{2})\s*(\d{2}:\d{2}:\d{2}):\s*(\S+)\s*(\S+)\s*(\S+)\s*,\s*(\S+)\s*,\s*(\d+)<br>\s*\.+(\S+)"##
    );

    let mut events = Vec::new();
    for caps in row.captures_iter(html) {
        events.push(EventRecord {
            ip_device: ip_device.clone(),
            system_name: system_name.clone(),
            entry_id: caps[1].to_string(),
            date: caps[2].to_string(),
            time: caps[3].to_string(),
            error_type: caps[4].to_string(),
            error_code: caps[5].to_string(),
            task_name: caps[6].to_string(),
            filename: caps[7].to_string(),
            line: caps[8].to_string(),
            parameter: caps[9].to_string(),
        });
    }

    if events.is_empty() {
        return Err(ExtractError::NoMatch {
            filename: filename.to_string(),
        });
    }
    events.sort_by(|a, b| a.entry_order().cmp(&b.entry_order()));

    Ok(EventLogFile {
        ip_device,
        system_name,
        events,
    })
}

fn device_ip(html: &str) -> Option<&str> {
    regex_captures!(r"IP=(\d+\.\d+\.\d+\.\d+)", html).map(|(_, ip)| ip)
}

fn system_name(html: &str) -> Option<String> {
    let (_, raw) = regex_captures!(r"System Name:\s*([^\n\r]*)", html)?;
    // Markup may follow the name on the same line.
    let name = raw.split('<').next().unwrap_or_default();
    Some(name.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, color: &str, param: &str) -> String {
        format!(
            "<tr><td>{id}: <font color=\"#{color}\">01.02.24 10:11:{id:02}: ERROR 0x1F tMain , main.c , 42<br>\n...{param}\n</font></td></tr>\n"
        )
    }

    #[test]
    fn header_values_fall_back_to_unknown() {
        let html = format!("<html><body><table>{}</table></body></html>", row(1, "3366FF", "p"));
        let parsed = parse_event_log("x.html", &html).unwrap();
        assert_eq!(parsed.ip_device, "Unknown");
        assert_eq!(parsed.system_name, "Unknown");
    }

    #[test]
    fn system_name_stops_at_markup() {
        let html = "<p>System Name:   RTR-9 </b><br>\n";
        assert_eq!(system_name(html).as_deref(), Some("RTR-9"));
    }

    #[test]
    fn fields_are_captured_from_a_row() {
        let html = format!("IP=192.168.1.20\n{}", row(7, "009900", "arg=5"));
        let parsed = parse_event_log("x.html", &html).unwrap();
        let event = &parsed.events[0];
        assert_eq!(parsed.ip_device, "192.168.1.20");
        assert_eq!(event.entry_id, "7");
        assert_eq!(event.date, "01.02.24");
        assert_eq!(event.time, "10:11:07");
        assert_eq!(event.error_type, "ERROR");
        assert_eq!(event.error_code, "0x1F");
        assert_eq!(event.task_name, "tMain");
        assert_eq!(event.filename, "main.c");
        assert_eq!(event.line, "42");
        assert_eq!(event.parameter, "arg=5");
    }

    #[test]
    fn unknown_font_color_is_ignored() {
        let html = row(1, "FF0000", "p");
        let err = parse_event_log("x.html", &html).unwrap_err();
        assert!(matches!(err, ExtractError::NoMatch { .. }));
    }

    #[test]
    fn entry_ids_sort_numerically() {
        let html = [row(12, "3366FF", "a"), row(3, "606060", "b"), row(2, "009900", "c")].concat();
        let parsed = parse_event_log("x.html", &html).unwrap();
        let ids: Vec<_> = parsed.events.iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "12"]);
    }

    #[test]
    fn oversized_entry_ids_are_kept_and_sorted_last() {
        let long_id = "99999999999999999999999";
        let html = [
            row(5, "3366FF", "a").replace("<td>5:", &format!("<td>{long_id}:")),
            row(5, "606060", "b"),
        ]
        .concat();
        let parsed = parse_event_log("x.html", &html).unwrap();
        let ids: Vec<_> = parsed.events.iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["5", long_id]);
    }
}
