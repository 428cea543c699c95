use serde::Serialize;

/// Upload category, decided by the delivery layer from the filename.
///
/// `Log` and `Text` share the syslog extractor but are kept apart so each
/// batch gets its own table and summary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Html,
    Log,
    Text,
    Link,
    Equipment,
}

/// Extraction format; each one owns a grammar and a column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    EventLog,
    Syslog,
    LinkStatus,
    EquipmentStatus,
}

impl Category {
    /// Batches run in this order.
    pub const ALL: [Category; 5] = [
        Category::Html,
        Category::Log,
        Category::Text,
        Category::Link,
        Category::Equipment,
    ];

    pub fn format(self) -> Format {
        match self {
            Category::Html => Format::EventLog,
            Category::Log | Category::Text => Format::Syslog,
            Category::Link => Format::LinkStatus,
            Category::Equipment => Format::EquipmentStatus,
        }
    }

    pub fn sheet_title(self) -> &'static str {
        match self.format() {
            Format::EventLog => "Output_event_log",
            Format::Syslog => "Syslog",
            Format::LinkStatus => "link_status_jms",
            Format::EquipmentStatus => "equipment_status",
        }
    }

    pub fn summary_header(self) -> Vec<String> {
        let columns: &[&str] = match self.format() {
            Format::EventLog => &["No.", "Filename", "IP Devices", "System Names"],
            Format::Syslog => &["No.", "Filename", "System Names"],
            Format::LinkStatus | Format::EquipmentStatus => &["No.", "Filename"],
        };
        columns.iter().map(|c| c.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Format};

    #[test]
    fn log_and_text_share_the_syslog_format() {
        assert_eq!(Category::Log.format(), Format::Syslog);
        assert_eq!(Category::Text.format(), Format::Syslog);
        assert_eq!(Category::Text.sheet_title(), Category::Log.sheet_title());
    }

    #[test]
    fn json_formats_have_two_summary_columns() {
        assert_eq!(Category::Link.summary_header(), vec!["No.", "Filename"]);
        assert_eq!(Category::Equipment.summary_header().len(), 2);
        assert_eq!(Category::Html.summary_header().len(), 4);
    }
}
