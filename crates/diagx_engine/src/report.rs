use diagx_core::{Category, Summary, Table};
use serde::Serialize;

/// One output table with its worksheet title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub title: String,
    pub category: Category,
    pub table: Table,
}

/// Everything one request produces: the tables in processing order plus the summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    sheets: Vec<Sheet>,
    summary: Summary,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn summary_mut(&mut self) -> &mut Summary {
        &mut self.summary
    }

    pub fn sheet(&self, title: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.title == title)
    }

    pub fn sheets_for(&self, category: Category) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().filter(move |s| s.category == category)
    }

    /// Adds a table under `title`, suffixing a counter when the title is
    /// taken (`Syslog`, `Syslog1`, ...). Returns the title used.
    pub fn add_sheet(&mut self, title: &str, category: Category, table: Table) -> String {
        let mut unique = title.to_string();
        let mut counter = 1;
        while self.sheets.iter().any(|s| s.title == unique) {
            unique = format!("{title}{counter}");
            counter += 1;
        }
        self.sheets.push(Sheet {
            title: unique.clone(),
            category,
            table,
        });
        unique
    }
}
