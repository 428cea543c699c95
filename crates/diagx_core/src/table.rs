use serde::Serialize;

use crate::Cell;

/// Ordered header plus ordered rows. Every row is as wide as the header.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, padding short rows with empty cells and dropping
    /// cells past the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.header.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn extend_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        for row in rows {
            self.push_row(row);
        }
    }

    /// Index of a header column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Splits into tables of at most `max_rows` rows each, all carrying the
    /// same header. Row order is preserved and a header-only table stays a
    /// single table.
    pub fn paginate(self, max_rows: usize) -> Vec<Table> {
        let max_rows = max_rows.max(1);
        if self.rows.len() <= max_rows {
            return vec![self];
        }
        let Table { header, rows } = self;
        let mut pages = Vec::with_capacity(rows.len().div_ceil(max_rows));
        let mut rows = rows.into_iter().peekable();
        while rows.peek().is_some() {
            pages.push(Table {
                header: header.clone(),
                rows: rows.by_ref().take(max_rows).collect(),
            });
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::Cell;

    fn numbered(count: usize) -> Table {
        let mut table = Table::new(["n"]);
        for i in 0..count {
            table.push_row(vec![Cell::from(i)]);
        }
        table
    }

    #[test]
    fn push_row_normalizes_width() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec![Cell::from("x")]);
        table.push_row(vec![Cell::from("1"), Cell::from("2"), Cell::from("3")]);
        assert_eq!(table.rows()[0], vec![Cell::from("x"), Cell::Empty]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn paginate_spills_remaining_rows() {
        let threshold = 10;
        let pages = numbered(2 * threshold + 5).paginate(threshold);
        let sizes: Vec<_> = pages.iter().map(Table::len).collect();
        assert_eq!(sizes, vec![threshold, threshold, 5]);
        assert!(pages.iter().all(|p| p.header() == ["n"]));
        assert_eq!(pages[1].rows()[0], vec![Cell::Integer(10)]);
    }

    #[test]
    fn paginate_keeps_header_only_table() {
        let pages = Table::new(["a"]).paginate(10);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn zero_threshold_behaves_as_one() {
        assert_eq!(numbered(3).paginate(0).len(), 3);
    }
}
