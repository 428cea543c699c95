use diagx_core::{record_table, Cell, Record, Table};
use pretty_assertions::assert_eq;
use serde_json::json;

fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let value = json!({"Date": "2024-01-01", "Time": "10:00:00", "seq": i});
            match value {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            }
        })
        .collect()
}

#[test]
fn paging_twice_threshold_plus_five_yields_three_tables() {
    let threshold = 50;
    let table = record_table(&records(2 * threshold + 5));
    let header = table.header().to_vec();

    let pages = table.paginate(threshold);

    let sizes: Vec<_> = pages.iter().map(Table::len).collect();
    assert_eq!(sizes, vec![threshold, threshold, 5]);
    for page in &pages {
        assert_eq!(page.header(), header.as_slice());
    }
    let seq = header.iter().position(|h| h == "seq").unwrap();
    let order: Vec<_> = pages
        .iter()
        .flat_map(|p| p.rows().iter().map(move |r| r[seq].clone()))
        .collect();
    let expected: Vec<_> = (0..2 * threshold + 5).map(Cell::from).collect();
    assert_eq!(order, expected);
}

#[test]
fn exact_multiple_does_not_create_an_empty_page() {
    let pages = record_table(&records(20)).paginate(10);
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.len() == 10));
}

#[test]
fn table_serializes_header_and_plain_cells() {
    let mut table = Table::new(["a", "b"]);
    table.push_row(vec![Cell::from("x"), Cell::Empty]);
    let json = serde_json::to_string(&table).unwrap();
    assert_eq!(json, r#"{"header":["a","b"],"rows":[["x",null]]}"#);
}
