use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One scalar table value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Converts a JSON value into a cell. Nested arrays and objects become
    /// their compact JSON text.
    pub fn from_json(value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Cell::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Cell::Float(f)
                } else {
                    Cell::Text(n.to_string())
                }
            }
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Cell::Integer)
            .unwrap_or_else(|_| Cell::Text(value.to_string()))
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::from(value as u64)
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Cell::Integer(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use serde_json::json;

    #[test]
    fn json_scalars_map_to_matching_cells() {
        assert_eq!(Cell::from_json(&json!("x")), Cell::Text("x".into()));
        assert_eq!(Cell::from_json(&json!(7)), Cell::Integer(7));
        assert_eq!(Cell::from_json(&json!(1.5)), Cell::Float(1.5));
        assert_eq!(Cell::from_json(&json!(true)), Cell::Bool(true));
        assert_eq!(Cell::from_json(&json!(null)), Cell::Empty);
    }

    #[test]
    fn nested_values_render_as_compact_json() {
        let cell = Cell::from_json(&json!({"a": [1, 2]}));
        assert_eq!(cell, Cell::Text(r#"{"a":[1,2]}"#.into()));
    }

    #[test]
    fn empty_cell_displays_as_nothing() {
        assert_eq!(Cell::Empty.to_string(), "");
        assert!(Cell::Empty.is_empty());
    }
}
