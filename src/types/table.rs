//! Parsed table data structures

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single parsed cell: either a numeral or the original (trimmed) text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Classify a trimmed field. Only finite numerals become `Number`.
    pub fn from_field(field: &str) -> Self {
        match field.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(field.to_string()),
        }
    }

    /// Empty text cell, used for missing trailing fields
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// True for the empty-string cell
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One table row; always exactly as wide as the header
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Untyped input file after parsing: ordered unique headers plus rows
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl RawTable {
    /// Build a table. Callers guarantee unique headers and header-wide rows.
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            index,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Cell lookup by row position and header name
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All cells of a column in source order; empty iterator if the column is absent
    pub fn column_cells<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let col = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |r| col.and_then(|c| r.get(c)))
    }
}

/// Numeric values of one column, non-numeric and missing cells dropped.
///
/// `rows[k]` is the table row `values[k]` came from, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<f64>,
    pub rows: Vec<usize>,
}

impl NumericColumn {
    /// Column with no gaps: value `k` comes from row `k`
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let rows = (0..values.len()).collect();
        Self::with_rows(name, rows, values)
    }

    /// Column whose values come from the given source rows
    pub fn with_rows(name: impl Into<String>, rows: Vec<usize>, values: Vec<f64>) -> Self {
        debug_assert_eq!(rows.len(), values.len());
        Self {
            name: name.into(),
            values,
            rows,
        }
    }

    /// Values of both columns restricted to the rows where both are present
    pub fn paired_with(&self, other: &NumericColumn) -> (Vec<f64>, Vec<f64>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.rows.len() && j < other.rows.len() {
            match self.rows[i].cmp(&other.rows[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        (left, right)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered named feature columns used for correlation analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    columns: Vec<NumericColumn>,
}

impl FeatureSet {
    pub fn new(columns: Vec<NumericColumn>) -> Self {
        Self { columns }
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[NumericColumn] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&NumericColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_classification() {
        assert_eq!(CellValue::from_field("12.5"), CellValue::Number(12.5));
        assert_eq!(CellValue::from_field("-3"), CellValue::Number(-3.0));
        assert_eq!(CellValue::from_field("1e3"), CellValue::Number(1000.0));
        assert_eq!(CellValue::from_field("abc"), CellValue::Text("abc".into()));
        assert_eq!(CellValue::from_field("NaN"), CellValue::Text("NaN".into()));
        assert!(CellValue::from_field("").is_empty());
    }

    #[test]
    fn test_table_lookup() {
        let table = RawTable::new(
            vec!["Time".into(), "Amount".into()],
            vec![
                Row::new(vec![CellValue::Number(0.0), CellValue::Number(9.99)]),
                Row::new(vec![CellValue::Number(1.0), CellValue::empty()]),
            ],
        );

        assert_eq!(table.total_rows(), 2);
        assert!(table.has_column("Amount"));
        assert!(!table.has_column("Class"));
        assert_eq!(table.cell(0, "Amount"), Some(&CellValue::Number(9.99)));
        assert_eq!(table.cell(5, "Amount"), None);
        assert_eq!(table.column_cells("Amount").count(), 2);
        assert_eq!(table.column_cells("Class").count(), 0);
    }
}
