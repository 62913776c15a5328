//! Row parser: raw delimited text into a typed [`RawTable`]

use crate::error::{AnalysisError, Result};
use crate::types::table::{CellValue, RawTable, Row};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Parse comma-separated text. The first non-blank line is the header.
///
/// Blank lines are skipped everywhere. Short rows are padded with empty
/// text cells, long rows are truncated to the header width.
#[tracing::instrument(level = "debug", skip(content), fields(bytes = content.len()))]
pub fn parse_table(content: &str) -> Result<RawTable> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or(AnalysisError::EmptyInput)?;
    let headers = unique_headers(header_line.split(',').map(clean_field));

    let width = headers.len();
    let mut rows = Vec::new();
    let mut padded = 0usize;
    let mut truncated = 0usize;

    for line in lines {
        let mut values: Vec<CellValue> = line
            .split(',')
            .take(width)
            .map(|f| CellValue::from_field(clean_field(f)))
            .collect();

        if values.len() < width {
            padded += 1;
            values.resize(width, CellValue::empty());
        } else if line.split(',').count() > width {
            truncated += 1;
        }

        trace!(row = rows.len(), fields = values.len(), "Parsed row");
        rows.push(Row::new(values));
    }

    debug!(
        columns = width,
        rows = rows.len(),
        padded_rows = padded,
        truncated_rows = truncated,
        "Table parsed"
    );

    Ok(RawTable::new(headers, rows))
}

/// Name every header column uniquely.
///
/// An empty name becomes `Unnamed: <position>`. A repeated name gets the
/// first free `.1`, `.2`, ... suffix, so `A,A` reads as `A,A.1`.
fn unique_headers<'a>(fields: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (position, field) in fields.enumerate() {
        let base = if field.is_empty() {
            format!("Unnamed: {}", position)
        } else {
            field.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        if name != base {
            debug!(column = position, original = %base, renamed = %name, "Renamed duplicate header");
        }

        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

/// Trim surrounding whitespace and one pair of enclosing double quotes
fn clean_field(field: &str) -> &str {
    let field = field.trim();
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_basic_parse() {
        let table = parse_table("Time,Amount,Class\n0,100,1\n1, 50.5 ,0\n").unwrap();

        assert_eq!(table.headers(), ["Time", "Amount", "Class"]);
        assert_eq!(table.total_rows(), 2);
        assert_eq!(table.cell(1, "Amount"), Some(&CellValue::Number(50.5)));
        assert_eq!(table.cell(0, "Class"), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_blank_lines_dropped() {
        let table = parse_table("\n  \nA,B\n\n1,2\n   \n3,4\r\n").unwrap();
        assert_eq!(table.headers(), ["A", "B"]);
        assert_eq!(table.total_rows(), 2);
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        for input in ["", "\n\n", "   \r\n  "] {
            let err = parse_table(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
    }

    #[test]
    fn test_header_only_is_valid() {
        let table = parse_table("Time,Amount,Class\n").unwrap();
        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.total_rows(), 0);
    }

    #[test]
    fn test_short_row_padded() {
        let table = parse_table("A,B,C\n1\n").unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row.get(0), Some(&CellValue::Number(1.0)));
        assert!(row.get(1).unwrap().is_empty());
        assert!(row.get(2).unwrap().is_empty());
    }

    #[test]
    fn test_long_row_truncated() {
        let table = parse_table("A,B\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.cell(0, "B"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_quotes_stripped() {
        let table = parse_table("\"Name\",\"Amount\"\n\"alice\",\"12.5\"\n\"\",x\"\n").unwrap();
        assert_eq!(table.headers(), ["Name", "Amount"]);
        assert_eq!(table.cell(0, "Name"), Some(&CellValue::Text("alice".into())));
        assert_eq!(table.cell(0, "Amount"), Some(&CellValue::Number(12.5)));
        assert!(table.cell(1, "Name").unwrap().is_empty());
        assert_eq!(table.cell(1, "Amount"), Some(&CellValue::Text("x\"".into())));
    }

    #[test]
    fn test_mixed_cells() {
        let table = parse_table("id,amount\nabc,\n7,n/a\n").unwrap();
        assert_eq!(table.cell(0, "id"), Some(&CellValue::Text("abc".into())));
        assert!(table.cell(0, "amount").unwrap().is_empty());
        assert_eq!(table.cell(1, "amount"), Some(&CellValue::Text("n/a".into())));
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let table = parse_table("A,B,A,A\n1,2,3,4").unwrap();
        assert_eq!(table.headers(), ["A", "B", "A.1", "A.2"]);
        assert_eq!(table.cell(0, "A"), Some(&CellValue::Number(1.0)));
        assert_eq!(table.cell(0, "A.2"), Some(&CellValue::Number(4.0)));
    }

    #[test]
    fn test_renamed_header_skips_taken_name() {
        let table = parse_table("A,A.1,A\n1,2,3").unwrap();
        assert_eq!(table.headers(), ["A", "A.1", "A.2"]);
    }

    #[test]
    fn test_trailing_empty_headers_accepted() {
        let table = parse_table("Time,Amount,Class,,\n0,1,0,,\n").unwrap();
        assert_eq!(
            table.headers(),
            ["Time", "Amount", "Class", "Unnamed: 3", "Unnamed: 4"]
        );
        assert_eq!(table.total_rows(), 1);
        assert_eq!(table.cell(0, "Class"), Some(&CellValue::Number(0.0)));
        assert!(table.cell(0, "Unnamed: 4").unwrap().is_empty());
    }
}
