//! Comma-separated dataset parsing.
//!
//! Supports quoted fields with `""` escapes, embedded separators and line
//! breaks inside quotes, and `\n`, `\r\n` or `\r` record terminators.

use std::collections::HashMap;

/// A data record keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and fixtures.
    #[must_use]
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), value.to_string());
        self
    }

    /// Value of `column`, or `""` when the column is absent.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map_or("", String::as_str)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(String::is_empty)
    }
}

/// Split `text` into raw records.
///
/// Blank lines produce no record. Cells are returned untrimmed.
#[must_use]
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\n' | '\r' => {
                if !field.is_empty() || !record.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                field.clear();
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

/// Parse `text` with its first record as the header.
///
/// Header names and values are trimmed. Missing trailing cells read as `""`;
/// cells beyond the header are ignored; all-empty records are dropped.
#[must_use]
pub fn parse_tabular(text: &str) -> Vec<Row> {
    let mut records = parse_records(text).into_iter();
    let Some(header) = records.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(|name| name.trim().to_string()).collect();

    records
        .filter(|record| record.iter().any(|cell| !cell.is_empty()))
        .map(|record| {
            let cells = header
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let value = record.get(idx).map_or("", |cell| cell.trim());
                    (name.clone(), value.to_string())
                })
                .collect();
            Row { cells }
        })
        .collect()
}

/// Serialize records, quoting cells that need it.
#[must_use]
pub fn write_tabular(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    write_record(&mut out, header.iter().copied());
    for row in rows {
        write_record(&mut out, row.iter().map(String::as_str));
    }
    out
}

fn write_record<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(',');
        }
        if cell.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_records() {
        let records = parse_records("a,b\n1,2\n");
        assert_eq!(records, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn handles_all_line_endings() {
        let records = parse_records("h\r\nx\ry\nz");
        assert_eq!(records, vec![vec!["h"], vec!["x"], vec!["y"], vec!["z"]]);
    }

    #[test]
    fn quoted_fields_keep_separators_and_escapes() {
        let records = parse_records("\"a, b\",\"say \"\"hi\"\"\",\"line\nbreak\"\n");
        assert_eq!(records, vec![vec!["a, b", "say \"hi\"", "line\nbreak"]]);
    }

    #[test]
    fn blank_lines_produce_no_records() {
        let records = parse_records("a\n\n\r\n\nb\n");
        assert_eq!(records, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn trailing_separator_keeps_empty_cell() {
        let records = parse_records("a,\n");
        assert_eq!(records, vec![vec!["a", ""]]);
    }

    #[test]
    fn rows_are_keyed_by_trimmed_header() {
        let rows = parse_tabular(" id , stem \n 1 , What? \n2\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), "1");
        assert_eq!(rows[0].get("stem"), "What?");
        assert_eq!(rows[1].get("stem"), "");
        assert!(rows[1].contains("stem"));
        assert_eq!(rows[1].get("missing"), "");
    }

    #[test]
    fn all_empty_records_are_dropped() {
        let rows = parse_tabular("a,b\n,\n1,2\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("a"), "1");
    }

    #[test]
    fn extra_cells_are_ignored() {
        let rows = parse_tabular("a\n1,2,3\n");
        assert_eq!(rows, vec![Row::new().with("a", "1")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_tabular("").is_empty());
        assert!(parse_tabular("only,header\n").is_empty());
    }

    #[test]
    fn parsing_is_repeatable() {
        let text = "a,b\n\"x,1\",y\n";
        assert_eq!(parse_tabular(text), parse_tabular(text));
    }

    #[test]
    fn written_rows_parse_back_in_order() {
        let rows = vec![
            vec!["plain".to_string(), "with, comma".to_string()],
            vec!["\"quoted\" word".to_string(), "multi\nline\r\ntext".to_string()],
            vec!["last".to_string(), String::new()],
        ];
        let text = write_tabular(&["left", "right"], &rows);
        let mut records = parse_records(&text);
        assert_eq!(records.remove(0), vec!["left", "right"]);
        assert_eq!(records, rows);
    }
}
