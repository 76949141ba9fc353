//! JSON Lines (JSONL) output writer.
//!
//! One record per line, ready for dataframe loaders and streaming tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::table::ChatTable;

/// Writes the record table in JSONL format.
///
/// Each line is a flat JSON object:
/// ```jsonl
/// {"timestamp":"2024-05-01T14:30:00","author":"Alice","body":"hi","year":2024,...,"period":"14-15"}
/// ```
pub fn write_jsonl(table: &ChatTable, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts the record table to a JSONL string.
pub fn to_jsonl(table: &ChatTable) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(table: &ChatTable, writer: &mut W) -> Result<()> {
    for record in table.records() {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::table::Record;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn table() -> ChatTable {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 15, 0)
            .unwrap();
        ChatTable::from_messages(vec![
            Message::new(ts, "Alice", "Hello"),
            Message::notification(ts, "Bob joined"),
        ])
    }

    #[test]
    fn test_to_jsonl_flat_records() {
        let jsonl = to_jsonl(&table()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["author"], "Alice");
        assert_eq!(first["timestamp"], "2024-05-01T00:15:00");
        assert_eq!(first["day_name"], "Wednesday");
        assert_eq!(first["period"], "00-1");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["author"], "group_notification");
    }

    #[test]
    fn test_jsonl_lines_deserialize_to_records() {
        let jsonl = to_jsonl(&table()).unwrap();
        let records: Vec<Record> = jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records, table().records());
    }

    #[test]
    fn test_write_jsonl_no_array() {
        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&table(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(!content.starts_with('['));
        assert_eq!(content.lines().count(), 2);
    }
}
