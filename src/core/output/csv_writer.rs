//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::{ChatTable, Record};

const HEADER: [&str; 11] = [
    "Timestamp", "Author", "Body", "Year", "Month", "MonthNum", "Day", "DayName", "Hour", "Minute",
    "Period",
];

/// Writes the record table to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Body`, then the calendar features
///   `Year`, `Month`, `MonthNum`, `Day`, `DayName`, `Hour`, `Minute`, `Period`
/// - Encoding: UTF-8
pub fn write_csv(table: &ChatTable, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(table, file)
}

/// Converts the record table to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(table: &ChatTable) -> Result<String> {
    let mut buf = Vec::new();
    write_records(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(table: &ChatTable, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for record in table.records() {
        writer.write_record(build_record(record))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(record: &Record) -> [String; 11] {
    let t = &record.temporal;
    [
        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.author.clone(),
        record.body.clone(),
        t.year.to_string(),
        t.month.clone(),
        t.month_num.to_string(),
        t.day.to_string(),
        t.day_name.clone(),
        t.hour.to_string(),
        t.minute.to_string(),
        t.period.clone(),
    ]
}
