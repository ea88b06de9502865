//! CSV output writer.

use std::io::{self, Write};
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::{COLUMNS, create_output_file};

/// Writes records as CSV to any writer.
///
/// # Format
/// - Delimiter: `OutputConfig::delimiter` (`;` by default)
/// - Columns: `date`, `time`, `author`, `content`
/// - Encoding: UTF-8
pub fn write_csv_to<W: Write>(
    records: &[MessageRecord],
    writer: W,
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    if config.include_header {
        writer.write_record(COLUMNS)?;
    }

    for record in records {
        writer.write_record([
            &record.date,
            &record.time,
            &record.author,
            &record.content,
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes records to a CSV file, creating parent directories as needed.
pub fn write_csv(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = create_output_file(output_path.as_ref())?;
    write_csv_to(records, io::BufWriter::new(file), config)
}

/// Renders records as a CSV string.
pub fn to_csv(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(records, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
