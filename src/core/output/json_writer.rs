//! JSON output writer.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::create_output_file;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "1/2/24", "time": "10:00:00", "author": "Alice", "content": "Hello"},
///   {"date": "2/2/24", "time": "11:00:00", "author": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(records, config)?;
    let mut writer = BufWriter::new(create_output_file(output_path.as_ref())?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders records as a JSON array string.
pub fn to_json(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
