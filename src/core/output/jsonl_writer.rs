//! JSON Lines (JSONL) output writer.
//!
//! JSONL is the natural fit for embedding and indexing pipelines: each
//! record is independent, so consumers can stream them.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::create_output_file;

/// Writes one compact JSON object per record to any writer.
///
/// `config` is accepted for signature parity with the other writers; JSONL
/// is always compact.
pub fn write_jsonl_to<W: Write>(
    records: &[MessageRecord],
    mut writer: W,
    _config: &OutputConfig,
) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"date":"1/2/24","time":"10:00:00","author":"Alice","content":"Hello"}
/// {"date":"2/2/24","time":"11:00:00","author":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = create_output_file(output_path.as_ref())?;
    write_jsonl_to(records, BufWriter::new(file), config)
}

/// Renders records as a JSONL string.
pub fn to_jsonl(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_jsonl_to(records, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
