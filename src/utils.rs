use crate::models::{Field, RecordSet};
use anyhow::{Context, Result};
use std::fs::File;

/// Writes the header and every record to `output_path`, replacing any
/// existing file. Returns the number of records written.
pub fn save_records_to_csv(records: &RecordSet, output_path: &str) -> Result<usize> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer.write_record(Field::headers())?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()
        .with_context(|| format!("Failed to write output file: {}", output_path))?;
    Ok(records.len())
}
