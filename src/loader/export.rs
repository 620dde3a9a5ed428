use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::domain::network::link::LinkState;
use crate::error::Result;

/// Writes `value` as pretty printed JSON to `file_path`, replacing any existing file.
pub fn write_json_file<T: Serialize>(file_path: &str, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Writes one `;` separated row per link to `file_path`.
pub fn write_links_csv(file_path: &str, links: &[LinkState]) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_path(file_path)?;

    for link in links {
        csv_wtr.serialize(link)?;
    }

    csv_wtr.flush()?;
    Ok(())
}
