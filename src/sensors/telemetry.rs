use crate::error::Result;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only binary log of sensor widths, one MessagePack record per
/// freshly computed sweep. A training-data side channel: records carry only
/// offset-to-width mappings, never full geometry.
pub struct TelemetrySink {
    writer: BufWriter<File>,
}

impl TelemetrySink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, widths: &BTreeMap<i32, f64>) -> Result<()> {
        rmp_serde::encode::write(&mut self.writer, widths)?;
        self.writer.flush()?;
        Ok(())
    }
}
