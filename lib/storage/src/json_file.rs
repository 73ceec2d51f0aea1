// Whole-document JSON file helpers shared by the node-link formats
use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use wgraph_core::{Error, Result};

/// Pretty-print `value` to `path`, replacing any existing file atomically
pub(crate) fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    file.write(|f| -> Result<()> {
        let mut writer = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    })
    .map_err(|err| match err {
        atomicwrites::Error::Internal(io) => Error::Io(io),
        atomicwrites::Error::User(err) => err,
    })
}

pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
