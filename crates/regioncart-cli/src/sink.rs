//! JSON file persistence for the final result set.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use regioncart_core::{ResultSet, ResultSink, SinkError};

/// Writes the result set as a single compact JSON object, UTF-8 and not
/// ASCII-escaped. The file is written next to the target and renamed over it,
/// so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Staging file for atomic replacement: the target name plus `.tmp`, so
    /// it never coincides with the target whatever its extension.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&self, results: &ResultSet) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, results)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
