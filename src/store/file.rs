use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use log::debug;

use crate::error::{NetError, Result};
use crate::store::ParameterStore;

/// Stores each network's parameters as a plain-text `.ai` file: one decimal
/// scalar per line, named `<prefix><id>.ai` inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    prefix: String,
}

impl FileStore {
    pub const DEFAULT_PREFIX: &'static str = "network";

    pub fn new(dir: impl Into<PathBuf>) -> FileStore {
        FileStore {
            dir: dir.into(),
            prefix: FileStore::DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> FileStore {
        self.prefix = prefix.into();
        self
    }

    pub fn path_for(&self, id: u32) -> PathBuf {
        self.dir.join(format!("{}{}.ai", self.prefix, id))
    }
}

impl ParameterStore for FileStore {
    fn write(&mut self, id: u32, values: &[f64]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(id);
        let mut writer = BufWriter::new(File::create(&path)?);
        // `Display` for f64 is the shortest string that parses back to the
        // same value, so the file round-trips exactly.
        for value in values {
            writeln!(writer, "{value}")?;
        }
        writer.flush()?;
        debug!("wrote {} values to {}", values.len(), path.display());
        Ok(())
    }

    fn read(&self, id: u32) -> Result<Option<Vec<f64>>> {
        let path = self.path_for(id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut values = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value = line.parse::<f64>().map_err(|_| NetError::InvalidScalar {
                id,
                line: index + 1,
                value: line.to_string(),
            })?;
            values.push(value);
        }
        Ok(Some(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_scalar_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.write(3, &[0.5, -0.125, 2.0]).unwrap();

        let text = fs::read_to_string(dir.path().join("network3.ai")).unwrap();
        assert_eq!(text, "0.5\n-0.125\n2\n");
    }

    #[test]
    fn round_trips_exact_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).with_prefix("path");
        let values = [0.1 + 0.2, -1.0 / 3.0, 1e-300, 12345.678901234567];
        store.write(7, &values).unwrap();

        assert!(dir.path().join("path7.ai").exists());
        assert_eq!(store.read(7).unwrap(), Some(values.to_vec()));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert_eq!(store.read(0).unwrap(), None);
    }

    #[test]
    fn garbage_line_is_reported_with_its_position() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(1), "0.25\nnot-a-number\n").unwrap();

        match store.read(1) {
            Err(NetError::InvalidScalar { id, line, value }) => {
                assert_eq!((id, line, value.as_str()), (1, 2, "not-a-number"));
            }
            other => panic!("expected InvalidScalar, got {other:?}"),
        }
    }
}
