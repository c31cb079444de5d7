use crate::core::error::CacheError;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// WAL operation types
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    Set { key: Vec<u8>, value: Vec<u8> },
}

impl WalOperation {
    fn to_line(&self) -> String {
        match self {
            WalOperation::Set { key, value } => {
                format!("SET|{}|{}", hex::encode(key), hex::encode(value))
            }
        }
    }

    fn from_line(line: &str) -> Result<Self, CacheError> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"SET") => {
                if parts.len() != 3 {
                    return Err(CacheError::Corrupt("Invalid SET format".to_string()));
                }
                let key = hex::decode(parts[1])
                    .map_err(|e| CacheError::Corrupt(format!("Invalid key hex: {}", e)))?;
                let value = hex::decode(parts[2])
                    .map_err(|e| CacheError::Corrupt(format!("Invalid value hex: {}", e)))?;

                Ok(WalOperation::Set { key, value })
            }
            _ => Err(CacheError::Corrupt("Unknown operation type".to_string())),
        }
    }
}

/// Append-only operation log backing a durable cache
pub struct Wal {
    file: Mutex<File>,
    path: PathBuf,
}

impl Wal {
    /// Open (or create) the log at `path`
    ///
    /// A trailing line without its newline is the remains of an append that
    /// never completed. It is cut off so the next append starts on a fresh
    /// line.
    pub fn new(path: PathBuf) -> Result<Self, CacheError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let contents = std::fs::read(&path)?;
        if contents.last().is_some_and(|b| *b != b'\n') {
            let keep = contents
                .iter()
                .rposition(|b| *b == b'\n')
                .map_or(0, |i| i + 1);
            file.set_len(keep as u64)?;
            file.sync_data()?;

            tracing::warn!(
                path = %path.display(),
                dropped_bytes = contents.len() - keep,
                "Discarded incomplete trailing WAL line"
            );
        }

        Ok(Wal {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the append lock
    /// Callers that must order log writes with other state hold the guard
    /// across both.
    pub fn lock(&self) -> Result<WalWriter<'_>, CacheError> {
        let file = self.file.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(WalWriter { file })
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>, CacheError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse WAL line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }
}

/// Exclusive append handle returned by `Wal::lock`
pub struct WalWriter<'a> {
    file: MutexGuard<'a, File>,
}

impl WalWriter<'_> {
    /// Write one operation and sync it to disk before returning
    pub fn append(&mut self, op: &WalOperation) -> Result<(), CacheError> {
        writeln!(self.file, "{}", op.to_line())?;
        self.file.sync_data()?;
        Ok(())
    }
}
