//! Durable sink abstraction for label persistence.
//!
//! The label store treats its backing storage as an opaque byte sink with
//! two operations: read the whole content (or discover it absent) and
//! replace the whole content. [`FileSink`] is the production implementation;
//! [`MemorySink`] backs tests and can be told to fail writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LightboxError, Result};

/// Byte-level storage for the label store.
pub trait DurableSink {
    /// Read the full current content, or `None` if nothing has been
    /// written yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the full content. Either the prior content survives intact
    /// or the new content is fully written.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// File-backed sink. Writes go to a temporary file in the target directory
/// which is then renamed over the destination, so a crash mid-write never
/// leaves a truncated label file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink backed by the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableSink for FileSink {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read(&self.path)
            .map(Some)
            .map_err(|e| LightboxError::Io {
                path: self.path.clone(),
                source: e,
            })
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|e| {
                LightboxError::Persistence(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| {
            LightboxError::Persistence(format!(
                "failed to create temporary file in '{}': {}",
                parent.display(),
                e
            ))
        })?;

        tmp.write_all(bytes).map_err(|e| {
            LightboxError::Persistence(format!(
                "failed to write '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        tmp.persist(&self.path).map_err(|e| {
            LightboxError::Persistence(format!(
                "failed to replace '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    contents: Option<Vec<u8>>,
    fail_writes: bool,
    write_count: usize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink pre-seeded with content.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(bytes.into()),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Current content, if any write has succeeded.
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl DurableSink for MemorySink {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(LightboxError::Persistence(
                "memory sink configured to fail writes".to_string(),
            ));
        }
        self.contents = Some(bytes.to_vec());
        self.write_count += 1;
        Ok(())
    }
}
