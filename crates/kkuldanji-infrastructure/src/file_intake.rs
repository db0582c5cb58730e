//! Upload intake: reads chosen files from disk into `SourceFile`s.
//!
//! The whole batch is checked against the extension allow-list before any
//! file is read, then files are read one at a time in the order given. No
//! size limit is applied.

use kkuldanji_core::error::{HandoverError, Result};
use kkuldanji_core::source::{SourceFile, is_allowed_extension};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FileIntake {
    allowed_extensions: Vec<String>,
}

impl FileIntake {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self { allowed_extensions }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Reads and encodes every file in `paths`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFile` if any name fails the allow-list (nothing is read),
    /// `Io` if a file cannot be read.
    pub async fn read_files(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        let named = paths
            .iter()
            .map(|path| {
                let name = file_name(path)?;
                if !is_allowed_extension(&name, &self.allowed_extensions) {
                    return Err(HandoverError::UnsupportedFile(name));
                }
                Ok((path, name))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::with_capacity(named.len());
        for (path, name) in named {
            let bytes = fs::read(path).await.map_err(|e| {
                HandoverError::io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let mime_type = mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();

            tracing::info!(
                "[Upload] Read {} ({}, {} bytes)",
                name,
                mime_type,
                bytes.len()
            );
            files.push(SourceFile::from_bytes(name, mime_type, &bytes));
        }

        Ok(files)
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| HandoverError::UnsupportedFile(path.display().to_string()))
}
