//! Persisted authentication token.
//!
//! The token lives in a single file. A missing or unreadable file means
//! "no token"; it never prevents the console from starting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. Surrounding whitespace is ignored; an empty
    /// file counts as no token.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No stored token");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read stored token");
                None
            }
        }
    }

    /// Store a token, replacing any previous one.
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token)?;
        tracing::debug!(path = %self.path.display(), "Token stored");
        Ok(())
    }

    /// Remove the stored token. A missing file is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
