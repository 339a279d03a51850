//! Persisted session token storage
//!
//! The platform hands out an opaque session token at login. The store keeps
//! it as raw UTF-8 text under the auth directory so later runs can skip the
//! login round trip. Whether the token is still accepted is not this
//! module's concern; the config fetch is the validity check.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::data_paths::DataPaths;

/// Opaque session credential issued by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// File-backed store for the raw session token
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_paths: &DataPaths) -> Self {
        Self {
            path: data_paths.session_file(),
        }
    }

    /// Load the persisted token, `Ok(None)` when nothing has been saved yet.
    ///
    /// A missing file is the expected first-run outcome and is reported as a
    /// value, not an error; any other I/O failure propagates.
    pub fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Session::new(token)))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("failed to read session file {}", self.path.display())
            }),
        }
    }

    /// Persist the raw token, creating the auth directory if needed
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create auth directory {}", parent.display())
            })?;
        }
        fs::write(&self.path, session.token()).with_context(|| {
            format!("failed to write session file {}", self.path.display())
        })?;
        debug!("Persisted session token to {}", self.path.display());
        Ok(())
    }
}
