//! Persists the bearer token between invocations.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::RequestContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an anonymous session, not an error.
    pub fn load(&self) -> anyhow::Result<RequestContext> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(RequestContext::anonymous())
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read session {}", self.path.display()))
            }
        };
        let stored: StoredSession = toml::from_str(&raw)
            .with_context(|| format!("corrupt session file {}", self.path.display()))?;
        Ok(RequestContext::with_token(stored.token))
    }

    pub fn save(&self, ctx: &RequestContext) -> anyhow::Result<()> {
        let token = ctx.token().context("refusing to store an anonymous session")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string(&StoredSession {
            token: token.to_string(),
        })?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session: stored");
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove session {}", self.path.display())),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
