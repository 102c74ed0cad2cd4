use std::path::{Path, PathBuf};
use crate::errors::ShopError;
use super::flow::FlowNotice;
use super::state::Session;
use tracing::{debug, info, warn};

/// Saves and restores the single local session as JSON.
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

    /// Load the saved session. A missing or unreadable file yields `None`.
    ///
    /// Restored sessions are not trusted: callers must run the flow guard
    /// (`Session::resolve`) before showing anything.
    pub fn load(&self) -> Option<Session> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => {
                debug!(path = %self.path.display(), "No saved session");
                return None;
            }
        };
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable saved session");
                None
            }
        }
    }

    /// Load the saved session and pass it through the flow guard, so the
    /// first view never shows a step the session is not entitled to.
    pub fn resume(&self) -> Option<(Session, Option<FlowNotice>)> {
        let mut session = self.load()?;
        let notice = session.resolve();
        info!(session = %session.id(), step = %session.step(), redirected = notice.is_some(), "Resuming saved session");
        Some((session, notice))
    }

    pub fn save(&self, session: &Session) -> Result<(), ShopError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}
