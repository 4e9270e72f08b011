//! User session state persisted to a JSON file.
//!
//! The session is an explicit value threaded through the pipeline rather
//! than ambient global state: loaded on startup from the session file,
//! mutated by login/logout, and written back only when the user asked to be
//! remembered. A missing or unreadable file yields an anonymous session.

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{info, instrument, warn};

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
    /// URL of the user's avatar image, if any.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Session state for one run of the application.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Session {
    user: Option<User>,
    /// Whether the session should be written back to disk on change.
    #[serde(default)]
    remember: bool,
}

impl Session {
    /// Load a session from `path`.
    ///
    /// A missing file means nobody is signed in. A file that exists but
    /// fails to parse is treated the same way, with a warning, so a corrupt
    /// session never blocks briefing generation.
    #[instrument(level = "info", skip_all, fields(path = %path))]
    pub async fn load(path: &str) -> Session {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    if let Some(user) = &session.user {
                        info!(user = %user.name, "Restored session");
                    }
                    session
                }
                Err(e) => {
                    warn!(error = %e, "Session file is corrupt; starting anonymous");
                    Session::default()
                }
            },
            Err(_) => Session::default(),
        }
    }

    /// Persist the session to `path` if the user asked to be remembered.
    #[instrument(level = "info", skip_all, fields(path = %path))]
    pub async fn save(&self, path: &str) -> Result<(), Box<dyn Error>> {
        if !self.remember {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        info!("Saved session");
        Ok(())
    }

    /// Sign a user in, replacing any existing user.
    pub fn login(&mut self, user: User, remember: bool) {
        info!(user = %user.name, remember, "User signed in");
        self.user = Some(user);
        self.remember = remember;
    }

    /// Sign the current user out.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.name, "User signed out");
        }
        self.remember = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Display name of the signed-in user, for briefing metadata.
    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(|u| {
            u.name
                .split_whitespace()
                .next()
                .unwrap_or(&u.name)
                .to_string()
        })
    }
}
