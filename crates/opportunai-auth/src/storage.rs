//! Credential storage.
//!
//! Two scopes hold a bearer token and the logged-in user. The persistent
//! scope survives restarts (a `credentials.json` file, or memory when the
//! store has no directory); the session scope lives as long as the
//! process. Reads check the persistent scope first.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AuthError, Result};
use crate::types::User;

/// File name of the persistent scope inside the data directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Where a credential lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Persistent,
    Session,
}

impl Scope {
    pub fn for_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Scope::Persistent
        } else {
            Scope::Session
        }
    }
}

/// Contents of one scope. The user is kept as JSON text so a corrupt entry
/// reads back as "no user" instead of failing the whole scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Slots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl Slots {
    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Token and user storage shared by the auth client and the app.
#[derive(Debug)]
pub struct CredentialStore {
    file: Option<PathBuf>,
    persistent: Mutex<Slots>,
    session: Mutex<Slots>,
}

impl CredentialStore {
    /// Store whose persistent scope is `credentials.json` under `data_dir`.
    /// An unreadable or corrupt file starts out empty.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(CREDENTIALS_FILE);
        let persistent = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable credentials at {}", path.display());
                Slots::default()
            }),
            Err(_) => Slots::default(),
        };
        Self {
            file: Some(path),
            persistent: Mutex::new(persistent),
            session: Mutex::new(Slots::default()),
        }
    }

    /// Store with both scopes in memory.
    pub fn in_memory() -> Self {
        Self {
            file: None,
            persistent: Mutex::new(Slots::default()),
            session: Mutex::new(Slots::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn slots(&self, scope: Scope) -> MutexGuard<'_, Slots> {
        let slots = match scope {
            Scope::Persistent => &self.persistent,
            Scope::Session => &self.session,
        };
        slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write the persistent scope through to disk.
    fn flush(&self, slots: &Slots) -> Result<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        if slots.is_empty() {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(slots).map_err(|e| AuthError::Storage(e.to_string()))?;
        std::fs::write(path, content)?;
        // Owner-only access.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn update(&self, scope: Scope, apply: impl FnOnce(&mut Slots)) -> Result<()> {
        let mut slots = self.slots(scope);
        apply(&mut slots);
        if scope == Scope::Persistent {
            self.flush(&slots)?;
        }
        Ok(())
    }

    pub fn save_token(&self, token: &str, remember_me: bool) -> Result<()> {
        let scope = Scope::for_remember_me(remember_me);
        self.update(scope, |slots| slots.token = Some(token.to_string()))?;
        info!(len = token.len(), ?scope, "Token saved");
        Ok(())
    }

    pub fn save_user(&self, user: &User, remember_me: bool) -> Result<()> {
        let json = serde_json::to_string(user).map_err(|e| AuthError::Storage(e.to_string()))?;
        let scope = Scope::for_remember_me(remember_me);
        self.update(scope, |slots| slots.user = Some(json))?;
        debug!(?scope, "User saved");
        Ok(())
    }

    /// The stored token, persistent scope first.
    pub fn token(&self) -> Option<String> {
        self.token_scope().and_then(|scope| self.slots(scope).token().map(str::to_string))
    }

    /// Scope currently holding the token.
    pub fn token_scope(&self) -> Option<Scope> {
        [Scope::Persistent, Scope::Session]
            .into_iter()
            .find(|scope| self.slots(*scope).token().is_some())
    }

    /// The stored user, persistent scope first. `None` when missing or
    /// unparseable.
    pub fn current_user(&self) -> Option<User> {
        let raw = {
            let persistent = self.slots(Scope::Persistent);
            match persistent.user() {
                Some(u) => Some(u.to_string()),
                None => self.slots(Scope::Session).user().map(str::to_string),
            }
        }?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_scope().is_some()
    }

    /// Remove token and user from both scopes.
    pub fn clear(&self) -> Result<()> {
        *self.slots(Scope::Session) = Slots::default();
        self.update(Scope::Persistent, |slots| *slots = Slots::default())?;
        info!("Stored credentials cleared");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
