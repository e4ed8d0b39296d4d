//! Session credential storage

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::session as session_config;
use crate::error::{InviteError, Result};

use super::models::{Credential, SessionFile};

/// Holder of the active session credential
///
/// Calls are synchronous. Concurrent replacements are last-writer-wins.
pub trait SessionStore: Send + Sync {
    /// Currently active credential, if any
    fn active_credential(&self) -> Result<Option<Credential>>;

    /// Replace the active credential, returning the one it replaced
    fn set_active_credential(
        &self,
        credential: Credential,
        refetch: bool,
    ) -> Result<Option<Credential>>;

    /// Put back a credential captured from `set_active_credential`
    fn restore_credential(&self, previous: Option<Credential>) -> Result<()>;
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    credential: Option<Credential>,
    last_refetch: Option<bool>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing credential
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                credential: Some(credential),
                last_refetch: None,
            }),
        }
    }

    /// Refetch flag passed with the most recent replacement
    pub fn last_refetch(&self) -> Option<bool> {
        self.state().last_refetch
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn active_credential(&self) -> Result<Option<Credential>> {
        Ok(self.state().credential.clone())
    }

    fn set_active_credential(
        &self,
        credential: Credential,
        refetch: bool,
    ) -> Result<Option<Credential>> {
        let mut state = self.state();
        state.last_refetch = Some(refetch);
        Ok(state.credential.replace(credential))
    }

    fn restore_credential(&self, previous: Option<Credential>) -> Result<()> {
        self.state().credential = previous;
        Ok(())
    }
}

/// Session store backed by a JSON file (~/.invitectl/session.json)
pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSessionStore {
    /// Create a store using the default session path
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Create a store with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(session_config::DIR_NAME)
            .join(session_config::FILE_NAME)
    }

    /// Load the session file.
    /// Returns Default if the file doesn't exist, errors on corrupt JSON.
    pub fn load(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            InviteError::Session(format!(
                "Failed to read session file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            InviteError::Session(format!(
                "Failed to parse session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Save the session file.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, session: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                InviteError::Session(format!(
                    "Failed to create session directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| InviteError::Session(format!("Failed to serialize session: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            InviteError::Session(format!(
                "Failed to write temp session file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // Tokens live in this file: owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                InviteError::Session(format!("Failed to set permissions on session file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            InviteError::Session(format!(
                "Failed to rename temp session file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Remove the session file; missing file is not an error
    pub fn clear(&self) -> Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|e| {
            InviteError::Session(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(true)
    }

    /// Remember which API the session belongs to
    pub fn set_api_url(&self, api_url: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut session = self.load()?;
        if session.api_url.as_deref() == Some(api_url) {
            return Ok(());
        }
        session.api_url = Some(api_url.to_string());
        self.save(&session)
    }
}

impl SessionStore for FileSessionStore {
    fn active_credential(&self) -> Result<Option<Credential>> {
        Ok(self.load()?.token)
    }

    fn set_active_credential(
        &self,
        credential: Credential,
        refetch: bool,
    ) -> Result<Option<Credential>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut session = self.load()?;
        let previous = session.token.replace(credential);
        self.save(&session)?;
        debug!(
            "Stored activated credential in {} (refetch={})",
            self.path.display(),
            refetch
        );
        Ok(previous)
    }

    fn restore_credential(&self, previous: Option<Credential>) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut session = self.load()?;
        session.token = previous;
        if session.token.is_none() && session.api_url.is_none() {
            // Empty session: remove the file rather than write `{}`
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    InviteError::Session(format!(
                        "Failed to remove session file {}: {}",
                        self.path.display(),
                        e
                    ))
                })?;
            }
            debug!("Restored empty session at {}", self.path.display());
            return Ok(());
        }
        self.save(&session)?;
        debug!("Restored previous credential in {}", self.path.display());
        Ok(())
    }
}
