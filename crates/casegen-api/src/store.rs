//! Persisted session: the browser-localStorage pair, on disk.
//!
//! Two entries survive a restart: the serialized profile and the raw
//! bearer credential. They are written together and cleared together —
//! a half-present pair is treated as signed out.

use std::path::PathBuf;

use casegen_core::prelude::*;
use casegen_core::UserProfile;

const PROFILE_FILE: &str = "profile.json";
const CREDENTIAL_FILE: &str = "credential";

/// On-disk session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store under the platform data directory
    /// (`~/.local/share/casegen/session/` on Linux).
    pub fn new() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            dir: base.join("casegen").join("session"),
        }
    }

    /// Store under an explicit directory (tests).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }

    /// Persist both entries. Partial writes are surfaced as errors; the
    /// caller treats the session as signed out when this fails.
    pub fn save(&self, profile: &UserProfile, credential: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::store(format!("create {}: {e}", self.dir.display())))?;
        let json = serde_json::to_string(profile)?;
        std::fs::write(self.profile_path(), json)
            .map_err(|e| Error::store(format!("write profile: {e}")))?;
        std::fs::write(self.credential_path(), credential)
            .map_err(|e| Error::store(format!("write credential: {e}")))?;
        debug!("session persisted for {}", profile.email);
        Ok(())
    }

    /// Remove both entries. Missing files are not an error.
    pub fn clear(&self) {
        for path in [self.profile_path(), self.credential_path()] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to remove {}: {e}", path.display());
                }
            }
        }
    }

    /// Load the persisted session. Returns `None` unless both entries
    /// are present and the profile parses.
    pub fn load(&self) -> Option<(UserProfile, String)> {
        let profile_raw = std::fs::read_to_string(self.profile_path()).ok()?;
        let credential = std::fs::read_to_string(self.credential_path()).ok()?;
        if credential.is_empty() {
            return None;
        }
        match serde_json::from_str::<UserProfile>(&profile_raw) {
            Ok(profile) => Some((profile, credential)),
            Err(e) => {
                warn!("unable to parse stored profile: {e}");
                None
            }
        }
    }

    /// True when both entries exist on disk.
    pub fn is_present(&self) -> bool {
        self.profile_path().exists() && self.credential_path().exists()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            picture: None,
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());

        store.save(&profile(), "token-123").unwrap();
        let (loaded, credential) = store.load().unwrap();
        assert_eq!(loaded, profile());
        assert_eq!(credential, "token-123");
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());

        store.save(&profile(), "token-123").unwrap();
        assert!(store.is_present());

        store.clear();
        assert!(!store.is_present());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_on_empty_store_is_quiet() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path().join("missing"));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_requires_both_entries() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());
        store.save(&profile(), "token-123").unwrap();

        std::fs::remove_file(tmp.path().join(CREDENTIAL_FILE)).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_rejects_corrupt_profile() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());
        store.save(&profile(), "token-123").unwrap();

        std::fs::write(tmp.path().join(PROFILE_FILE), "{not json").unwrap();
        assert!(store.load().is_none());
    }
}
