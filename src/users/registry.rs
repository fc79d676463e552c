//! User registry
//!
//! Process-wide store of users keyed by a generated registry key. All sessions
//! share one `UserRegistry`; cloning it clones the handle, not the data.
//!
//! The lock is a plain `std::sync::RwLock`: no operation here awaits, so it is
//! never held across a prompt. Check-then-write sequences (duplicate check and
//! insert, lookup and overwrite) each run under a single write guard.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::UserError;
use crate::users::model::{NewUser, User};

/// Users by registry key. Ordered so listings come out sorted by key.
type UserMap = BTreeMap<String, User>;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    users: &'a UserMap,
}

#[derive(Deserialize)]
struct Snapshot {
    users: UserMap,
}

/// Shared handle to the user store.
#[derive(Clone, Default)]
pub struct UserRegistry {
    users: Arc<RwLock<UserMap>>,
    store: Option<Arc<PathBuf>>,
}

impl UserRegistry {
    /// Creates an empty, memory-only registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a registry persisted at `path`.
    ///
    /// A missing file yields an empty registry; the file is created on the
    /// first committed change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, UserError> {
        let path = path.into();
        let users = match fs::read_to_string(&path) {
            Ok(content) => {
                let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
                    UserError::Storage(format!("Invalid users file {}: {}", path.display(), e))
                })?;
                snapshot.users
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No users file at {}, starting empty", path.display());
                UserMap::new()
            }
            Err(e) => {
                return Err(UserError::Storage(format!(
                    "Cannot read users file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        info!("Loaded {} user(s) from {}", users.len(), path.display());

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
            store: Some(Arc::new(path)),
        })
    }

    // --------------------
    // Queries
    // --------------------

    /// Looks a user up by exact (case-sensitive) username.
    pub fn find_by_username(&self, username: &str) -> Option<(String, User)> {
        self.read()
            .iter()
            .find(|(_, user)| user.username == username)
            .map(|(key, user)| (key.clone(), user.clone()))
    }

    pub fn contains_username(&self, username: &str) -> bool {
        self.read().values().any(|user| user.username == username)
    }

    /// Returns the user stored under `key`.
    pub fn get(&self, key: &str) -> Option<User> {
        self.read().get(key).cloned()
    }

    /// All users, sorted ascending by registry key.
    pub fn users(&self) -> Vec<(String, User)> {
        self.read()
            .iter()
            .map(|(key, user)| (key.clone(), user.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // --------------------
    // Mutations
    // --------------------

    /// Inserts a new user under a freshly generated key.
    ///
    /// Fails with `DuplicateUsername` if the username was taken since the
    /// caller last checked. Nothing is changed on failure.
    pub fn insert(&self, new_user: NewUser) -> Result<(String, User), UserError> {
        self.insert_checked(new_user, false)
    }

    /// Inserts the first user of an empty registry.
    ///
    /// Fails with `RegistryNotEmpty` once any user exists, so only one of
    /// several racing first-admin workflows can commit.
    pub fn insert_first(&self, new_user: NewUser) -> Result<(String, User), UserError> {
        self.insert_checked(new_user, true)
    }

    /// Replaces the stored password hash of `username`. No other field changes.
    pub fn update_password(&self, username: &str, password_hash: String) -> Result<(), UserError> {
        let mut users = self.write();

        let user = users
            .values_mut()
            .find(|user| user.username == username)
            .ok_or_else(|| UserError::UserNotFound(username.to_string()))?;
        let previous = std::mem::replace(&mut user.password_hash, password_hash);

        if let Err(e) = self.persist(&users) {
            if let Some(user) = users.values_mut().find(|user| user.username == username) {
                user.password_hash = previous;
            }
            return Err(e);
        }

        Ok(())
    }

    // --------------------
    // Internals
    // --------------------

    fn insert_checked(
        &self,
        new_user: NewUser,
        only_if_empty: bool,
    ) -> Result<(String, User), UserError> {
        let mut users = self.write();

        if only_if_empty && !users.is_empty() {
            return Err(UserError::RegistryNotEmpty);
        }
        if users.values().any(|user| user.username == new_user.username) {
            return Err(UserError::DuplicateUsername(new_user.username));
        }

        let mut key = Uuid::new_v4().to_string();
        while users.contains_key(&key) {
            key = Uuid::new_v4().to_string();
        }

        let user = User::from(new_user);
        users.insert(key.clone(), user.clone());

        if let Err(e) = self.persist(&users) {
            users.remove(&key);
            return Err(e);
        }

        Ok((key, user))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserMap> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserMap> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the snapshot next to the target and renames it into place.
    ///
    /// Runs under the write guard so snapshots land in mutation order and a
    /// failed write can be undone exactly. Callers on the async runtime go
    /// through `spawn_blocking`.
    fn persist(&self, users: &UserMap) -> Result<(), UserError> {
        let Some(path) = self.store.as_deref() else {
            return Ok(());
        };

        write_snapshot(path, users).map_err(|e| {
            warn!("Failed to write users file {}: {}", path.display(), e);
            UserError::Storage(format!("Cannot write {}: {}", path.display(), e))
        })
    }
}

fn write_snapshot(path: &Path, users: &UserMap) -> io::Result<()> {
    let content = serde_json::to_string_pretty(&SnapshotRef { users })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
