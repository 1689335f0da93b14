//! Session store
//!
//! Maps a session identifier to the trip records collected for it. Sessions are
//! created by the first non-empty append and removed only by `clear`; nothing
//! expires, so a long-lived store grows without bound.
//!
//! Mutation takes `&mut self`. A caller sharing one store between threads must
//! serialize writers itself (e.g. a `Mutex` around the store).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::core::types::TripRecord;
use crate::error::AppError;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SessionStore {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    sessions: BTreeMap<String, Vec<TripRecord>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            sessions: BTreeMap::new(),
        }
    }
}

impl SessionStore {
    /// Records of a session in insertion order; empty for unknown sessions
    pub(crate) fn records(&self, session: &str) -> &[TripRecord] {
        self.sessions.get(session).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append records to a session, returning the session's new size
    pub(crate) fn append(&mut self, session: &str, records: Vec<TripRecord>) -> usize {
        if records.is_empty() {
            return self.records(session).len();
        }
        let entry = self.sessions.entry(session.to_string()).or_default();
        entry.extend(records);
        entry.len()
    }

    /// Drop a session entirely, returning how many records it held
    pub(crate) fn clear(&mut self, session: &str) -> usize {
        self.sessions.remove(session).map_or(0, |r| r.len())
    }

    #[cfg(test)]
    pub(crate) fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Load from disk. A missing file is an empty store. A file that exists but
    /// cannot be read, parsed or has another version is an error, so callers
    /// never save over records they could not see.
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(AppError::StoreRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let store: SessionStore =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::StoreCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if store.version != STORE_VERSION {
            return Err(AppError::StoreCorrupt {
                path: path.to_path_buf(),
                reason: format!("version {}, expected {}", store.version, STORE_VERSION),
            });
        }
        Ok(store)
    }

    /// Write through a sibling temp file and rename, so a crash mid-write
    /// leaves the previous store intact
    pub(crate) fn save(&self, path: &Path) -> Result<(), AppError> {
        let write_err = |source| AppError::StoreWrite {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_vec(self)?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(|source| {
            let _ = std::fs::remove_file(&tmp);
            write_err(source)
        })
    }
}

/// Default location: ~/.local/share/tripstats/sessions.json (platform data dir)
pub(crate) fn default_store_path() -> Option<PathBuf> {
    let data_dir = dirs::data_local_dir().or_else(|| {
        let home = dirs::home_dir()?;
        Some(home.join(".local").join("share"))
    })?;
    Some(data_dir.join("tripstats").join("sessions.json"))
}
