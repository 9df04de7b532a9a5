use super::{upsert, FavoritesError, FavoritesStore};
use crate::model::FavoriteEntry;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, error, info, warn};
use std::fs::{self, File};
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Favorites kept in one pretty-printed JSON array.
///
/// Every mutation rewrites the whole file through a sibling temp file that is
/// synced to disk before it is renamed over the store file, so a crash
/// mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFavoritesStore {
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        JsonFavoritesStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| FavoritesError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| FavoritesError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &[FavoriteEntry]) -> Result<(), FavoritesError> {
        let unrecoverable = |source: std::io::Error| FavoritesError::Unrecoverable {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unrecoverable)?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| unrecoverable(std::io::Error::other(e)))?;

        let staging = self.path.with_extension("json.tmp");
        let written = File::create(&staging).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            let _ = fs::remove_file(&staging);
            return Err(unrecoverable(e));
        }
        sync_parent(&self.path);
        Ok(())
    }

    /// Loads, applies `change`, and writes back under the store lock.
    fn mutate(&self, change: impl FnOnce(&mut Vec<FavoriteEntry>)) -> Result<(), FavoritesError> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        change(&mut entries);
        self.save(&entries).inspect_err(|e| error!("{e}"))
    }
}

/// Flushes the directory entry for a freshly renamed file. Not every
/// platform can open a directory for syncing, so failures are only logged.
fn sync_parent(path: &Utf8Path) {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return;
    };
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!("could not sync {parent}: {e}");
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn list(&self) -> Vec<FavoriteEntry> {
        let _guard = self.guard();
        self.load().unwrap_or_else(|e| {
            warn!("treating favorites as empty: {e}");
            Vec::new()
        })
    }

    fn add(&self, entry: FavoriteEntry) -> Result<(), FavoritesError> {
        info!("adding favorite {} ({})", entry.id, entry.name);
        self.mutate(|entries| upsert(entries, entry))
    }

    fn remove(&self, id: &str) -> Result<(), FavoritesError> {
        info!("removing favorite {id}");
        self.mutate(|entries| entries.retain(|e| e.id != id))
    }
}
