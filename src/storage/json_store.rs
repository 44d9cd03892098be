use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Collection, StoryStore};
use crate::error::Result;

/// Stores the collection as a pretty-printed JSON array in a single file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the collection is written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "stories.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StoryStore for JsonFileStore {
    fn load(&self) -> Collection {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "story file missing, starting empty");
                return Collection::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read story file");
                return Collection::new();
            }
        };

        match serde_json::from_str::<Collection>(&raw) {
            Ok(collection) => {
                let foreign = collection.foreign_count();
                if foreign > 0 {
                    warn!(path = %self.path.display(), foreign, "keeping records that are not stories as-is");
                }
                collection
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "story file is not a JSON array");
                Collection::new()
            }
        }
    }

    fn save(&mut self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string_pretty(collection)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
