use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::model::{ConfigPatch, DesignerConfig};
use crate::foundation::error::{StarmapError, StarmapResult};

/// Fixed key under which the design is stored.
pub const STORAGE_KEY: &str = "starmap-designer-config";
/// Key recording that the first visit already happened.
pub const VISITED_KEY: &str = "starmap-visited";

/// Durable home of the last design.
///
/// `load` never fails: unreadable or corrupt state is logged and reported as
/// absent, malformed fields are dropped individually.
pub trait ConfigStore {
    /// Stored design as a patch over defaults.
    fn load(&self) -> Option<ConfigPatch>;
    /// Replace the stored design.
    fn save(&mut self, config: &DesignerConfig) -> StarmapResult<()>;
    /// Whether the first visit has been recorded.
    fn visited(&self) -> bool;
    /// Record the first visit.
    fn mark_visited(&mut self) -> StarmapResult<()>;
}

/// Decode a stored JSON document into a patch, dropping fields that fail to parse.
pub fn decode_stored(raw: &str) -> Option<ConfigPatch> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(%err, "stored config is not valid JSON; ignoring it");
            return None;
        }
    };
    let (patch, discarded) = ConfigPatch::from_json_lenient(&value);
    if !discarded.is_empty() {
        tracing::warn!(?discarded, "stored config had malformed fields");
    }
    Some(patch)
}

/// Flat camelCase JSON of the whole config.
pub fn encode_stored(config: &DesignerConfig) -> StarmapResult<String> {
    serde_json::to_string(config)
        .map_err(|e| StarmapError::serde(format!("encode stored config: {e}")))
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    raw: Option<String>,
    visited: bool,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    /// Empty store, first visit pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a raw document (possibly corrupt).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Mark the first visit as already done.
    pub fn visited_already(mut self) -> Self {
        self.visited = true;
        self
    }

    /// Make every `save` fail, to exercise error paths.
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Raw stored document.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Option<ConfigPatch> {
        self.raw.as_deref().and_then(decode_stored)
    }

    fn save(&mut self, config: &DesignerConfig) -> StarmapResult<()> {
        if self.fail_saves {
            return Err(StarmapError::persistence("memory store is read-only"));
        }
        self.raw = Some(encode_stored(config)?);
        self.saves += 1;
        Ok(())
    }

    fn visited(&self) -> bool {
        self.visited
    }

    fn mark_visited(&mut self) -> StarmapResult<()> {
        self.visited = true;
        Ok(())
    }
}

/// Directory-backed store: one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the design document.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    fn visited_path(&self) -> PathBuf {
        self.dir.join(VISITED_KEY)
    }

    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create store dir '{}'", self.dir.display()))?;
        std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Option<ConfigPatch> {
        let path = self.config_path();
        match std::fs::read_to_string(&path) {
            Ok(raw) => decode_stored(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot read stored config");
                None
            }
        }
    }

    fn save(&mut self, config: &DesignerConfig) -> StarmapResult<()> {
        let raw = encode_stored(config)?;
        self.write(&self.config_path(), &raw)?;
        Ok(())
    }

    fn visited(&self) -> bool {
        self.visited_path().exists()
    }

    fn mark_visited(&mut self) -> StarmapResult<()> {
        self.write(&self.visited_path(), "true")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
