//! File-backed battle store, one JSON document per battle.

use std::fs;
use std::path::{Path, PathBuf};

use crate::sim::battle::Battle;
use crate::store::error::{Result, StoreError};
use crate::store::BattleStore;

/// Stores each battle as a pretty-printed JSON file under a base directory.
///
/// Saves land in a temp sibling first and commit with a rename, so a crash
/// never leaves a half-written document behind.
pub struct FileBattleStore {
    base_dir: PathBuf,
}

impl FileBattleStore {
    /// Open the store, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn battle_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("battle_{}.json", id))
    }
}

impl BattleStore for FileBattleStore {
    fn save(&self, battle: &Battle) -> Result<()> {
        let path = self.battle_path(&battle.id);
        let temp_path = path.with_extension("json.tmp");

        let json =
            serde_json::to_string_pretty(battle).map_err(|e| StoreError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved battle to {}", path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Battle>> {
        let path = self.battle_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        let battle = serde_json::from_str(&json).map_err(|e| StoreError::Json(e.to_string()))?;
        Ok(Some(battle))
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(id) = file_name
                    .strip_prefix("battle_")
                    .and_then(|rest| rest.strip_suffix(".json"))
                {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
