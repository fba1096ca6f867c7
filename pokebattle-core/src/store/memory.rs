//! In-memory battle store for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::sim::battle::Battle;
use crate::store::error::{Result, StoreError};
use crate::store::BattleStore;

/// Thread-safe map-backed store. Nothing survives the process.
pub struct MemoryBattleStore {
    battles: RwLock<HashMap<String, Battle>>,
}

impl MemoryBattleStore {
    pub fn new() -> Self {
        Self {
            battles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBattleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleStore for MemoryBattleStore {
    fn save(&self, battle: &Battle) -> Result<()> {
        let mut battles = self.battles.write().map_err(|_| StoreError::LockPoisoned)?;
        battles.insert(battle.id.clone(), battle.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Battle>> {
        let battles = self.battles.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(battles.get(id).cloned())
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let battles = self.battles.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut ids: Vec<String> = battles.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::moves::Move;
    use crate::sim::pokemon::Pokemon;

    fn stub_battle(id: &str) -> Battle {
        let mon = |name: &str| {
            Pokemon::new(
                1,
                name,
                20,
                100,
                100,
                30,
                50,
                20,
                vec!["normal".to_string()],
                vec![Move {
                    name: "Tackle".to_string(),
                    move_type: "normal".to_string(),
                    power: 4,
                    accuracy: 100,
                    pp: 35,
                    max_pp: 35,
                }],
            )
            .expect("valid test pokemon")
        };
        let mut battle = Battle::new(mon("Abra"), mon("Kadabra"));
        battle.id = id.to_string();
        battle
    }

    #[test]
    fn save_then_load_returns_the_battle() {
        let store = MemoryBattleStore::new();
        store.save(&stub_battle("one")).expect("save");

        let loaded = store.load("one").expect("load").expect("battle present");
        assert_eq!(loaded.id, "one");
    }

    #[test]
    fn load_missing_battle_returns_none() {
        let store = MemoryBattleStore::new();
        assert!(store.load("absent").expect("load").is_none());
    }

    #[test]
    fn list_ids_is_sorted() {
        let store = MemoryBattleStore::new();
        store.save(&stub_battle("zz")).expect("save");
        store.save(&stub_battle("aa")).expect("save");

        assert_eq!(store.list_ids().expect("list"), vec!["aa", "zz"]);
    }
}
