//! Persistence for battle documents.
//!
//! A store keeps one structured document per battle, keyed by battle id.
//! The simulation never talks to a store directly; callers hand concluded
//! battles to whichever implementation suits them.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{Result, StoreError};
pub use file::FileBattleStore;
pub use memory::MemoryBattleStore;

use crate::sim::battle::Battle;

/// Keyed persistence for battles.
pub trait BattleStore: Send + Sync {
    /// Persist a battle under its id, replacing any previous document.
    fn save(&self, battle: &Battle) -> Result<()>;

    /// Load a battle by id, or `None` when no document exists for it.
    fn load(&self, id: &str) -> Result<Option<Battle>>;

    /// Ids of every stored battle, sorted.
    fn list_ids(&self) -> Result<Vec<String>>;
}
