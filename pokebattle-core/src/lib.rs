//! Turn-based pokemon battle engine with pluggable persistence.
//!
//! A [`sim::Battle`] pairs two [`sim::Pokemon`] and resolves rounds of
//! attacks until one side faints or runs out of pp, recording every action
//! in a transcript. Randomness comes in through [`sim::BattleRng`], so runs
//! can be seeded or fully scripted. The [`store`] module persists concluded
//! battles as JSON documents.

pub mod sim;
pub mod store;

pub mod prelude {
    pub use crate::sim::battle::Battle;
    pub use crate::sim::moves::Move;
    pub use crate::sim::pokemon::Pokemon;
    pub use crate::sim::rng::{BattleRng, ScriptedRng};
    pub use crate::store::{BattleStore, FileBattleStore, MemoryBattleStore, StoreError};
}
