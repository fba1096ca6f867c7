//! Battle simulation: combatants, moves, damage math and the round loop.

pub mod battle;
pub mod damage;
pub mod moves;
pub mod pokemon;
pub mod rng;

pub use battle::Battle;
pub use moves::Move;
pub use pokemon::Pokemon;
pub use rng::{BattleRng, ScriptedRng};
