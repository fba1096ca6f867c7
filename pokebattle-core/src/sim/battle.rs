//! Encounter orchestration: turn order, the round loop and the outcome.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sim::pokemon::Pokemon;
use crate::sim::rng::BattleRng;

/// One encounter between two pokemon, including everything needed to replay
/// it afterwards. Serializes to the document shape persisted by the stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
    pub id: String,
    pub pokemon1: Pokemon,
    pub pokemon2: Pokemon,
    pub winner: String,
    pub loser: String,
    pub transcript: Vec<Vec<String>>,
}

impl Battle {
    /// Set up a battle. The faster pokemon is ordered first and acts first
    /// every round; a speed tie keeps the given order.
    pub fn new(pokemon1: Pokemon, pokemon2: Pokemon) -> Self {
        let (pokemon1, pokemon2) = if pokemon2.speed > pokemon1.speed {
            (pokemon2, pokemon1)
        } else {
            (pokemon1, pokemon2)
        };
        Self {
            id: Uuid::new_v4().to_string(),
            pokemon1,
            pokemon2,
            winner: String::new(),
            loser: String::new(),
            transcript: Vec::new(),
        }
    }

    /// Run the encounter to its conclusion. Calling again after a conclusion
    /// is a no-op.
    ///
    /// Rounds repeat while both pokemon have hp and at least one usable move
    /// each. Within a round the first-ordered pokemon attacks and the rival
    /// answers only if still standing, so a knockout ends the round at once.
    pub fn perform_battle(&mut self, rng: &mut impl BattleRng) {
        if self.is_concluded() {
            return;
        }

        while !self.pokemon1.is_fainted()
            && !self.pokemon2.is_fainted()
            && self.pokemon1.has_usable_moves()
            && self.pokemon2.has_usable_moves()
        {
            let index = rng.move_index(self.pokemon1.moves.len());
            let lines = self.pokemon1.attack_rival(index, &mut self.pokemon2, rng);
            self.transcript.push(lines);
            if self.pokemon2.is_fainted() {
                break;
            }

            let index = rng.move_index(self.pokemon2.moves.len());
            let lines = self.pokemon2.attack_rival(index, &mut self.pokemon1, rng);
            self.transcript.push(lines);
            if self.pokemon1.is_fainted() {
                break;
            }
        }

        // A tie goes to the first-ordered pokemon, whether both still stand
        // at pp exhaustion or both are down. Only a knockout that leaves the
        // rival standing hands the win over.
        let (winner, loser) = if self.pokemon1.hp > 0 || self.pokemon2.hp == 0 {
            (self.pokemon1.name.clone(), self.pokemon2.name.clone())
        } else {
            (self.pokemon2.name.clone(), self.pokemon1.name.clone())
        };
        self.transcript.push(vec![format!("{} won!", winner)]);
        self.winner = winner;
        self.loser = loser;
    }

    /// True once winner and loser have been decided.
    pub fn is_concluded(&self) -> bool {
        !self.winner.is_empty()
    }
}
