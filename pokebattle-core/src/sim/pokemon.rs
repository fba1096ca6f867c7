use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::sim::damage::{compute_damage, critical_multiplier, stab_multiplier};
use crate::sim::moves::Move;
use crate::sim::rng::BattleRng;

/// A battle-ready combatant. Stats are fixed at construction; only `hp` and
/// the per-move `pp` change while a battle runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub types: Vec<String>,
    pub moves: Vec<Move>,
}

impl Pokemon {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        level: u32,
        hp: u32,
        max_hp: u32,
        attack: u32,
        defense: u32,
        speed: u32,
        types: Vec<String>,
        moves: Vec<Move>,
    ) -> Result<Self> {
        let name = name.into();
        if level == 0 {
            bail!("pokemon '{}' must have a positive level", name);
        }
        if attack == 0 || defense == 0 || speed == 0 {
            bail!(
                "pokemon '{}' must have positive attack, defense and speed",
                name
            );
        }
        if hp > max_hp {
            bail!("pokemon '{}' hp {} exceeds max hp {}", name, hp, max_hp);
        }
        if types.is_empty() {
            bail!("pokemon '{}' must have at least one type", name);
        }
        if moves.is_empty() || moves.len() > 4 {
            bail!(
                "pokemon '{}' must know between 1 and 4 moves, got {}",
                name,
                moves.len()
            );
        }
        for mv in &moves {
            if mv.pp > mv.max_pp {
                bail!(
                    "move '{}' pp {} exceeds its max pp {}",
                    mv.name,
                    mv.pp,
                    mv.max_pp
                );
            }
        }
        Ok(Self {
            id,
            name,
            level,
            hp,
            max_hp,
            attack,
            defense,
            speed,
            types,
            moves,
        })
    }

    /// Resolve one attack with the move at `move_index` against `rival`.
    ///
    /// Returns the transcript lines describing what happened. The move's pp
    /// and the rival's hp are updated in place. Picking a move with no pp
    /// left produces a single refusal line and changes nothing.
    pub fn attack_rival(
        &mut self,
        move_index: usize,
        rival: &mut Pokemon,
        rng: &mut impl BattleRng,
    ) -> Vec<String> {
        let mv = &mut self.moves[move_index];
        if mv.pp == 0 {
            return vec![format!(
                "{} want to use {} but has no more PP!",
                self.name, mv.name
            )];
        }
        mv.pp -= 1;

        let critical = critical_multiplier(rng.percent_roll());
        let stab = stab_multiplier(&mv.move_type, &self.types);
        let damage = compute_damage(
            self.level,
            critical,
            self.attack,
            rival.defense,
            mv.power,
            stab,
        );
        rival.receive_attack(damage);

        vec![
            format!("{} used {}! PP {}/{}", self.name, mv.name, mv.pp, mv.max_pp),
            format!(
                "{} received {} damage. HP {}/{}",
                rival.name, damage, rival.hp, rival.max_hp
            ),
        ]
    }

    /// Subtract `damage` from hp, clamping at zero.
    pub fn receive_attack(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// True while at least one move still has pp left.
    pub fn has_usable_moves(&self) -> bool {
        self.moves.iter().any(|mv| mv.pp > 0)
    }
}
