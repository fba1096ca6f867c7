//! PokeAPI-backed combatant factory.
//!
//! Raw responses are cached per client (pokemon by name, moves by URL); a
//! fresh [`Pokemon`] is assembled on every call so each battle starts from
//! full hp and pp at its own level.

use std::collections::HashMap;

use pokebattle_core::sim::{Move, Pokemon};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Errors surfaced while resolving a pokemon from the API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("pokemon '{0}' not found")]
    NotFound(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unusable pokemon data: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    pub id: u32,
    pub stats: Vec<ApiStatEntry>,
    pub types: Vec<ApiTypeEntry>,
    pub moves: Vec<ApiMoveEntry>,
}

impl ApiPokemon {
    fn base_stat(&self, stat_name: &str) -> Result<u32, FetchError> {
        self.stats
            .iter()
            .find(|entry| entry.stat.name == stat_name)
            .map(|entry| entry.base_stat)
            .ok_or_else(|| FetchError::Malformed(format!("missing base stat '{}'", stat_name)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatEntry {
    pub base_stat: u32,
    pub stat: ApiNamed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeEntry {
    #[serde(rename = "type")]
    pub type_info: ApiNamed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMoveEntry {
    #[serde(rename = "move")]
    pub move_info: ApiResource,
    pub version_group_details: Vec<ApiVersionGroupDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVersionGroupDetail {
    pub move_learn_method: ApiNamed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiNamed {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMove {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: ApiNamed,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: u32,
}

/// PokeAPI client with per-instance response caches.
pub struct PokeApiClient {
    base_url: String,
    http_client: reqwest::Client,
    pokemon_cache: HashMap<String, ApiPokemon>,
    move_cache: HashMap<String, ApiMove>,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
            pokemon_cache: HashMap::new(),
            move_cache: HashMap::new(),
        }
    }

    /// Resolve `name` into a battle-ready pokemon at `level`.
    pub async fn fetch_pokemon(&mut self, name: &str, level: u32) -> Result<Pokemon, FetchError> {
        let api_pokemon = self.get_pokemon_data(name).await?;
        tracing::info!("Generating pokemon {} with level {}", name, level);

        let urls = level_up_move_urls(&api_pokemon);
        let mut api_moves = Vec::with_capacity(urls.len());
        for url in &urls {
            api_moves.push(self.get_move_data(url).await?);
        }

        assemble_pokemon(name, level, &api_pokemon, api_moves)
    }

    async fn get_pokemon_data(&mut self, name: &str) -> Result<ApiPokemon, FetchError> {
        if let Some(cached) = self.pokemon_cache.get(name) {
            return Ok(cached.clone());
        }

        let url = format!("{}/pokemon/{}", self.base_url, name);
        tracing::info!("Fetching pokemon data for {}", name);
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }
        let api_pokemon: ApiPokemon = response.json().await?;

        self.pokemon_cache
            .insert(name.to_string(), api_pokemon.clone());
        Ok(api_pokemon)
    }

    async fn get_move_data(&mut self, url: &str) -> Result<ApiMove, FetchError> {
        if let Some(cached) = self.move_cache.get(url) {
            return Ok(cached.clone());
        }

        tracing::debug!("Fetching move data from {}", url);
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        let api_move: ApiMove = response.json().await?;

        self.move_cache.insert(url.to_string(), api_move.clone());
        Ok(api_move)
    }
}

/// URLs of the moves learnable by level-up. Only those are fetched in full,
/// which keeps the number of follow-up requests down.
fn level_up_move_urls(api_pokemon: &ApiPokemon) -> Vec<String> {
    api_pokemon
        .moves
        .iter()
        .filter(|entry| {
            entry
                .version_group_details
                .iter()
                .any(|detail| detail.move_learn_method.name == "level-up")
        })
        .map(|entry| entry.move_info.url.clone())
        .collect()
}

/// Build a battle-ready pokemon from raw API data.
///
/// Hp grows with the level on top of the base stat; attack, defense and
/// speed come through unchanged. Moves without power are status moves and
/// are dropped, the rest keep a tenth of their listed power and the four
/// strongest make the cut.
fn assemble_pokemon(
    name: &str,
    level: u32,
    api_pokemon: &ApiPokemon,
    api_moves: Vec<ApiMove>,
) -> Result<Pokemon, FetchError> {
    let hp = api_pokemon.base_stat("hp")? + level;
    let attack = api_pokemon.base_stat("attack")?;
    let defense = api_pokemon.base_stat("defense")?;
    let speed = api_pokemon.base_stat("speed")?;

    let types: Vec<String> = api_pokemon
        .types
        .iter()
        .map(|entry| entry.type_info.name.clone())
        .collect();

    let mut moves: Vec<Move> = api_moves
        .into_iter()
        .filter_map(|api_move| {
            let power = api_move.power?;
            Some(Move {
                name: api_move.name,
                move_type: api_move.move_type.name,
                power: power / 10,
                accuracy: api_move.accuracy.unwrap_or(100),
                pp: api_move.pp,
                max_pp: api_move.pp,
            })
        })
        .collect();
    moves.sort_by(|a, b| b.power.cmp(&a.power));
    moves.truncate(4);

    Pokemon::new(
        api_pokemon.id,
        name,
        level,
        hp,
        hp,
        attack,
        defense,
        speed,
        types,
        moves,
    )
    .map_err(|e| FetchError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_pokemon_fixture() -> ApiPokemon {
        let value = json!({
            "id": 25,
            "stats": [
                {"base_stat": 35, "stat": {"name": "hp"}},
                {"base_stat": 55, "stat": {"name": "attack"}},
                {"base_stat": 40, "stat": {"name": "defense"}},
                {"base_stat": 90, "stat": {"name": "speed"}}
            ],
            "types": [
                {"type": {"name": "electric"}}
            ],
            "moves": [
                {
                    "move": {"name": "thunderbolt", "url": "https://api.test/move/85"},
                    "version_group_details": [
                        {"move_learn_method": {"name": "level-up"}}
                    ]
                },
                {
                    "move": {"name": "surf", "url": "https://api.test/move/57"},
                    "version_group_details": [
                        {"move_learn_method": {"name": "machine"}}
                    ]
                },
                {
                    "move": {"name": "quick-attack", "url": "https://api.test/move/98"},
                    "version_group_details": [
                        {"move_learn_method": {"name": "machine"}},
                        {"move_learn_method": {"name": "level-up"}}
                    ]
                }
            ]
        });
        serde_json::from_value(value).expect("valid pokemon fixture")
    }

    fn api_move(name: &str, power: Option<u32>, accuracy: Option<u32>, pp: u32) -> ApiMove {
        ApiMove {
            name: name.to_string(),
            move_type: ApiNamed {
                name: "electric".to_string(),
            },
            power,
            accuracy,
            pp,
        }
    }

    #[test]
    fn level_up_filter_selects_qualifying_entries() {
        let urls = level_up_move_urls(&api_pokemon_fixture());
        assert_eq!(
            urls,
            vec![
                "https://api.test/move/85".to_string(),
                "https://api.test/move/98".to_string(),
            ]
        );
    }

    #[test]
    fn assemble_maps_stats_and_grows_hp_with_level() {
        let pokemon = assemble_pokemon(
            "pikachu",
            20,
            &api_pokemon_fixture(),
            vec![api_move("thunderbolt", Some(90), Some(100), 15)],
        )
        .expect("assembled pokemon");

        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.level, 20);
        assert_eq!(pokemon.hp, 55);
        assert_eq!(pokemon.max_hp, 55);
        assert_eq!(pokemon.attack, 55);
        assert_eq!(pokemon.defense, 40);
        assert_eq!(pokemon.speed, 90);
        assert_eq!(pokemon.types, vec!["electric".to_string()]);
    }

    #[test]
    fn assemble_scales_power_and_defaults_accuracy() {
        let pokemon = assemble_pokemon(
            "pikachu",
            20,
            &api_pokemon_fixture(),
            vec![api_move("swift", Some(85), None, 20)],
        )
        .expect("assembled pokemon");

        let mv = &pokemon.moves[0];
        assert_eq!(mv.power, 8);
        assert_eq!(mv.accuracy, 100);
        assert_eq!(mv.pp, 20);
        assert_eq!(mv.max_pp, 20);
    }

    #[test]
    fn assemble_drops_status_moves_and_keeps_the_strongest_four() {
        let pokemon = assemble_pokemon(
            "pikachu",
            20,
            &api_pokemon_fixture(),
            vec![
                api_move("growl", None, Some(100), 40),
                api_move("spark", Some(65), Some(100), 20),
                api_move("thunder", Some(110), Some(70), 10),
                api_move("nuzzle", Some(20), Some(100), 20),
                api_move("thunderbolt", Some(90), Some(100), 15),
                api_move("discharge", Some(80), Some(100), 15),
            ],
        )
        .expect("assembled pokemon");

        let powers: Vec<u32> = pokemon.moves.iter().map(|mv| mv.power).collect();
        assert_eq!(powers, vec![11, 9, 8, 6]);
        assert_eq!(pokemon.moves[0].name, "thunder");
    }

    #[test]
    fn assemble_rejects_pokemon_without_attacking_moves() {
        let result = assemble_pokemon(
            "pikachu",
            20,
            &api_pokemon_fixture(),
            vec![api_move("growl", None, Some(100), 40)],
        );
        assert!(matches!(result, Err(FetchError::Invalid(_))));
    }

    #[test]
    fn missing_base_stat_is_malformed() {
        let value = json!({
            "id": 1,
            "stats": [
                {"base_stat": 45, "stat": {"name": "hp"}}
            ],
            "types": [{"type": {"name": "grass"}}],
            "moves": []
        });
        let api_pokemon: ApiPokemon = serde_json::from_value(value).expect("fixture");

        let result = assemble_pokemon("bulbasaur", 10, &api_pokemon, vec![]);
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}
