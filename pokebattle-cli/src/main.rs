use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use pokebattle_core::sim::{Battle, Pokemon};
use pokebattle_core::store::{BattleStore, FileBattleStore};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

mod api;

use crate::api::{FetchError, PokeApiClient, DEFAULT_API_URL};

struct CliOptions {
    data_dir: PathBuf,
    api_url: String,
    seed: Option<u64>,
    names: Option<(String, String)>,
}

fn usage() -> ! {
    eprintln!("Usage: pokebattle-cli [--data-dir DIR] [--seed N] [--api-url URL] [NAME1 NAME2]");
    eprintln!("       pokebattle-cli list [--data-dir DIR]");
    eprintln!();
    eprintln!("With two names the battle runs once without prompting; otherwise");
    eprintln!("the names are read interactively and battles repeat on request.");
    std::process::exit(2);
}

fn default_data_dir() -> PathBuf {
    env::var("POKEBATTLE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("battles"))
}

fn parse_args(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut data_dir = default_data_dir();
    let mut api_url = env::var("POKEAPI_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut seed = None;
    let mut names = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data-dir" => {
                data_dir = iter
                    .next()
                    .map(PathBuf::from)
                    .context("--data-dir requires a path")?;
            }
            "--seed" => {
                let value = iter.next().context("--seed requires a number")?;
                seed = Some(value.parse().context("--seed must be an unsigned integer")?);
            }
            "--api-url" => {
                api_url = iter
                    .next()
                    .cloned()
                    .context("--api-url requires a base URL")?;
            }
            "--help" | "-h" => usage(),
            other if other.starts_with('-') => usage(),
            other => names.push(other.to_string()),
        }
    }

    let names = match names.as_slice() {
        [] => None,
        [first, second] => Some((first.clone(), second.clone())),
        _ => usage(),
    };

    Ok(CliOptions {
        data_dir,
        api_url,
        seed,
        names,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => list_battles(&args[1..]),
        _ => run(parse_args(&args)?).await,
    }
}

async fn run(opts: CliOptions) -> anyhow::Result<()> {
    let store = FileBattleStore::new(&opts.data_dir)
        .with_context(|| format!("failed to open battle store in {}", opts.data_dir.display()))?;
    let mut client = PokeApiClient::new(opts.api_url);
    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    tracing::info!("Starting the pokemon battle...");

    if let Some((name1, name2)) = opts.names {
        let level = rng.gen_range(10..=30);
        let pokemon1 = fetch_named(&mut client, &name1, level).await?;
        let pokemon2 = fetch_named(&mut client, &name2, level).await?;
        return run_battle(&store, &mut rng, pokemon1, pokemon2);
    }

    loop {
        // Both sides battle at the same randomly drawn level.
        let level = rng.gen_range(10..=30);
        let pokemon1 = prompt_pokemon(&mut client, level, 1).await?;
        let pokemon2 = prompt_pokemon(&mut client, level, 2).await?;
        run_battle(&store, &mut rng, pokemon1, pokemon2)?;

        if !prompt_battle_again()? {
            tracing::info!("Exiting the pokemon battle...");
            return Ok(());
        }
        tracing::info!("Starting a new battle...");
    }
}

fn run_battle(
    store: &dyn BattleStore,
    rng: &mut SmallRng,
    pokemon1: Pokemon,
    pokemon2: Pokemon,
) -> anyhow::Result<()> {
    let mut battle = Battle::new(pokemon1, pokemon2);
    tracing::info!("The battle begins!");
    battle.perform_battle(rng);

    for group in &battle.transcript {
        for line in group {
            tracing::info!("{}", line);
        }
    }

    store
        .save(&battle)
        .with_context(|| format!("failed to save battle {}", battle.id))?;
    tracing::info!("Battle saved to the store.");
    tracing::info!("Battle id: {}", battle.id);
    Ok(())
}

async fn fetch_named(
    client: &mut PokeApiClient,
    name: &str,
    level: u32,
) -> anyhow::Result<Pokemon> {
    client
        .fetch_pokemon(&name.to_lowercase(), level)
        .await
        .with_context(|| format!("failed to fetch pokemon '{}'", name))
}

async fn prompt_pokemon(
    client: &mut PokeApiClient,
    level: u32,
    slot: usize,
) -> anyhow::Result<Pokemon> {
    loop {
        let input = read_line(&format!("Enter the name of pokemon {}: ", slot))?;
        let name = input.trim();
        if name.is_empty() {
            tracing::error!("Pokemon name cannot be empty");
            continue;
        }

        match client.fetch_pokemon(&name.to_lowercase(), level).await {
            Ok(pokemon) => {
                tracing::info!(
                    "Pokemon{}: {} (level {}, hp {}, {} moves)",
                    slot,
                    pokemon.name,
                    pokemon.level,
                    pokemon.hp,
                    pokemon.moves.len()
                );
                return Ok(pokemon);
            }
            Err(FetchError::NotFound(_)) => {
                tracing::warn!("Pokemon not found! Try again.");
            }
            Err(FetchError::Status { status, .. }) => {
                tracing::warn!("Unexpected status {} from the API, try again.", status);
            }
            Err(FetchError::Invalid(reason)) => {
                tracing::warn!("{}, try another pokemon.", reason);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn prompt_battle_again() -> anyhow::Result<bool> {
    loop {
        let input = read_line("Do you want to battle again? (y/n): ")?;
        match input.trim() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}

fn read_line(prompt: &str) -> anyhow::Result<String> {
    print!("{}", prompt);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    if bytes == 0 {
        anyhow::bail!("stdin closed");
    }
    Ok(input)
}

fn list_battles(args: &[String]) -> anyhow::Result<()> {
    let mut data_dir = default_data_dir();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data-dir" => {
                data_dir = iter
                    .next()
                    .map(PathBuf::from)
                    .context("--data-dir requires a path")?;
            }
            _ => usage(),
        }
    }

    let store = FileBattleStore::new(&data_dir)
        .with_context(|| format!("failed to open battle store in {}", data_dir.display()))?;
    let ids = store.list_ids()?;
    if ids.is_empty() {
        println!("No battles stored in {}", data_dir.display());
        return Ok(());
    }

    for id in ids {
        match store.load(&id)? {
            Some(battle) => println!("{}  {} beat {}", id, battle.winner, battle.loser),
            None => println!("{}  <unreadable>", id),
        }
    }
    Ok(())
}
