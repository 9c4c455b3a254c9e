use std::io::BufRead;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use deepspace_app::console::{self, ConsoleInput};
use deepspace_app::game_loop;
use deepspace_app::state::{AppState, GameLoopCommand};
use deepspace_sim::{SimConfig, SimulationEngine};

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            SimConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => SimConfig::default(),
    };
    log::info!("starting with seed {}", config.seed);

    let engine = SimulationEngine::new(config).context("setting up the universe")?;
    let state = AppState::new();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, Arc::clone(&state.latest_snapshot))
        .context("spawning game loop thread")?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match console::parse_line(&line) {
            None => {}
            Some(ConsoleInput::Quit) => break,
            Some(ConsoleInput::Status) => match state.status_line() {
                Some(status) => println!("{status}"),
                None => println!("no snapshot yet"),
            },
            Some(ConsoleInput::Loop(command)) => {
                if cmd_tx.send(command).is_err() {
                    log::warn!("game loop has stopped");
                    break;
                }
            }
        }
    }

    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    Ok(())
}
