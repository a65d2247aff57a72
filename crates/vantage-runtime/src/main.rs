//! VANTAGE demo CLI.
//!
//! Runs the stock operational picture on a wall-clock loop, toggles the
//! east corridor halfway through, selects an entity, and reveals a sample
//! dispatch alongside.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vantage_core::constants::{REVEAL_INTERVAL_MS, TICK_RATE};
use vantage_core::enums::EntityStatus;
use vantage_runtime::{PictureLoop, RevealEngine};
use vantage_sim::{scenario, SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(about = "Run the VANTAGE operational picture simulation")]
struct Args {
    /// RNG seed (same seed = same picture).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Tick interval in milliseconds.
    #[arg(long, default_value_t = 1000 / TICK_RATE as u64)]
    tick_ms: u64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 100)]
    duration: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    info!(
        seed = args.seed,
        tick_ms = args.tick_ms,
        duration = args.duration,
        "starting picture"
    );

    let routes = scenario::default_route_table()?;
    let mut engine = SimulationEngine::new(
        routes,
        SimConfig {
            seed: args.seed,
            ..Default::default()
        },
    );
    scenario::seed_default_picture(&mut engine)?;

    let mut picture = PictureLoop::spawn(engine, Duration::from_millis(args.tick_ms));
    let snapshots = picture.subscribe();

    let mut reveal = RevealEngine::new(Duration::from_millis(REVEAL_INTERVAL_MS));
    reveal.start("FLASH // EAST CORRIDOR INTERDICTED // REROUTE VIA SOUTH CORRIDOR");

    for tick in 0..args.duration {
        let snapshot = snapshots.recv()?;

        if tick == args.duration / 2 {
            picture.toggle_route(1);
            if let Some(eagle) = snapshot.entities.iter().find(|e| e.callsign == "EAGLE 1") {
                picture.select(eagle.id);
            }
            info!("east corridor toggled");
        }

        if tick % 10 == 0 {
            let critical = snapshot
                .entities
                .iter()
                .filter(|e| {
                    matches!(
                        e.status,
                        EntityStatus::Hauling(
                            vantage_core::enums::ConvoyStatus::Critical
                        )
                    )
                })
                .count();
            info!(
                tick = snapshot.time.tick,
                entities = snapshot.entities.len(),
                critical,
                selected = ?snapshot.selected,
                "picture"
            );
        }
    }

    let dispatch = reveal.snapshot();
    info!(phase = ?dispatch.phase, text = %dispatch.text, "dispatch");

    picture.shutdown();
    info!("picture stopped");
    Ok(())
}
