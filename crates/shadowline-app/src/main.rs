//! Headless simulation runner.
//!
//! Starts a run, feeds a scripted input pattern, and reports what the
//! threats did. Useful for tuning detection parameters and for soak
//! testing the engine without a renderer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shadowline_core::commands::PlayerCommand;
use shadowline_core::enums::GamePhase;
use shadowline_core::events::GameEvent;
use shadowline_sim::engine::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "shadowline", about = "Headless stealth-sim runner")]
struct Args {
    /// RNG seed; the same seed reproduces the same run.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Maximum number of ticks to simulate (60 per second).
    #[arg(long, default_value_t = 3600)]
    ticks: u32,
    /// Print a JSON snapshot every N ticks (0 = only the final one).
    #[arg(long, default_value_t = 0)]
    snapshot_every: u32,
    /// Keep the player standing still instead of running the demo script.
    #[arg(long)]
    idle_player: bool,
}

/// Scripted input: sweep right, hide for a second, then sweep back.
fn demo_command(tick: u32) -> Option<PlayerCommand> {
    match tick {
        1 => Some(PlayerCommand::MoveRight),
        240 => Some(PlayerCommand::ToggleHide),
        300 => Some(PlayerCommand::ToggleHide),
        360 => Some(PlayerCommand::MoveLeft),
        600 => Some(PlayerCommand::Stop),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut engine = SimulationEngine::new(SimConfig { seed: args.seed });

    let detections = Arc::new(AtomicU64::new(0));
    let damage = Arc::new(AtomicU64::new(0));
    {
        let detections = Arc::clone(&detections);
        let damage = Arc::clone(&damage);
        engine.subscribe(move |event| match event {
            GameEvent::PlayerDetected { .. } => {
                detections.fetch_add(1, Ordering::Relaxed);
            }
            GameEvent::PlayerDamage => {
                damage.fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    engine.queue_command(PlayerCommand::StartRun);

    let mut last = engine.tick();
    for tick in 1..args.ticks {
        if !args.idle_player {
            if let Some(command) = demo_command(tick) {
                engine.queue_command(command);
            }
        }
        last = engine.tick();
        if args.snapshot_every > 0 && tick % args.snapshot_every == 0 {
            println!("{}", serde_json::to_string(&last)?);
        }
        if last.phase == GamePhase::GameOver {
            info!(tick, "run ended: out of lives");
            break;
        }
    }

    info!(
        ticks = last.time.tick,
        detections = detections.load(Ordering::Relaxed),
        damage = damage.load(Ordering::Relaxed),
        lives = last.player.lives,
        phase = ?last.phase,
        "simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&last)?);
    Ok(())
}
