mod cli;
mod renderer;
mod signals;

use std::time::Duration;

use clap::{CommandFactory, Parser};

use burger_core::format_menu;
use burger_engine::{Engine, EngineConfig};

use crate::cli::Cli;
use crate::signals::ControlSignal;

/// How often the status line is reprinted while the plant runs.
const STATUS_TICK: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // spec.md §6: an invalid argument is not a hard failure — print
            // help and exit 0 rather than clap's default exit code 2.
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                print!("{err}");
            } else {
                Cli::command().print_help()?;
                println!();
            }
            return Ok(());
        }
    };

    if cli.menu {
        print!("{}", format_menu());
        return Ok(());
    }

    run(cli)
}

#[tokio::main(flavor = "current_thread")]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = EngineConfig {
        num_lanes: cli.bandas as usize,
        ingredient_time: Duration::from_secs(cli.tiempo_ingrediente),
        order_interval: Duration::from_secs(cli.tiempo_orden),
        ..EngineConfig::default()
    };

    tracing::info!(
        num_lanes = config.num_lanes,
        ingredient_seconds = cli.tiempo_ingrediente,
        order_seconds = cli.tiempo_orden,
        "starting burger plant"
    );

    let engine = Engine::start(config);

    let (signal_tx, mut signal_rx) = tokio::sync::mpsc::unbounded_channel();
    signals::spawn(signal_tx)?;

    let mut ticker = tokio::time::interval(STATUS_TICK);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            signal = signal_rx.recv() => {
                match signal {
                    Some(ControlSignal::Shutdown) => {
                        tracing::info!("shutdown signal received");
                        break;
                    }
                    Some(ControlSignal::PauseRandomLane) => {
                        if let Err(err) = engine.pause_random_lane() {
                            tracing::warn!(%err, "failed to pause random lane");
                        }
                    }
                    Some(ControlSignal::ResumeAll) => {
                        engine.resume_all();
                    }
                    Some(ControlSignal::Replenish) => {
                        if let Err(err) = engine.replenish_needing_or_random() {
                            tracing::warn!(%err, "failed to replenish lanes");
                        }
                    }
                    None => break,
                }
            }
            _ = ticker.tick() => {
                drain_events(&engine);
                renderer::print_snapshot(&engine.snapshot());
            }
        }
    }

    renderer::print_snapshot(&engine.snapshot());
    engine.shutdown();
    drain_events(&engine);
    tracing::info!("burger plant stopped");
    Ok(())
}

/// Prints every event queued since the last drain without blocking the
/// single-threaded runtime. A zero timeout on `recv_event` is a poll, not a
/// wait, so this never stalls the select loop the way a real blocking
/// `recv` would.
fn drain_events(engine: &Engine) {
    while let Some(event) = engine.recv_event(Duration::ZERO) {
        renderer::print_event(&event);
    }
}
