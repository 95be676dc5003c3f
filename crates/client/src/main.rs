//! Headless tactics simulator.
//!
//! Loads a content directory, spawns the map's actors and lets the engine
//! play the fight out on a manual clock, printing every presentation event.
//! Player-controlled actors wait on each of their turns.
//!
//! ```bash
//! TACTICS_MAX_TURNS=200 RUST_LOG=tactics_core=debug cargo run -p tactics-sim
//! ```

mod config;

use anyhow::{Context, Result};
use tactics_content::ContentFactory;
use tactics_core::ManualClock;
use tactics_runtime::{JsonlEventWriter, Session, WaitInputProvider};

use crate::config::SimConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!("Content directory: {}", config.content_dir.display());
    tracing::info!("Map: {}, turn limit: {}", config.map, config.max_turns);

    let bundle = ContentFactory::new(&config.content_dir)
        .load_bundle(&config.map)
        .with_context(|| format!("loading content from {}", config.content_dir.display()))?;

    let mut session =
        Session::from_content(&bundle, ManualClock::new())?.with_input(WaitInputProvider);
    if let Some(path) = &config.event_log {
        let recorder = JsonlEventWriter::create(path)
            .with_context(|| format!("creating event log {}", path.display()))?;
        session = session.record_to(recorder);
    }

    if config.show_map {
        println!("{}", session.render());
    }

    let summary = session.run_headless(config.max_turns)?;

    for entry in session.log().iter() {
        println!("[{:>8}] {}", entry.at.0, entry.event);
    }
    if session.log().total() > session.log().len() as u64 {
        println!(
            "({} earlier events not shown)",
            session.log().total() - session.log().len() as u64
        );
    }

    if config.show_map {
        println!("\n{}", session.render());
    }
    println!(
        "{} turns, {} deaths, stopped: {:?}",
        summary.turns,
        summary.deaths.len(),
        summary.stop
    );

    Ok(())
}
