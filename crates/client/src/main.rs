//! Battle client binary.
//!
//! Runs one match headless and prints the combat log to stdout, followed by a
//! JSON summary. Diagnostics go to stderr through `tracing`.
//!
//! ```bash
//! BATTLE_SEED=7 RUST_LOG=debug cargo run -p battle-client
//! ```

use anyhow::{Context, Result};
use battle_client::{ClientConfig, MatchSummary, Move, next_move};
use battle_content::{ContentBundle, ContentLoader};
use battle_runtime::{Event, Runtime, RuntimeHandle, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let content = match &config.runtime.content_dir {
        Some(dir) => ContentLoader::load_dir(dir.clone())?,
        None => ContentBundle::defaults()?,
    };

    tracing::info!("Starting battle client");
    tracing::info!("Autopilot: {}", config.autopilot);

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .content(content.clone())
        .build()
        .await
        .context("failed to start runtime")?;
    let handle = runtime.handle();

    let printer = tokio::spawn(print_log(handle.clone()));

    if config.fast {
        handle.toggle_speed().await?;
    }
    play(&handle, &config, &content).await?;

    let state = handle.query_state().await?;
    drop(handle);
    runtime.shutdown().await?;
    // Every sender is gone, so the log stream ends once the printer drains it.
    printer.await.context("log printer panicked")?;

    let summary = MatchSummary::from_state(&state);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Drives the player side until the match is decided.
async fn play(
    handle: &RuntimeHandle,
    config: &ClientConfig,
    content: &ContentBundle,
) -> Result<()> {
    let mut ticker = tokio::time::interval(config.decision_interval);
    let mut watch = handle.watch_state();

    loop {
        ticker.tick().await;
        let next = {
            let state = watch.borrow_and_update();
            if state.is_over() {
                return Ok(());
            }
            if !config.autopilot {
                continue;
            }
            next_move(&state, &content.templates)
        };

        let result = match next {
            Some(Move::PlayCard { card, slot }) => handle.play_card(card, slot).await.map(drop),
            Some(Move::CaptainSkill) => handle.trigger_captain_skill().await,
            None => Ok(()),
        };
        match result {
            Ok(()) => {}
            // The board may have moved on since the snapshot was taken.
            Err(error) if error.is_rejection() => tracing::debug!(%error, "move rejected"),
            Err(error) => return Err(error.into()),
        }
    }
}

async fn print_log(handle: RuntimeHandle) {
    let mut log = handle.subscribe(Topic::Log);
    drop(handle);

    loop {
        match log.recv().await {
            Ok(Event::Log(entry)) => {
                println!("[{}] {:<6} {}", entry.time, entry.side, entry.message);
            }
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "log printer fell behind");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}
