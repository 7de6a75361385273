//! Runtime behaviour against the embedded default content.

use std::time::Duration;

use battle_content::ContentBundle;
use battle_core::{CardInstanceId, DeployError, GridSlot, Side};
use battle_runtime::{Event, MatchEvent, Runtime, RuntimeConfig, RuntimeError, Topic};

fn config() -> RuntimeConfig {
    RuntimeConfig {
        tick_interval: Duration::from_millis(50),
        rng_seed: Some(11),
        ..RuntimeConfig::default()
    }
}

fn short_match(secs: f64) -> ContentBundle {
    let mut content = ContentBundle::defaults().unwrap();
    content.config.global.match_duration_secs = secs;
    content
}

async fn start(content: ContentBundle) -> Runtime {
    Runtime::builder()
        .config(config())
        .content(content)
        .build()
        .await
        .unwrap()
}

fn slot(n: u8) -> GridSlot {
    GridSlot::new(n).unwrap()
}

#[tokio::test(start_paused = true)]
async fn playing_a_card_is_applied_and_logged() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();
    let mut log = handle.subscribe(Topic::Log);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.rng_seed, 11);
    let card = state.hand.cards().next().unwrap().instance_id;

    let id = handle.play_card(card, slot(1)).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.unit(id).unwrap().side, Side::Player);
    assert!(!state.hand.contains(card));

    let summoned = loop {
        match log.recv().await.unwrap() {
            Event::Log(entry) if entry.message.contains("summoned") => break entry,
            _ => continue,
        }
    };
    assert_eq!(summoned.side, Side::Player);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rejected_commands_leave_the_match_running() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();

    let err = handle
        .play_card(CardInstanceId(999), slot(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Deploy(DeployError::CardNotInHand(CardInstanceId(999)))
    ));
    assert!(err.is_rejection());

    let err = handle.trigger_captain_skill().await.unwrap_err();
    assert!(err.is_rejection());

    let before = handle.query_state().await.unwrap().time_remaining;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(handle.query_state().await.unwrap().time_remaining < before);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_the_clock() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();

    handle.set_paused(true).await.unwrap();
    let frozen = handle.query_state().await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    let later = handle.query_state().await.unwrap();
    assert!(later.is_paused);
    assert_eq!(later.time_remaining, frozen.time_remaining);
    assert_eq!(later.units, frozen.units);

    handle.set_paused(false).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(handle.query_state().await.unwrap().time_remaining < frozen.time_remaining);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn decided_match_is_announced_once_and_then_final() {
    let runtime = start(short_match(3.0)).await;
    let handle = runtime.handle();
    let mut lifecycle = handle.subscribe(Topic::Match);
    let mut watch = handle.watch_state();

    assert_eq!(handle.toggle_speed().await.unwrap(), 2.0);

    loop {
        watch.changed().await.unwrap();
        if watch.borrow_and_update().is_over() {
            break;
        }
    }

    let ended = loop {
        if let Event::Match(event @ MatchEvent::Ended { .. }) = lifecycle.recv().await.unwrap() {
            break event;
        }
    };
    assert_eq!(
        ended,
        MatchEvent::Ended {
            winner: Side::Enemy,
            time: "0:00".into(),
        }
    );

    let final_state = handle.query_state().await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(handle.query_state().await.unwrap(), final_state);
    assert!(lifecycle.try_recv().is_err());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reloaded_content_applies_on_restart() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();

    handle.reload_content(short_match(30.0)).await.unwrap();
    let mut lifecycle = handle.subscribe(Topic::Match);
    assert!(handle.query_state().await.unwrap().time_remaining > 100.0);

    handle.restart(Some(9)).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.time_remaining, 30.0);
    assert_eq!(state.rng_seed, 9);
    assert_eq!(state.units.len(), 4);
    assert_eq!(
        lifecycle.recv().await.unwrap(),
        Event::Match(MatchEvent::Started { seed: 9 })
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn invalid_content_is_refused() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();

    let mut broken = ContentBundle::defaults().unwrap();
    broken.setup.deck.push("ghost".into());
    let err = handle.reload_content(broken).await.unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidContent(_)));

    let mut broken = ContentBundle::defaults().unwrap();
    broken.config.effects.block_chance = 2.0;
    assert!(matches!(
        Runtime::builder().content(broken).build().await,
        Err(RuntimeError::InvalidContent(_))
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn handle_fails_after_shutdown() {
    let runtime = start(ContentBundle::defaults().unwrap()).await;
    let handle = runtime.handle();

    runtime.shutdown().await.unwrap();

    assert!(matches!(
        handle.query_state().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}
