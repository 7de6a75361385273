//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! player commands, state snapshots and event streams.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use battle_content::ContentBundle;
use battle_core::{CardInstanceId, GridSlot, MatchState, UnitId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    state_rx: watch::Receiver<MatchState>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        state_rx: watch::Receiver<MatchState>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            state_rx,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Deploy a card from the hand onto a player grid slot.
    pub async fn play_card(&self, card: CardInstanceId, slot: GridSlot) -> Result<UnitId> {
        self.request(|reply| Command::PlayCard { card, slot, reply })
            .await?
    }

    /// Fire the player captain's ultimate.
    pub async fn trigger_captain_skill(&self) -> Result<()> {
        self.request(|reply| Command::TriggerCaptainSkill { reply })
            .await?
    }

    pub async fn set_paused(&self, paused: bool) -> Result<()> {
        self.request(|reply| Command::SetPaused { paused, reply })
            .await
    }

    /// Flip between normal and fast speed. Returns the new time scale.
    pub async fn toggle_speed(&self) -> Result<f64> {
        self.request(|reply| Command::ToggleSpeed { reply }).await
    }

    pub async fn begin_drag(&self, card: CardInstanceId) -> Result<()> {
        self.request(|reply| Command::BeginDrag { card, reply })
            .await?
    }

    pub async fn cancel_drag(&self) -> Result<()> {
        self.request(|reply| Command::CancelDrag { reply }).await
    }

    /// Start a fresh match from the active content.
    ///
    /// Without a seed, the configured seed is used, or a random one.
    pub async fn restart(&self, seed: Option<u64>) -> Result<()> {
        self.request(|reply| Command::Restart { seed, reply })
            .await?
    }

    /// Validate and stage new content. It takes effect on the next restart.
    pub async fn reload_content(&self, content: ContentBundle) -> Result<()> {
        self.request(|reply| Command::ReloadContent {
            content: Box::new(content),
            reply,
        })
        .await?
    }

    /// Query the current match state (read-only snapshot).
    pub async fn query_state(&self) -> Result<MatchState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Receiver that always holds the state as of the last completed tick.
    pub fn watch_state(&self) -> watch::Receiver<MatchState> {
        self.state_rx.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Combat log entries in order
    /// - `Topic::Match` - Match start and end
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }
}
