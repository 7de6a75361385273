//! Simulation worker that owns the authoritative [`battle_core::MatchState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the match via [`battle_core::MatchEngine`] on a fixed interval, and
//! publishes snapshots and events. Commands and ticks run on the same task, so
//! a command always lands between two complete ticks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use battle_content::ContentBundle;
use battle_core::{
    CardInstanceId, FrameClock, GridSlot, MatchEngine, MatchState, Side, Timestamp, UnitId,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, MatchEvent};
use crate::oracle::OracleManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Deploy a hand card onto a player grid slot.
    PlayCard {
        card: CardInstanceId,
        slot: GridSlot,
        reply: oneshot::Sender<Result<UnitId>>,
    },
    /// Fire the player captain's ultimate.
    TriggerCaptainSkill { reply: oneshot::Sender<Result<()>> },
    SetPaused {
        paused: bool,
        reply: oneshot::Sender<()>,
    },
    /// Flip the time scale; replies with the new scale.
    ToggleSpeed { reply: oneshot::Sender<f64> },
    BeginDrag {
        card: CardInstanceId,
        reply: oneshot::Sender<Result<()>>,
    },
    CancelDrag { reply: oneshot::Sender<()> },
    /// Start a new match from the active content.
    Restart {
        seed: Option<u64>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Stage new content for the next restart.
    ReloadContent {
        content: Box<ContentBundle>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
    /// Stop the worker loop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that ticks the match and processes commands.
pub struct SimulationWorker {
    state: MatchState,
    oracles: OracleManager,
    staged: Option<OracleManager>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    state_tx: watch::Sender<MatchState>,
    tick_interval: Duration,
    default_seed: Option<u64>,
    epoch: Instant,
    clock: FrameClock,
    /// Next log sequence number not yet published.
    published_seq: u64,
    /// Set once the end of the current match has been announced.
    announced_end: bool,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: MatchState,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        state_tx: watch::Sender<MatchState>,
        tick_interval: Duration,
        default_seed: Option<u64>,
    ) -> Self {
        info!(
            units = state.units.len(),
            seed = state.rng_seed,
            "SimulationWorker initialized"
        );

        Self {
            state,
            oracles,
            staged: None,
            command_rx,
            event_bus,
            state_tx,
            tick_interval,
            default_seed,
            epoch: Instant::now(),
            clock: FrameClock::new(),
            published_seq: 0,
            announced_end: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.event_bus.publish(Event::Match(MatchEvent::Started {
            seed: self.state.rng_seed,
        }));
        self.publish();

        loop {
            tokio::select! {
                biased;
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown { reply }) => {
                        let _ = reply.send(());
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                at = ticker.tick() => self.advance(at),
            }
        }

        info!("SimulationWorker stopped");
    }

    fn now(&self) -> Timestamp {
        self.timestamp(Instant::now())
    }

    fn timestamp(&self, at: Instant) -> Timestamp {
        let ms = at.saturating_duration_since(self.epoch).as_millis();
        Timestamp::from_millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }

    /// Runs one tick. A decided match is final and is not ticked again.
    fn advance(&mut self, at: Instant) {
        if self.state.is_over() {
            return;
        }
        let now = self.timestamp(at);
        let frame = self
            .clock
            .frame(now, self.oracles.config().timing.max_frame_delta_ms);

        let report = MatchEngine::new(&mut self.state).tick(self.oracles.as_match_env(), frame);
        if report.advanced() {
            self.publish();
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::PlayCard { card, slot, reply } => {
                let result = MatchEngine::new(&mut self.state)
                    .play_card(self.oracles.as_match_env(), card, Side::Player, slot)
                    .map_err(RuntimeError::from);
                self.finish_command("PlayCard", result, reply);
            }
            Command::TriggerCaptainSkill { reply } => {
                let now = self.now();
                let result = MatchEngine::new(&mut self.state)
                    .trigger_captain_skill(self.oracles.as_match_env(), now)
                    .map_err(RuntimeError::from);
                self.finish_command("TriggerCaptainSkill", result, reply);
            }
            Command::SetPaused { paused, reply } => {
                MatchEngine::new(&mut self.state).set_paused(paused);
                // Wall time spent paused must not count as match time.
                self.clock.reset();
                self.publish();
                if reply.send(()).is_err() {
                    debug!("SetPaused reply channel closed (caller dropped)");
                }
            }
            Command::ToggleSpeed { reply } => {
                let scale = MatchEngine::new(&mut self.state).toggle_speed(self.oracles.config());
                self.publish();
                if reply.send(scale).is_err() {
                    debug!("ToggleSpeed reply channel closed (caller dropped)");
                }
            }
            Command::BeginDrag { card, reply } => {
                let result = MatchEngine::new(&mut self.state)
                    .begin_drag(card)
                    .map_err(RuntimeError::from);
                self.finish_command("BeginDrag", result, reply);
            }
            Command::CancelDrag { reply } => {
                MatchEngine::new(&mut self.state).cancel_drag();
                self.publish();
                if reply.send(()).is_err() {
                    debug!("CancelDrag reply channel closed (caller dropped)");
                }
            }
            Command::Restart { seed, reply } => {
                let result = self.restart(seed);
                self.finish_command("Restart", result, reply);
            }
            Command::ReloadContent { content, reply } => {
                let result = match content.validate() {
                    Ok(()) => {
                        info!("content staged for the next match");
                        self.staged = Some(OracleManager::new(Arc::new(*content)));
                        Ok(())
                    }
                    Err(error) => Err(RuntimeError::from(error)),
                };
                self.finish_command("ReloadContent", result, reply);
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    /// Logs a rejected command, publishes on success, and replies.
    fn finish_command<T>(
        &mut self,
        name: &'static str,
        result: Result<T>,
        reply: oneshot::Sender<Result<T>>,
    ) {
        match &result {
            Ok(_) => self.publish(),
            Err(error) => debug!(command = name, %error, "command rejected"),
        }
        if reply.send(result).is_err() {
            debug!("{} reply channel closed (caller dropped)", name);
        }
    }

    /// Starts a new match, switching to staged content if there is any.
    ///
    /// The new state is built before anything is swapped. On failure the
    /// current match and content stay in place and the staged bundle is dropped.
    fn restart(&mut self, seed: Option<u64>) -> Result<()> {
        let seed = seed
            .or(self.default_seed)
            .unwrap_or_else(rand::random::<u64>);
        let staged = self.staged.take();
        let oracles = staged.as_ref().unwrap_or(&self.oracles);
        let state = match MatchState::start(oracles.as_match_env(), &oracles.content().setup, seed)
        {
            Ok(state) => state,
            Err(error) => {
                if staged.is_some() {
                    warn!(%error, "staged content discarded");
                }
                return Err(RuntimeError::InitialState(error));
            }
        };
        if let Some(staged) = staged {
            self.oracles = staged;
        }
        self.state = state;

        self.clock.reset();
        self.published_seq = 0;
        self.announced_end = false;
        info!(seed, "match restarted");
        self.event_bus
            .publish(Event::Match(MatchEvent::Started { seed }));
        Ok(())
    }

    /// Pushes the current state to watchers and forwards new log entries.
    fn publish(&mut self) {
        for entry in self.state.log.since(self.published_seq) {
            self.event_bus.publish(Event::Log(entry.clone()));
        }
        self.published_seq = self.state.log.next_seq();

        if let Some(winner) = self.state.winner
            && !self.announced_end
        {
            self.announced_end = true;
            let time = self.state.time_label();
            info!(%winner, %time, "match decided");
            self.event_bus
                .publish(Event::Match(MatchEvent::Ended { winner, time }));
        }

        self.state_tx.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(content: ContentBundle) -> SimulationWorker {
        let oracles = OracleManager::new(Arc::new(content));
        let state = MatchState::start(oracles.as_match_env(), &oracles.content().setup, 1)
            .expect("default content starts");
        let (_command_tx, command_rx) = mpsc::channel(4);
        let (state_tx, _state_rx) = watch::channel(state.clone());
        SimulationWorker::new(
            state,
            oracles,
            command_rx,
            EventBus::new(),
            state_tx,
            Duration::from_millis(16),
            None,
        )
    }

    #[tokio::test]
    async fn failed_restart_keeps_the_running_match() {
        let defaults = ContentBundle::defaults().unwrap();
        let mut worker = worker(defaults.clone());
        let before = worker.state.clone();

        let mut broken = defaults.clone();
        broken.setup.starting_units[0].template_id = "missing".into();
        worker.staged = Some(OracleManager::new(Arc::new(broken)));

        let err = worker.restart(Some(9)).unwrap_err();
        assert!(matches!(err, RuntimeError::InitialState(_)));
        assert_eq!(worker.state, before);
        assert_eq!(worker.oracles.content(), &defaults);
        assert!(worker.staged.is_none());

        worker.restart(Some(9)).unwrap();
        assert_eq!(worker.state.rng_seed, 9);
    }

    #[tokio::test]
    async fn restart_commits_staged_content() {
        let defaults = ContentBundle::defaults().unwrap();
        let mut worker = worker(defaults.clone());

        let mut faster = defaults;
        faster.config.global.initial_energy = 2.0;
        worker.staged = Some(OracleManager::new(Arc::new(faster.clone())));

        worker.restart(Some(3)).unwrap();
        assert_eq!(worker.state.energy, 2.0);
        assert_eq!(worker.oracles.content(), &faster);
        assert!(worker.staged.is_none());
    }
}
