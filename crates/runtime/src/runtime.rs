//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/state/event
//! channels, and exposes a builder-based API for clients to drive a match.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use battle_content::{ContentBundle, ContentLoader};
use battle_core::MatchState;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Wall-clock time between ticks.
    pub tick_interval: Duration,
    /// Seed for match rolls. `None` draws a fresh seed per match.
    pub rng_seed: Option<u64>,
    /// Content override directory. `None` uses the embedded defaults.
    pub content_dir: Option<PathBuf>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            rng_seed: None,
            content_dir: None,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_TICK_MS` - Milliseconds between ticks (default: 16)
    /// - `BATTLE_SEED` - Fixed match seed (default: random)
    /// - `BATTLE_CONTENT_DIR` - Content override directory (default: embedded)
    /// - `BATTLE_EVENT_BUFFER` - Per-topic event capacity (default: 256)
    /// - `BATTLE_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("BATTLE_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        config.rng_seed = read_env::<u64>("BATTLE_SEED");
        config.content_dir = env::var_os("BATTLE_CONTENT_DIR").map(PathBuf::from);
        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that drives a match in the background
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime with the given configuration and content from
    /// `config.content_dir` (or the embedded defaults).
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to exit.
    pub async fn shutdown(self) -> Result<()> {
        // An already-stopped worker has nothing left to stop.
        if let Err(error) = self.handle.shutdown().await {
            tracing::debug!(%error, "worker already stopped");
        }
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<ContentBundle>,
    state: Option<MatchState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide match content instead of loading it
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Provide the initial match state instead of starting a fresh match
    pub fn initial_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let content = match self.content {
            Some(content) => {
                content.validate()?;
                content
            }
            None => load_content(&self.config)?,
        };
        let oracles = OracleManager::new(Arc::new(content));

        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let seed = self.config.rng_seed.unwrap_or_else(rand::random::<u64>);
                MatchState::start(oracles.as_match_env(), &oracles.content().setup, seed)
                    .map_err(RuntimeError::InitialState)?
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (state_tx, state_rx) = watch::channel(initial_state.clone());
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), state_rx);

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            command_rx,
            event_bus,
            state_tx,
            self.config.tick_interval,
            self.config.rng_seed,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}

fn load_content(config: &RuntimeConfig) -> Result<ContentBundle> {
    let loaded = match &config.content_dir {
        Some(dir) => ContentLoader::load_dir(dir.clone()),
        None => ContentBundle::defaults(),
    };
    loaded.map_err(|e| RuntimeError::ContentLoad(format!("{e:#}")))
}
