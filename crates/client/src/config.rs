//! Client configuration structures and loaders.

use std::env;
use std::time::Duration;

use battle_runtime::RuntimeConfig;

/// Headless client settings plus the runtime settings it forwards.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Let the scripted autopilot play cards and fire the captain.
    pub autopilot: bool,
    /// How often the autopilot looks at the board.
    pub decision_interval: Duration,
    /// Start the match at fast speed.
    pub fast: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            autopilot: true,
            decision_interval: Duration::from_millis(250),
            fast: true,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (in addition to those read by
    /// [`RuntimeConfig::from_env`]):
    /// - `BATTLE_AUTOPILOT` - Play for the player side (default: true)
    /// - `BATTLE_DECISION_MS` - Autopilot decision interval (default: 250)
    /// - `BATTLE_FAST` - Start at fast speed (default: true)
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        if let Some(enabled) = read_env_bool("BATTLE_AUTOPILOT") {
            config.autopilot = enabled;
        }
        if let Some(ms) = read_env::<u64>("BATTLE_DECISION_MS") {
            config.decision_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(fast) = read_env_bool("BATTLE_FAST") {
            config.fast = fast;
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

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
