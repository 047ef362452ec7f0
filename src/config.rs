//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Conversation session configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Delay before an ordinary bot reply is shown ("typing").
    pub typing_delay: Duration,
    /// Delay before the heavier replies (quiz results, team match).
    pub long_typing_delay: Duration,
    /// Seed for the quiz scorer. `None` draws from entropy.
    pub score_seed: Option<u64>,
    /// Re-ask the readiness question when the user isn't ready yet.
    /// If false, the bot waits silently.
    pub reprompt_when_not_ready: bool,
    /// Emit a notice when a results option other than A is picked.
    pub announce_unsupported: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(1000),
            long_typing_delay: Duration::from_millis(1500),
            score_seed: None,
            reprompt_when_not_ready: false,
            announce_unsupported: true,
        }
    }
}

impl ChatConfig {
    /// Configuration with no typing delay. Replies are delivered inline.
    pub fn instant() -> Self {
        Self {
            typing_delay: Duration::ZERO,
            long_typing_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Whether any emission is delayed.
    pub fn is_instant(&self) -> bool {
        self.typing_delay.is_zero() && self.long_typing_delay.is_zero()
    }

    /// Load configuration from `FATAP_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let typing_delay = env_parse::<u64>("FATAP_TYPING_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.typing_delay);

        let long_typing_delay = env_parse::<u64>("FATAP_LONG_TYPING_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.long_typing_delay);

        let score_seed = env_parse::<u64>("FATAP_SCORE_SEED")?;

        let reprompt_when_not_ready = env_parse::<bool>("FATAP_REPROMPT_WHEN_NOT_READY")?
            .unwrap_or(defaults.reprompt_when_not_ready);

        let announce_unsupported = env_parse::<bool>("FATAP_ANNOUNCE_UNSUPPORTED")?
            .unwrap_or(defaults.announce_unsupported);

        Ok(Self {
            typing_delay,
            long_typing_delay,
            score_seed,
            reprompt_when_not_ready,
            announce_unsupported,
        })
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{raw}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}
