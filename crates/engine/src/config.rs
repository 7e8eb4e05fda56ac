//! Engine configuration.

use serde::Deserialize;

use splitledger_splits::RemainderPolicy;

/// Environment variable selecting the equal-split remainder policy.
pub const REMAINDER_ENV: &str = "SPLITLEDGER_REMAINDER";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the leftover cents of an equal split go.
    pub remainder: RemainderPolicy,
}

impl EngineConfig {
    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset or unrecognised values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(REMAINDER_ENV) {
            match raw.parse::<RemainderPolicy>() {
                Ok(policy) => config.remainder = policy,
                Err(e) => tracing::warn!("{REMAINDER_ENV}: {e}; using {:?}", config.remainder),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dropping_the_remainder() {
        assert_eq!(EngineConfig::default().remainder, RemainderPolicy::Drop);
        assert_eq!(EngineConfig::from_lookup(|_| None), EngineConfig::default());
    }

    #[test]
    fn reads_remainder_policy_from_lookup() {
        let config = EngineConfig::from_lookup(|key| {
            (key == REMAINDER_ENV).then(|| "first".to_string())
        });
        assert_eq!(config.remainder, RemainderPolicy::FirstParticipant);
    }

    #[test]
    fn unknown_values_fall_back_to_default() {
        let config = EngineConfig::from_lookup(|_| Some("largest".to_string()));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn deserializes_from_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "remainder": "first_participant" }"#).unwrap();
        assert_eq!(config.remainder, RemainderPolicy::FirstParticipant);

        let empty: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }
}
