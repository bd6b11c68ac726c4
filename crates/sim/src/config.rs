//! Simulator configuration and environment loaders.
use std::env;
use std::time::Duration;

use rotation_core::{Category, RotationConfig, Settings};

use crate::error::SimError;

/// Parameters of one simulated fight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Interval between engine ticks.
    pub tick: Duration,
    /// Length of the fight.
    pub duration: Duration,
    pub use_opener: bool,
    /// The target dies after this long, if set.
    pub target_lifetime: Option<Duration>,
    /// Categories switched off for the whole fight.
    pub disabled: Vec<Category>,
}

impl SimConfig {
    pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(180);

    /// Construct configuration from process environment variables.
    ///
    /// - `SIM_TICK_MS`
    /// - `SIM_DURATION_SECS`
    /// - `SIM_USE_OPENER`
    /// - `SIM_TARGET_LIFETIME_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("SIM_TICK_MS") {
            config.tick = Duration::from_millis(millis);
        }

        if let Some(secs) = read_env::<u64>("SIM_DURATION_SECS") {
            config.duration = Duration::from_secs(secs);
        }

        if let Some(use_opener) = read_env_bool("SIM_USE_OPENER") {
            config.use_opener = use_opener;
        }

        if let Some(secs) = read_env::<u64>("SIM_TARGET_LIFETIME_SECS") {
            config.target_lifetime = Some(Duration::from_secs(secs));
        }

        config
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.tick.is_zero() {
            return Err(SimError::ZeroTick);
        }
        if self.duration < self.tick {
            return Err(SimError::DurationTooShort {
                duration: self.duration,
                tick: self.tick,
            });
        }
        Ok(())
    }

    /// Engine tuning for this fight.
    pub fn rotation_config(&self) -> RotationConfig {
        RotationConfig::default().with_opener(self.use_opener)
    }

    /// Category toggles for this fight.
    pub fn settings(&self) -> Settings {
        self.disabled
            .iter()
            .fold(Settings::new(), |settings, category| {
                settings.with(*category, false)
            })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick: Self::DEFAULT_TICK,
            duration: Self::DEFAULT_DURATION,
            use_opener: true,
            target_lifetime: None,
            disabled: Vec::new(),
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_categories_flow_into_settings() {
        let config = SimConfig {
            disabled: vec![Category::Wildfire, Category::Drill],
            ..SimConfig::default()
        };
        let settings = config.settings();
        assert!(!settings.is_enabled(Category::Wildfire));
        assert!(!settings.is_enabled(Category::Drill));
        assert!(settings.is_enabled(Category::AirAnchor));
    }

    #[test]
    fn rejects_degenerate_timing() {
        let zero = SimConfig {
            tick: Duration::ZERO,
            ..SimConfig::default()
        };
        assert_eq!(zero.validate(), Err(SimError::ZeroTick));

        let short = SimConfig {
            duration: Duration::from_millis(50),
            ..SimConfig::default()
        };
        assert!(matches!(
            short.validate(),
            Err(SimError::DurationTooShort { .. })
        ));
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn opener_flag_reaches_engine_config() {
        let config = SimConfig {
            use_opener: false,
            ..SimConfig::default()
        };
        assert!(!config.rotation_config().use_opener);
    }
}
