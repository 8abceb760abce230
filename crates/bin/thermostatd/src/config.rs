//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `thermostat.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.
//!
//! The initial thermostat state is written with the domain types
//! themselves, so a config file cannot describe, say, heating without a
//! target.

use std::time::Duration;

use serde::Deserialize;
use thermostat_adapter_virtual::VirtualBehaviour;
use thermostat_domain::fetch_status::FetchStatus;
use thermostat_domain::run_state::RunState;
use thermostat_domain::temperature::{Reading, Scale, TemperatureUnit};
use thermostat_domain::thermostat::ThermostatState;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// State the thermostat starts in.
    pub thermostat: ThermostatConfig,
    /// Simulated outside sensor.
    pub outside: OutsideConfig,
    /// Outside-temperature refresh cadence.
    pub refresh: RefreshConfig,
    /// Presentation preferences for log output.
    pub display: DisplayConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Initial thermostat state.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub run_state: RunState,
    pub inside_temp: Reading,
}

/// Virtual outside sensor configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutsideConfig {
    pub sensor: VirtualBehaviour,
    /// Simulated answer delay; `0` answers immediately.
    pub latency_ms: u64,
}

/// Refresh loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between two outside-temperature requests.
    pub interval_secs: u64,
    /// Milliseconds to wait for one request before calling it failed.
    pub timeout_ms: u64,
}

/// Display preferences.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Scale every logged temperature is converted to.
    pub preferred_scale: Scale,
}

impl Config {
    /// Load configuration from `thermostat.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("thermostat.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("THERMOSTAT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("THERMOSTAT_REFRESH_SECS") {
            if let Ok(secs) = val.parse() {
                self.refresh.interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("THERMOSTAT_FETCH_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.refresh.timeout_ms = ms;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh interval must be non-zero".to_string(),
            ));
        }
        if self.refresh.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "fetch timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// State published as revision 0. The outside temperature has not been
    /// requested yet.
    #[must_use]
    pub fn initial_state(&self) -> ThermostatState {
        ThermostatState::new(
            self.thermostat.run_state,
            self.thermostat.inside_temp,
            FetchStatus::NotFetched,
        )
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.refresh.timeout_ms)
    }

    #[must_use]
    pub fn sensor_latency(&self) -> Option<Duration> {
        (self.outside.latency_ms > 0).then(|| Duration::from_millis(self.outside.latency_ms))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "thermostatd=info,thermostat_app=info".to_string(),
        }
    }
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            run_state: RunState::Off,
            inside_temp: Reading::new(TemperatureUnit::Celsius(20)),
        }
    }
}

impl Default for OutsideConfig {
    fn default() -> Self {
        Self {
            sensor: VirtualBehaviour::Steady {
                reading: Reading::new(TemperatureUnit::Celsius(12)),
            },
            latency_ms: 0,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            timeout_ms: 5_000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preferred_scale: Scale::Celsius,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_domain::temperature::Setpoint;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.thermostat.run_state, RunState::Off);
        assert_eq!(
            config.thermostat.inside_temp,
            Reading::new(TemperatureUnit::Celsius(20))
        );
        assert_eq!(config.refresh.interval_secs, 60);
        assert_eq!(config.refresh.timeout_ms, 5_000);
        assert_eq!(config.display.preferred_scale, Scale::Celsius);
        assert!(config.sensor_latency().is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.refresh.interval_secs, 60);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [thermostat]
            run_state = { mode = 'heating', target = { scale = 'celsius', value = 25 } }
            inside_temp = { scale = 'fahrenheit', value = 70 }

            [outside]
            latency_ms = 150

            [outside.sensor]
            behaviour = 'failing'
            detail = 'no network'

            [refresh]
            interval_secs = 30
            timeout_ms = 2000

            [display]
            preferred_scale = 'fahrenheit'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.thermostat.run_state,
            RunState::heating(Setpoint::new(TemperatureUnit::Celsius(25)))
        );
        assert_eq!(
            config.thermostat.inside_temp,
            Reading::new(TemperatureUnit::Fahrenheit(70))
        );
        assert_eq!(
            config.outside.sensor,
            VirtualBehaviour::Failing {
                detail: "no network".to_string()
            }
        );
        assert_eq!(config.sensor_latency(), Some(Duration::from_millis(150)));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.fetch_timeout(), Duration::from_millis(2000));
        assert_eq!(config.display.preferred_scale, Scale::Fahrenheit);
    }

    #[test]
    fn should_reject_heating_without_target() {
        let toml = "
            [thermostat]
            run_state = { mode = 'heating' }
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_unitless_inside_temperature() {
        let toml = "
            [thermostat]
            inside_temp = 21
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_start_with_outside_temperature_not_fetched() {
        let config = Config::default();
        assert_eq!(config.initial_state().outside_temp, FetchStatus::NotFetched);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.refresh.interval_secs, 60);
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = Config::default();
        config.refresh.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.refresh.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
