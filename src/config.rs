use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_MAX_RESULTS;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_cost_of_living_bonus")]
    pub cost_of_living_bonus: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            cost_of_living_bonus: default_cost_of_living_bonus(),
        }
    }
}

impl From<&ScoringSettings> for ScoringWeights {
    fn from(settings: &ScoringSettings) -> Self {
        Self {
            cost_of_living_bonus: settings.cost_of_living_bonus,
        }
    }
}

fn default_cost_of_living_bonus() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FINDMYUNI_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FINDMYUNI__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize::<Self>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let max_results = self.matching.max_results;
        if !(1..=DEFAULT_MAX_RESULTS).contains(&max_results) {
            return Err(ConfigError::Message(format!(
                "matching.max_results must be between 1 and {}, got {}",
                DEFAULT_MAX_RESULTS, max_results
            )));
        }

        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FINDMYUNI")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let the conventional DATABASE_URL variable override `database.url`
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scoring() {
        let scoring = ScoringSettings::default();
        assert_eq!(scoring.cost_of_living_bonus, 5.0);

        let weights = ScoringWeights::from(&scoring);
        assert_eq!(weights.cost_of_living_bonus, 5.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    const MINIMAL: &str =
        "[server]\nhost = \"127.0.0.1\"\nport = 8080\n\n[database]\nurl = \"postgres://localhost/findmyuni\"\n";

    fn load_temp(name: &str, contents: &str) -> Result<Settings, ConfigError> {
        let path = std::env::temp_dir().join(format!("findmyuni-{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();

        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        settings
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let settings = load_temp("defaults", MINIMAL).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.matching.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(settings.scoring.cost_of_living_bonus, 5.0);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_rejects_result_limit_outside_range() {
        for (name, limit) in [("zero-limit", 0), ("large-limit", 50)] {
            let contents = format!("{}\n[matching]\nmax_results = {}\n", MINIMAL, limit);
            assert!(load_temp(name, &contents).is_err(), "max_results = {} was accepted", limit);
        }

        let contents = format!("{}\n[matching]\nmax_results = 3\n", MINIMAL);
        assert_eq!(load_temp("small-limit", &contents).unwrap().matching.max_results, 3);
    }
}
