//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml`, then overridden by `FLOSYN__*` environment
//! variables.
//!
//! ```toml
//! [app]
//! level = "debug"
//! timezone = "Africa/Cairo"
//!
//! [database]
//! sqlite = "./flosyn.db"
//! ```
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "settings";
const DEFAULT_DATABASE_PATH: &str = "./flosyn.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    /// IANA time zone used to decide what "today" is.
    pub timezone: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite(DEFAULT_DATABASE_PATH.to_string())
    }
}

impl Database {
    /// sea-orm connection string.
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
}

impl Settings {
    /// Load from `path` (or `settings.*` in the working directory when
    /// absent) and the environment.
    pub fn new(path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let file = File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(path.is_some());
        Self::layered(file, environment())
    }

    /// File values first, environment on top.
    fn layered<S>(file: S, env: Environment) -> std::result::Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Parse settings from an inline TOML document.
    pub fn from_toml(raw: &str) -> std::result::Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.app
            .timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| AppError::InvalidTimezone(name.to_string()))
            })
            .transpose()
    }
}

/// `FLOSYN__SECTION__KEY` variables.
fn environment() -> Environment {
    Environment::with_prefix("FLOSYN").separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_point_to_local_sqlite() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.app.timezone, None);
        assert_eq!(settings.database.url(), "sqlite:./flosyn.db?mode=rwc");
    }

    #[test]
    fn reads_memory_database_and_timezone() {
        let settings = Settings::from_toml(
            r#"
            database = "memory"

            [app]
            level = "debug"
            timezone = "Africa/Cairo"
            "#,
        )
        .unwrap();
        assert_eq!(settings.database, Database::Memory);
        assert_eq!(settings.database.url(), "sqlite::memory:");
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.timezone().unwrap(), Some(chrono_tz::Africa::Cairo));
    }

    #[test]
    fn reads_sqlite_path() {
        let settings = Settings::from_toml(
            r#"
            [database]
            sqlite = "/tmp/budget.db"
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.database,
            Database::Sqlite("/tmp/budget.db".to_string())
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = File::from_str(
            r#"
            [app]
            level = "info"
            timezone = "Africa/Cairo"

            [database]
            sqlite = "/tmp/a.db"
            "#,
            FileFormat::Toml,
        );
        let env = env_of(&[
            ("FLOSYN__APP__LEVEL", "debug"),
            ("FLOSYN__DATABASE__SQLITE", "/tmp/b.db"),
            ("OTHER__APP__LEVEL", "trace"),
        ]);

        let settings = Settings::layered(file, env).unwrap();
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.app.timezone.as_deref(), Some("Africa/Cairo"));
        assert_eq!(settings.database, Database::Sqlite("/tmp/b.db".to_string()));
    }

    #[test]
    fn empty_environment_keeps_file_values() {
        let file = File::from_str("[app]\nlevel = \"warn\"", FileFormat::Toml);
        let settings = Settings::layered(file, env_of(&[])).unwrap();
        assert_eq!(settings.app.level, "warn");
        assert_eq!(settings.database, Database::default());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let settings = Settings::from_toml(
            r#"
            [app]
            timezone = "Mars/Olympus"
            "#,
        )
        .unwrap();
        assert!(matches!(
            settings.timezone(),
            Err(AppError::InvalidTimezone(name)) if name == "Mars/Olympus"
        ));
    }
}
