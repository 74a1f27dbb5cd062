use std::env;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ConfigError;

/// Attribute identifier of the project-name field in the str_values table.
pub const DEFAULT_PROPERTY_ID: i32 = 78;

const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
}

/// All configuration for one run, resolved once at startup and passed into
/// the components explicitly. No module-level state.
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub smtp: SmtpConfig,
    pub recipients: Vec<String>,
    pub snapshot_dir: PathBuf,
    pub property_id: i32,
}

impl Config {
    /// Resolves the full configuration from the environment, loading a
    /// `.env` file from the working directory first if one exists. Fails
    /// before any I/O when a required value is missing or unparseable.
    pub fn from_env() -> Result<Config, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => {
                debug!(action = "load", component = "config", path = ?path, "Loaded .env file")
            }
            Err(_) => debug!(
                action = "load",
                component = "config",
                "No .env file found, using process environment only"
            ),
        }

        let db = DbConfig {
            host: required("DB_HOST")?,
            port: port_or_default("DB_PORT", DEFAULT_DB_PORT)?,
            dbname: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
        };

        let smtp = SmtpConfig {
            server: required("SMTP_SERVER")?,
            port: port_or_default("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            sender: required("EMAIL_SENDER")?,
            password: required("EMAIL_PASSWORD")?,
        };

        let recipients = parse_recipients(&required("EMAIL_RECEIVER")?);
        if recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }

        let snapshot_dir = PathBuf::from(required("SNAPSHOT_DIR")?);

        let property_id = match env::var("FP_PROPERTY_ID") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    var: "FP_PROPERTY_ID",
                    reason: format!("'{}' is not an integer", raw.trim()),
                })?,
            Err(_) => DEFAULT_PROPERTY_ID,
        };

        info!(
            action = "resolve",
            component = "config",
            recipient_count = recipients.len(),
            snapshot_dir = %snapshot_dir.display(),
            "Configuration resolved"
        );

        Ok(Config {
            db,
            smtp,
            recipients,
            snapshot_dir,
            property_id,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn port_or_default(var: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var,
                reason: format!("'{}' is not a valid port number", raw.trim()),
            })
        }
        _ => Ok(default),
    }
}

/// Splits a comma-separated address list, trimming each entry and dropping
/// empties.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipients_are_trimmed_and_empties_dropped() {
        let recipients = parse_recipients(" a@example.com , ,b@example.com,, ");
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn blank_recipient_list_parses_to_empty() {
        assert!(parse_recipients("  ,  , ").is_empty());
        assert!(parse_recipients("").is_empty());
    }

    // Environment mutation is process-global, so every from_env case lives
    // in this one test to keep it race-free under the parallel test runner.
    #[test]
    fn from_env_resolves_and_rejects() {
        let vars = [
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "5433"),
            ("DB_NAME", "freezerpro"),
            ("DB_USER", "reporter"),
            ("DB_PASSWORD", "secret"),
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("EMAIL_SENDER", "reports@example.com"),
            ("EMAIL_PASSWORD", "hunter2"),
            ("EMAIL_RECEIVER", "one@example.com, two@example.com"),
            ("SNAPSHOT_DIR", "/var/lib/projwatch"),
        ];
        for (var, value) in vars {
            env::set_var(var, value);
        }
        env::remove_var("FP_PROPERTY_ID");

        let config = Config::from_env().expect("full environment should resolve");
        assert_eq!(config.db.host, "db.internal");
        assert_eq!(config.db.port, 5433);
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.recipients.len(), 2);
        assert_eq!(config.property_id, DEFAULT_PROPERTY_ID);

        env::set_var("FP_PROPERTY_ID", "101");
        let config = Config::from_env().expect("override should resolve");
        assert_eq!(config.property_id, 101);

        env::set_var("FP_PROPERTY_ID", "not-a-number");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { var: "FP_PROPERTY_ID", .. })
        ));
        env::remove_var("FP_PROPERTY_ID");

        env::set_var("EMAIL_RECEIVER", " , ");
        assert!(matches!(Config::from_env(), Err(ConfigError::NoRecipients)));
        env::set_var("EMAIL_RECEIVER", "one@example.com");

        env::remove_var("DB_HOST");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("DB_HOST"))
        ));
    }
}
