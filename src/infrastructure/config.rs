use std::env;
use std::time::Duration;

use crate::modules::integrations::google_books::DEFAULT_BASE_URL;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub google_books_api_url: String,
    pub google_books_api_key: String,
    pub google_books_timeout: Duration,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or unparseable values use defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://booktracker.db?mode=rwc".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            google_books_api_url: lookup("GOOGLE_BOOKS_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            google_books_api_key: lookup("GOOGLE_BOOKS_API_KEY").unwrap_or_default(),
            google_books_timeout: Duration::from_secs(
                lookup("GOOGLE_BOOKS_TIMEOUT_SECS")
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(10),
            ),
            seed_demo: lookup("SEED_DEMO").is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.database_url, "sqlite://booktracker.db?mode=rwc");
        assert_eq!(config.port, 8080);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.google_books_api_url, DEFAULT_BASE_URL);
        assert_eq!(config.google_books_api_key, "");
        assert_eq!(config.google_books_timeout, Duration::from_secs(10));
        assert!(!config.seed_demo);
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "not-a-port"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("GOOGLE_BOOKS_API_URL", "http://127.0.0.1:9000/volumes/"),
            ("GOOGLE_BOOKS_API_KEY", "secret"),
            ("GOOGLE_BOOKS_TIMEOUT_SECS", "3"),
            ("SEED_DEMO", "1"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.google_books_api_url, "http://127.0.0.1:9000/volumes");
        assert_eq!(config.google_books_api_key, "secret");
        assert_eq!(config.google_books_timeout, Duration::from_secs(3));
        assert!(config.seed_demo);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        // SAFETY: serialised with every other test touching the environment
        unsafe {
            env::set_var("PORT", "9191");
        }
        let config = Config::from_env();
        unsafe {
            env::remove_var("PORT");
        }
        assert_eq!(config.port, 9191);
    }
}
