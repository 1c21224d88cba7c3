use clap::Args;
use lib_ticker::markets::sentiment::DEFAULT_SENTIMENT_URL;
use lib_ticker::markets::yahoo::DEFAULT_QUOTES_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "rs_ticker.conf";

#[derive(Args, Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "TICKER_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "TICKER_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "TICKER_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[clap(long, env = "TICKER_SENTIMENT_URL", help = "Sentiment service endpoint.")]
    pub sentiment_url: Option<String>,

    #[clap(long, env = "TICKER_SENTIMENT_TIMEOUT_MS", help = "Timeout in milliseconds for a sentiment lookup.")]
    pub sentiment_timeout_ms: Option<u64>,

    #[clap(long, env = "TICKER_QUOTES_URL", help = "Base URL of the CSV quote service.")]
    pub quotes_url: Option<String>,

    #[clap(long, env = "TICKER_QUOTES_RETRIES", help = "Retries for transient quote request failures.")]
    pub quotes_retries: Option<u32>,
}

impl Config {
    /// Built-in values for every setting except `config_path`.
    pub fn defaults() -> Config {
        Config {
            config_path: None,
            log_dir: Some(PathBuf::from("./logs")),
            log_level: Some("info".to_string()),
            sentiment_url: Some(DEFAULT_SENTIMENT_URL.to_string()),
            sentiment_timeout_ms: Some(10_000),
            quotes_url: Some(DEFAULT_QUOTES_URL.to_string()),
            quotes_retries: Some(3),
        }
    }

    // 'other' wins wherever it is set
    pub fn merge(self, other: Config) -> Config {
        Config {
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            sentiment_url: other.sentiment_url.or(self.sentiment_url),
            sentiment_timeout_ms: other.sentiment_timeout_ms.or(self.sentiment_timeout_ms),
            quotes_url: other.quotes_url.or(self.quotes_url),
            quotes_retries: other.quotes_retries.or(self.quotes_retries),
        }
    }
}

/// Reads a JSON config file. Missing, unreadable or malformed files yield `None`.
pub fn read_config_file(path: &Path) -> Option<Config> {
    if !path.exists() {
        log::info!("Config file not found at {}. Using defaults and environment/CLI variables.", path.display());
        return None;
    }

    let config_str = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Failed to read config file {}: {}. Falling back to other sources.", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Config>(&config_str) {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("Failed to parse config file {}: {}. Falling back to other sources.", path.display(), e);
            None
        }
    }
}

/// Layers defaults, the config file and the already parsed CLI/env values.
pub fn load_config(cli: Config) -> Config {
    let config_file_path = cli
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut current_config = Config::defaults();
    if let Some(file_config) = read_config_file(&config_file_path) {
        current_config = current_config.merge(file_config);
    }

    current_config.merge(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_merge_prefers_set_values() {
        let base = Config::defaults();
        let over = Config {
            log_level: Some("debug".into()),
            quotes_retries: Some(0),
            ..Default::default()
        };

        let merged = base.clone().merge(over);
        assert_eq!(merged.log_level.as_deref(), Some("debug"));
        assert_eq!(merged.quotes_retries, Some(0));
        assert_eq!(merged.sentiment_url, base.sentiment_url);
        assert_eq!(merged.log_dir, base.log_dir);
    }

    #[test]
    fn test_file_overrides_defaults_and_cli_overrides_file() {
        let file = write_config(r#"{ "sentimentUrl": "http://file.example/", "sentimentTimeoutMs": 250, "logLevel": "warn" }"#);
        let cli = Config {
            config_path: Some(file.path().to_path_buf()),
            log_level: Some("trace".into()),
            ..Default::default()
        };

        let config = load_config(cli);
        assert_eq!(config.sentiment_url.as_deref(), Some("http://file.example/"));
        assert_eq!(config.sentiment_timeout_ms, Some(250));
        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert_eq!(config.quotes_url.as_deref(), Some(DEFAULT_QUOTES_URL));
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let file = write_config("{ not json");
        assert!(read_config_file(file.path()).is_none());

        let config = load_config(Config {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        });
        let expected = Config {
            config_path: Some(file.path().to_path_buf()),
            ..Config::defaults()
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.conf");
        assert!(read_config_file(&path).is_none());
        assert_eq!(load_config(Config { config_path: Some(path.clone()), ..Default::default() }).log_dir, Some(PathBuf::from("./logs")));
    }

    #[test]
    fn test_flags_parse_into_config() {
        let parsed = Harness::try_parse_from([
            "stock-widget",
            "--log-level",
            "debug",
            "--sentiment-timeout-ms",
            "1500",
            "--quotes-retries",
            "0",
        ])
        .unwrap();

        assert_eq!(parsed.config.log_level.as_deref(), Some("debug"));
        assert_eq!(parsed.config.sentiment_timeout_ms, Some(1500));
        assert_eq!(parsed.config.quotes_retries, Some(0));
    }
}
