use std::{env, fmt, path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

use robinhood::DEFAULT_API_ENDPOINT;

const DEFAULT_INTERVAL_SECS: u64 = 10;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ACK_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// 시작 시 한 번 만들어서 클라이언트/퍼블리셔/스케줄러에 넘겨준다
#[derive(Clone)]
pub struct TrackerConfig {
    pub api_endpoint: Url,
    pub token: String,
    pub kafka_endpoint: String,
    pub producer_topic: String,
    pub interval: Duration,
    pub http_timeout: Duration,
    pub ack_timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("api_endpoint", &self.api_endpoint.as_str())
            .field("token", &"<redacted>")
            .field("kafka_endpoint", &self.kafka_endpoint)
            .field("producer_topic", &self.producer_topic)
            .field("interval", &self.interval)
            .field("http_timeout", &self.http_timeout)
            .field("ack_timeout", &self.ack_timeout)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl TrackerConfig {
    /// `.env`를 먼저 읽은 뒤 환경변수에서 설정을 만든다
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 빈 문자열은 설정되지 않은 것으로 본다
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let secs = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(key) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(0) => Err(ConfigError::Invalid {
                        name: key,
                        reason: "must be greater than zero".to_string(),
                    }),
                    Ok(v) => Ok(Duration::from_secs(v)),
                    Err(e) => Err(ConfigError::Invalid {
                        name: key,
                        reason: format!("{:?}: {}", raw, e),
                    }),
                },
            }
        };

        let endpoint =
            get("ROBINHOOD_API_ENDPOINT").unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        Ok(Self {
            api_endpoint: parse_endpoint(&endpoint)?,
            token: require("ROBINHOOD_TOKEN")?,
            kafka_endpoint: require("KAFKA_ENDPOINT")?,
            producer_topic: require("KAFKA_PRODUCER_TOPIC")?,
            interval: secs("TRACK_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?,
            http_timeout: secs("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            ack_timeout: secs("KAFKA_ACK_TIMEOUT_SECS", DEFAULT_ACK_TIMEOUT_SECS)?,
            log_dir: get("LOG_DIR").map(PathBuf::from),
        })
    }
}

/// `accounts/`가 하위 경로로 붙도록 항상 `/`로 끝나게 맞춘다
fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&with_slash).map_err(|e| ConfigError::Invalid {
        name: "ROBINHOOD_API_ENDPOINT",
        reason: format!("{:?}: {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("ROBINHOOD_TOKEN", "abc"),
        ("KAFKA_ENDPOINT", "localhost:9092"),
        ("KAFKA_PRODUCER_TOPIC", "portfolio-stats"),
    ];

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.api_endpoint.as_str(), "https://api.robinhood.com/");
        assert_eq!(config.token, "abc");
        assert_eq!(config.kafka_endpoint, "localhost:9092");
        assert_eq!(config.producer_topic, "portfolio-stats");
        assert_eq!(config.interval, Duration::from_secs(10));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.ack_timeout, Duration::from_secs(5));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("ROBINHOOD_API_ENDPOINT", "http://127.0.0.1:8080/api"),
            ("TRACK_INTERVAL_SECS", "60"),
            ("HTTP_TIMEOUT_SECS", " 3 "),
            ("LOG_DIR", "logs"),
        ]);

        let config = TrackerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.api_endpoint.as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(
            config.api_endpoint.join("accounts/").unwrap().as_str(),
            "http://127.0.0.1:8080/api/accounts/"
        );
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_missing_required() {
        for skip in ["ROBINHOOD_TOKEN", "KAFKA_ENDPOINT", "KAFKA_PRODUCER_TOPIC"] {
            let pairs: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != skip).collect();
            match TrackerConfig::from_lookup(lookup(&pairs)) {
                Err(ConfigError::Missing(name)) => assert_eq!(name, skip),
                other => panic!("expected Missing({}), got {:?}", skip, other),
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("KAFKA_ENDPOINT", "");

        let err = TrackerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("KAFKA_ENDPOINT")), "{err:?}");
    }

    #[test]
    fn test_invalid_interval() {
        for raw in ["ten", "0", "-1"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("TRACK_INTERVAL_SECS", raw));

            let err = TrackerConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: "TRACK_INTERVAL_SECS", .. }),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TrackerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("abc"));
        assert!(debug.contains("<redacted>"));
    }
}
