use anyhow::{anyhow, Result};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CHANNEL: &str = "chat";
const DEFAULT_CHANNEL_CAPACITY: usize = 256;
const DEFAULT_HISTORY_LIMIT: usize = 500;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub channel: String,
    pub channel_capacity: usize,
    pub history_limit: usize,
    pub cors: bool,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            channel: DEFAULT_CHANNEL.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            cors: false,
            log_dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            port: parse_or(&lookup, "CHAT_PORT", defaults.port)?,
            channel: lookup("CHAT_CHANNEL").unwrap_or(defaults.channel),
            channel_capacity: parse_or(
                &lookup,
                "CHAT_CHANNEL_CAPACITY",
                defaults.channel_capacity,
            )?,
            history_limit: parse_or(&lookup, "CHAT_HISTORY_LIMIT", defaults.history_limit)?,
            cors: parse_or(&lookup, "CHAT_CORS", defaults.cors)?,
            log_dir: lookup("LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.channel, "chat");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CHAT_PORT", "9000"),
            ("CHAT_CHANNEL", "lobby"),
            ("CHAT_CHANNEL_CAPACITY", "32"),
            ("CHAT_HISTORY_LIMIT", " 10 "),
            ("CHAT_CORS", "true"),
            ("LOG_DIR", "/tmp/chat-logs"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.channel, "lobby");
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.history_limit, 10);
        assert!(config.cors);
        assert_eq!(config.log_dir, "/tmp/chat-logs");
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("CHAT_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("CHAT_PORT"));

        let err = Config::from_lookup(lookup_from(&[("CHAT_CORS", "yes")])).unwrap_err();
        assert!(err.to_string().contains("CHAT_CORS"));
    }
}
