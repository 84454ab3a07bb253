//! Environment configuration.

use anyhow::Result;

use crate::error::CliError;
use crate::output::OutputFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("NOMEN_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        let log_json = lookup("NOMEN_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let format = match lookup("NOMEN_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|_| CliError::InvalidFormat(value.clone()))?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            log_level,
            log_json,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(!config.log_json);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("NOMEN_LOG_LEVEL", "debug"),
            ("NOMEN_LOG_JSON", "TRUE"),
            ("NOMEN_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Config::from_lookup(lookup(&[("NOMEN_FORMAT", "yaml")])).is_err());
    }
}
