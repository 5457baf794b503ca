use crate::lookup;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub lookup: LookupSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ipviz")
            .join("config.toml")
    }

    pub fn endpoint(&self) -> String {
        self.lookup
            .endpoint
            .clone()
            .unwrap_or_else(|| lookup::DEFAULT_ENDPOINT.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.lookup
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(lookup::DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.endpoint(), lookup::DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout(), lookup::DEFAULT_TIMEOUT);
    }

    #[test]
    fn overrides_are_honored() {
        let settings: Settings = toml::from_str(
            r#"
            [lookup]
            endpoint = "http://localhost:8080/json/"
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(settings.endpoint(), "http://localhost:8080/json/");
        assert_eq!(settings.timeout(), Duration::from_secs(3));
    }
}
