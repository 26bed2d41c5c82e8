use crate::config::{
    usable_key, validate_settings, DEFAULT_CACHE_FILE, DEFAULT_GEOCODE_ENDPOINT, DEFAULT_INPUT,
    DEFAULT_MAPS_KEY_FILE, DEFAULT_PROFILE_ENDPOINT,
};
use crate::core::ConfigProvider;
use crate::domain::model::EventSettings;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventConfig {
    pub host_country: Option<String>,
    pub capacity: Option<usize>,
    pub local_share: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input: Option<String>,
    pub allow_site_hits: Option<bool>,
    pub profile_endpoint: Option<String>,
    pub export_csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub key_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub path: Option<String>,
    pub create_if_missing: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAPS_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use once_cell::sync::Lazy;
        use regex::Regex;
        static ENV_VAR: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Event settings, with defaults for anything left out.
    pub fn event_settings(&self) -> EventSettings {
        let defaults = EventSettings::default();
        EventSettings {
            host_country: self
                .event
                .host_country
                .clone()
                .unwrap_or(defaults.host_country),
            capacity: self.event.capacity.unwrap_or(defaults.capacity),
            local_share: self.event.local_share.unwrap_or(defaults.local_share),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.source.input.as_deref().unwrap_or(DEFAULT_INPUT)
    }

    fn cache_path(&self) -> &str {
        self.cache.path.as_deref().unwrap_or(DEFAULT_CACHE_FILE)
    }

    fn create_cache(&self) -> bool {
        self.cache.create_if_missing.unwrap_or(false)
    }

    fn maps_key_path(&self) -> &str {
        self.geocoding
            .key_file
            .as_deref()
            .unwrap_or(DEFAULT_MAPS_KEY_FILE)
    }

    fn maps_key(&self) -> Option<&str> {
        usable_key(self.geocoding.key.as_deref())
    }

    fn allow_site_hits(&self) -> bool {
        self.source.allow_site_hits.unwrap_or(true)
    }

    fn profile_endpoint(&self) -> &str {
        self.source
            .profile_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_PROFILE_ENDPOINT)
    }

    fn geocode_endpoint(&self) -> &str {
        self.geocoding
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEOCODE_ENDPOINT)
    }

    fn export_csv(&self) -> Option<&str> {
        self.source.export_csv.as_deref()
    }

    fn event(&self) -> EventSettings {
        self.event_settings()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
