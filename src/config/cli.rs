use crate::config::toml_config::TomlConfig;
use crate::config::{
    usable_key, validate_settings, DEFAULT_CACHE_FILE, DEFAULT_GEOCODE_ENDPOINT, DEFAULT_INPUT,
    DEFAULT_MAPS_KEY_FILE, DEFAULT_PROFILE_ENDPOINT,
};
use crate::core::ConfigProvider;
use crate::domain::model::EventSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

/// Command line options. Anything not given falls back to the TOML file
/// (`--config`), then to the built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "roster-etl")]
#[command(about = "Summarise the musicians confirmed for an event from a saved roster page")]
pub struct CliConfig {
    /// Saved roster page
    #[arg(short, long)]
    pub input: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// City → country cache file
    #[arg(long)]
    pub cache_file: Option<String>,

    /// Start with an empty cache when the cache file does not exist
    #[arg(long)]
    pub init_cache: bool,

    /// File holding the geocoding API key
    #[arg(long)]
    pub maps_key_file: Option<String>,

    #[arg(long)]
    pub host_country: Option<String>,

    /// Number of places at the event
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Never request musician profiles from the event site
    #[arg(long)]
    pub no_site_hits: bool,

    #[arg(long)]
    pub profile_endpoint: Option<String>,

    #[arg(long)]
    pub geocode_endpoint: Option<String>,

    /// Print every musician before the summary
    #[arg(long)]
    pub print_band: bool,

    /// Write the final roster to this CSV file
    #[arg(long)]
    pub export_csv: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(skip)]
    pub file: Option<TomlConfig>,
}

impl CliConfig {
    /// Attach a loaded TOML configuration as the fallback layer.
    pub fn with_file_config(mut self, file: TomlConfig) -> Self {
        self.file = Some(file);
        self
    }

    fn file_value<'a, T: ?Sized>(
        &'a self,
        pick: impl FnOnce(&'a TomlConfig) -> Option<&'a T>,
    ) -> Option<&'a T> {
        self.file.as_ref().and_then(pick)
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input
            .as_deref()
            .or_else(|| self.file_value(|f| f.source.input.as_deref()))
            .unwrap_or(DEFAULT_INPUT)
    }

    fn cache_path(&self) -> &str {
        self.cache_file
            .as_deref()
            .or_else(|| self.file_value(|f| f.cache.path.as_deref()))
            .unwrap_or(DEFAULT_CACHE_FILE)
    }

    fn create_cache(&self) -> bool {
        self.init_cache || self.file.as_ref().is_some_and(|f| f.create_cache())
    }

    fn maps_key_path(&self) -> &str {
        self.maps_key_file
            .as_deref()
            .or_else(|| self.file_value(|f| f.geocoding.key_file.as_deref()))
            .unwrap_or(DEFAULT_MAPS_KEY_FILE)
    }

    fn maps_key(&self) -> Option<&str> {
        usable_key(self.file_value(|f| f.geocoding.key.as_deref()))
    }

    fn allow_site_hits(&self) -> bool {
        !self.no_site_hits && self.file.as_ref().map_or(true, |f| f.allow_site_hits())
    }

    fn profile_endpoint(&self) -> &str {
        self.profile_endpoint
            .as_deref()
            .or_else(|| self.file_value(|f| f.source.profile_endpoint.as_deref()))
            .unwrap_or(DEFAULT_PROFILE_ENDPOINT)
    }

    fn geocode_endpoint(&self) -> &str {
        self.geocode_endpoint
            .as_deref()
            .or_else(|| self.file_value(|f| f.geocoding.endpoint.as_deref()))
            .unwrap_or(DEFAULT_GEOCODE_ENDPOINT)
    }

    fn export_csv(&self) -> Option<&str> {
        self.export_csv
            .as_deref()
            .or_else(|| self.file_value(|f| f.source.export_csv.as_deref()))
    }

    fn event(&self) -> EventSettings {
        let mut event = self
            .file
            .as_ref()
            .map(TomlConfig::event_settings)
            .unwrap_or_default();
        if let Some(host_country) = &self.host_country {
            event.host_country = host_country.clone();
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        event
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
