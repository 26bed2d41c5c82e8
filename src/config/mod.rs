#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_at_least, validate_endpoint, validate_extension, validate_non_empty, validate_path,
    validate_share,
};

pub const DEFAULT_INPUT: &str = "input.html";
pub const DEFAULT_CACHE_FILE: &str = "countries.json";
pub const DEFAULT_MAPS_KEY_FILE: &str = "maps.key";
pub const DEFAULT_PROFILE_ENDPOINT: &str =
    "https://legacy-app.rockin1000.com/shared/load_dati_musicista.php";
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// 檢查任何設定來源的共同規則
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input", config.input_path())?;
    validate_path("cache_file", config.cache_path())?;
    validate_path("maps_key_file", config.maps_key_path())?;
    validate_endpoint("profile_endpoint", config.profile_endpoint())?;
    validate_endpoint("geocode_endpoint", config.geocode_endpoint())?;

    if let Some(path) = config.export_csv() {
        validate_path("export_csv", path)?;
        validate_extension("export_csv", path, &["csv"])?;
    }

    let event = config.event();
    validate_non_empty("host_country", &event.host_country)?;
    validate_at_least("capacity", event.capacity, 1)?;
    validate_share("local_share", event.local_share)?;

    Ok(())
}

/// A key that still reads `${VAR}` came from an unset environment variable.
pub(crate) fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && !(k.starts_with("${") && k.ends_with('}')))
}
