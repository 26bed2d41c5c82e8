use crate::domain::model::{EventSettings, MusicianRecord, ProfileDetails, RosterEntry, RunReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn cache_path(&self) -> &str;
    /// Start from an empty cache when the cache file does not exist yet.
    fn create_cache(&self) -> bool;
    fn maps_key_path(&self) -> &str;
    /// Key given directly in configuration, preferred over the key file.
    fn maps_key(&self) -> Option<&str> {
        None
    }
    fn allow_site_hits(&self) -> bool;
    fn profile_endpoint(&self) -> &str;
    fn geocode_endpoint(&self) -> &str;
    fn export_csv(&self) -> Option<&str>;
    fn event(&self) -> EventSettings;
}

/// Per-musician profile page source.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, musician_id: u64) -> Result<ProfileDetails>;
}

/// Geocoding lookup: `Ok(None)` means the service answered but knows no country.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup_country(&self, city: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait Pipeline: Send {
    async fn extract(&mut self) -> Result<Vec<RosterEntry>>;
    async fn transform(&mut self, entries: Vec<RosterEntry>) -> Result<Vec<MusicianRecord>>;
    async fn load(&mut self, roster: Vec<MusicianRecord>) -> Result<RunReport>;
}
