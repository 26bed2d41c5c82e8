use crate::adapters::{GoogleGeocoder, HttpProfileSource};
use crate::core::location_cache::LocationCache;
use crate::core::resolver::CountryResolver;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{MusicianRecord, RosterEntry, RunReport};
use crate::domain::ports::{Geocoder, ProfileSource};
use crate::parser::extract_roster;
use crate::report::export::roster_to_csv;
use crate::report::RosterSummary;
use crate::utils::error::{EtlError, Result};

/// Roster page → enriched musician records → summary.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    cache: LocationCache,
    profiles: Option<Box<dyn ProfileSource>>,
    resolver: CountryResolver,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    /// 載入城市快取與地圖金鑰，並建立 HTTP 客戶端
    pub async fn open(storage: S, config: C) -> Result<Self> {
        let cache = if config.create_cache() {
            LocationCache::load_or_default(&storage, config.cache_path()).await?
        } else {
            LocationCache::load(&storage, config.cache_path()).await?
        };
        tracing::info!("🗺️ {} cities in the location cache", cache.len());

        let geocoder = load_maps_key(&storage, &config).await.map(|key| {
            Box::new(GoogleGeocoder::new(config.geocode_endpoint(), key)) as Box<dyn Geocoder>
        });

        let profiles = if config.allow_site_hits() {
            Some(Box::new(HttpProfileSource::new(config.profile_endpoint())) as Box<dyn ProfileSource>)
        } else {
            tracing::info!("🚫 Profile lookups on the event site are disabled");
            None
        };

        Ok(Self {
            storage,
            config,
            cache,
            profiles,
            resolver: CountryResolver::new(geocoder),
        })
    }

    pub fn with_geocoder(mut self, geocoder: Option<Box<dyn Geocoder>>) -> Self {
        self.resolver = CountryResolver::new(geocoder);
        self
    }

    pub fn with_profile_source(mut self, profiles: Option<Box<dyn ProfileSource>>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }
}

/// Geocoding key from configuration, else from the key file. Missing key → no geocoding.
async fn load_maps_key<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Option<String> {
    if let Some(key) = config.maps_key() {
        return Some(key.to_string());
    }

    let path = config.maps_key_path();
    match storage.read_file(path).await {
        Ok(bytes) => {
            let key = String::from_utf8_lossy(&bytes).trim().to_string();
            if key.is_empty() {
                tracing::warn!("🔑 {} is empty - proceeding without API access...", path);
                None
            } else {
                Some(key)
            }
        }
        Err(e) => {
            tracing::warn!("🔑 No {} file found - proceeding without API access... ({})", path, e);
            None
        }
    }
}

/// City and country from the profile page; a failed fetch leaves both unknown.
async fn fetch_location(
    profiles: &dyn ProfileSource,
    cache: &mut LocationCache,
    musician_id: u64,
) -> (Option<String>, Option<String>) {
    match profiles.fetch_profile(musician_id).await {
        Ok(profile) => {
            tracing::debug!(
                "Profile {}: {:?} ({:?})",
                musician_id,
                profile.name,
                profile.instrument
            );
            if let (Some(city), Some(country)) = (&profile.city, &profile.country) {
                if cache.seed(city, country) {
                    tracing::debug!("Learned {} → {} from profile", city, country);
                }
            }
            (profile.city, profile.country)
        }
        Err(e) => {
            tracing::warn!("⚠️ Profile {} unavailable: {}", musician_id, e);
            (None, None)
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn extract(&mut self) -> Result<Vec<RosterEntry>> {
        let path = self.config.input_path();
        tracing::info!("📄 Reading roster page from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        let page = String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("{} is not valid UTF-8: {}", path, e),
        })?;

        let entries = extract_roster(&page);
        if entries.is_empty() {
            tracing::warn!("No musicians found in {}", path);
        }
        Ok(entries)
    }

    async fn transform(&mut self, entries: Vec<RosterEntry>) -> Result<Vec<MusicianRecord>> {
        let mut roster = Vec::with_capacity(entries.len());
        let mut profile_fetches = 0;

        for entry in entries {
            let (town, country) = match (entry.town, self.profiles.as_deref()) {
                // 主頁面沒有城市時才查個人頁，減少對網站的請求
                (None, Some(profiles)) => {
                    profile_fetches += 1;
                    fetch_location(profiles, &mut self.cache, entry.id).await
                }
                (town, _) => {
                    let country = self.resolver.resolve(&mut self.cache, town.as_deref()).await;
                    (town, country)
                }
            };

            tracing::debug!(
                "{} ({}): {:?}, {:?}",
                entry.name,
                entry.category,
                town,
                country
            );
            roster.push(MusicianRecord {
                category: entry.category,
                name: entry.name,
                town,
                country,
            });
        }

        tracing::info!(
            "🎶 Reconciled {} musicians ({} profile fetches, {} cache hits, {} cache misses)",
            roster.len(),
            profile_fetches,
            self.cache.hits(),
            self.cache.misses()
        );
        Ok(roster)
    }

    async fn load(&mut self, roster: Vec<MusicianRecord>) -> Result<RunReport> {
        self.cache
            .save(&self.storage, self.config.cache_path())
            .await?;
        tracing::info!(
            "💾 Saved {} cities to {}{}",
            self.cache.len(),
            self.config.cache_path(),
            if self.cache.is_dirty() { "" } else { " (unchanged)" }
        );

        let export_path = match self.config.export_csv() {
            Some(path) => {
                let data = roster_to_csv(&roster)?;
                self.storage.write_file(path, &data).await?;
                tracing::info!("📁 Roster exported to: {}", path);
                Some(path.to_string())
            }
            None => None,
        };

        let summary = RosterSummary::from_roster(&roster, &self.config.event());
        Ok(RunReport {
            roster,
            summary,
            export_path,
        })
    }
}
