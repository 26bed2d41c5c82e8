use crate::core::location_cache::LocationCache;
use crate::domain::ports::Geocoder;

/// Country lookup for a town: cache first, geocoding on a miss.
pub struct CountryResolver {
    geocoder: Option<Box<dyn Geocoder>>,
}

impl CountryResolver {
    /// Without a geocoder only cached cities can be resolved.
    pub fn new(geocoder: Option<Box<dyn Geocoder>>) -> Self {
        Self { geocoder }
    }

    pub fn can_geocode(&self) -> bool {
        self.geocoder.is_some()
    }

    pub async fn resolve(&self, cache: &mut LocationCache, city: Option<&str>) -> Option<String> {
        let city = city?;

        let Some(geocoder) = &self.geocoder else {
            return cache.lookup(city).flatten();
        };

        match cache
            .get_or_resolve(city, || geocoder.lookup_country(city))
            .await
        {
            Ok(country) => country,
            Err(e) => {
                tracing::warn!("⚠️ Could not geocode '{}': {}", city, e);
                None
            }
        }
    }
}
