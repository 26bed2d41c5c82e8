use crate::domain::model::ProfileDetails;
use crate::domain::ports::{Geocoder, ProfileSource};
use crate::parser::parse_profile;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Per-musician profile fragment on the event site.
pub struct HttpProfileSource {
    client: Client,
    endpoint: String,
    lang: String,
}

impl HttpProfileSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            lang: "en".to_string(),
        }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self, musician_id: u64) -> Result<ProfileDetails> {
        tracing::debug!("Fetching profile {} from {}", musician_id, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("idMusicista", musician_id.to_string()),
                ("lang", self.lang.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Profile response status: {}", status);
        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        Ok(parse_profile(&body))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

impl GeocodeResponse {
    /// `long_name` of the country component of the first (most relevant) result.
    fn country(&self) -> Option<String> {
        self.results
            .first()?
            .address_components
            .iter()
            .find(|component| component.types.iter().any(|t| t == "country"))
            .and_then(|component| component.long_name.clone())
    }
}

/// Google Maps geocoding API.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    key: String,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn lookup_country(&self, city: &str) -> Result<Option<String>> {
        tracing::debug!("Geocoding '{}'", city);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.key.as_str()), ("address", city)])
            .send()
            .await
            .map_err(|e| EtlError::ApiError(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            // 不要把金鑰寫進錯誤訊息
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let geocode: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| EtlError::ApiError(e.without_url()))?;
        Ok(geocode.country())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn london_response() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {
                    "address_components": [
                        {"long_name": "London", "short_name": "London", "types": ["locality", "political"]},
                        {"long_name": "United Kingdom", "short_name": "GB", "types": ["country", "political"]}
                    ]
                },
                {
                    "address_components": [
                        {"long_name": "Canada", "short_name": "CA", "types": ["country", "political"]}
                    ]
                }
            ],
            "status": "OK"
        })
    }

    #[tokio::test]
    async fn test_geocoder_returns_first_result_country() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/geocode/json")
                .query_param("key", "secret")
                .query_param("address", "London");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(london_response());
        });

        let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), "secret");
        let country = geocoder.lookup_country("London").await.unwrap();

        api_mock.assert();
        assert_eq!(country.as_deref(), Some("United Kingdom"));
    }

    #[tokio::test]
    async fn test_geocoder_zero_results() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/geocode/json");
            then.status(200)
                .json_body(serde_json::json!({"results": [], "status": "ZERO_RESULTS"}));
        });

        let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), "secret");
        let country = geocoder.lookup_country("Atlantis").await.unwrap();

        api_mock.assert();
        assert_eq!(country, None);
    }

    #[tokio::test]
    async fn test_geocoder_error_status_hides_key() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/geocode/json");
            then.status(500);
        });

        let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), "secret");
        let err = geocoder.lookup_country("London").await.unwrap_err();

        assert!(matches!(err, EtlError::HttpStatusError { status: 500, .. }));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_geocoder_transport_error_hides_key() {
        // 沒有服務在此埠上監聽
        let geocoder = GoogleGeocoder::new("http://127.0.0.1:9/geocode/json", "SECRETKEY123");
        let err = geocoder.lookup_country("London").await.unwrap_err();

        assert!(matches!(err, EtlError::ApiError(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn test_geocoder_malformed_body_hides_key() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/geocode/json");
            then.status(200).body("not json");
        });

        let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), "SECRETKEY123");
        let err = geocoder.lookup_country("London").await.unwrap_err();

        assert!(matches!(err, EtlError::ApiError(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn test_profile_source_parses_fragment() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/load_dati_musicista.php")
                .query_param("idMusicista", "42")
                .query_param("lang", "en");
            then.status(200).body(
                r#"<h2 class="sezione-head">Carla</h2>
                   <div class="col-12"><p>Cesena (Italy)</p></div>
                   <big>Voice</big>"#,
            );
        });

        let source = HttpProfileSource::new(server.url("/load_dati_musicista.php"));
        let profile = source.fetch_profile(42).await.unwrap();

        api_mock.assert();
        assert_eq!(profile.name.as_deref(), Some("Carla"));
        assert_eq!(profile.city.as_deref(), Some("Cesena"));
        assert_eq!(profile.country.as_deref(), Some("Italy"));
        assert_eq!(profile.instrument.as_deref(), Some("Voice"));
    }

    #[tokio::test]
    async fn test_profile_source_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/load_dati_musicista.php");
            then.status(404);
        });

        let source = HttpProfileSource::new(server.url("/load_dati_musicista.php"));
        let err = source.fetch_profile(7).await.unwrap_err();

        assert!(matches!(err, EtlError::HttpStatusError { status: 404, .. }));
    }
}
