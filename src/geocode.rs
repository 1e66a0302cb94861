//! Resolve a city name to coordinates
//! https://open-meteo.com/en/docs/geocoding-api

use crate::{config::Config, weather};
use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;

/// Something that can look up a place by name
pub trait Geocoder {
    /// Find the best match for a city name. `Ok(None)` means the service
    /// answered but knows no such place.
    fn resolve(&self, city: &str) -> anyhow::Result<Option<GeoResult>>;
}

/// Canonical name and location of a place
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Open-Meteo geocoding search
#[derive(Debug)]
pub struct GeocodingClient {
    agent: ureq::Agent,
    url: String,
    language: String,
}

impl GeocodingClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: weather::agent(),
            url: config.geocoding_url.clone(),
            language: config.language.clone(),
        }
    }
}

impl Geocoder for GeocodingClient {
    fn resolve(&self, city: &str) -> anyhow::Result<Option<GeoResult>> {
        info!("Geocoding `{city}`");
        let response: GeocodingResponse = self
            .agent
            .get(&self.url)
            .query("name", city)
            .query("count", "1")
            .query("language", &self.language)
            .query("format", "json")
            .call()
            .with_context(|| format!("Error geocoding `{city}`"))?
            .into_json()
            .context("Error parsing geocoding response as JSON")?;
        let result = response.first();
        debug!("Geocoded `{city}` to {result:?}");
        Ok(result)
    }
}

/// The service omits `results` entirely when nothing matches
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

impl GeocodingResponse {
    fn first(self) -> Option<GeoResult> {
        self.results?.into_iter().next()
    }
}
