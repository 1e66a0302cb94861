//! Current conditions for a location
//! https://open-meteo.com/en/docs

pub mod code;

use crate::config::Config;
use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;

/// Something that can report the weather right now
pub trait WeatherSource {
    fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<CurrentWeather>;
}

/// Gotta know weather or not it's gonna rain
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    /// WMO condition code, see [code::describe]
    #[serde(rename = "weathercode")]
    pub weather_code: i32,
}

/// Open-Meteo forecast API, asking for current conditions only
#[derive(Debug)]
pub struct WeatherClient {
    agent: ureq::Agent,
    url: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: agent(),
            url: config.forecast_url.clone(),
        }
    }
}

impl WeatherSource for WeatherClient {
    fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<CurrentWeather> {
        info!("Fetching current weather for ({latitude}, {longitude})");
        let response: ForecastResponse = self
            .agent
            .get(&self.url)
            .query("latitude", &latitude.to_string())
            .query("longitude", &longitude.to_string())
            .query("current_weather", "true")
            .call()
            .with_context(|| {
                format!("Error fetching weather from {}", self.url)
            })?
            .into_json()
            .context("Error parsing weather response as JSON")?;
        debug!("Current weather: {:?}", response.current_weather);
        Ok(response.current_weather)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

/// HTTP agent shared by the API clients. No timeout is set, a hung request
/// blocks until the server gives up.
pub(crate) fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .user_agent(concat!("weathervane/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    /// Fetch from a local server, on a blocking thread since ureq blocks
    async fn fetch(server: &MockServer) -> anyhow::Result<CurrentWeather> {
        let config = Config {
            forecast_url: format!("{}/v1/forecast", server.uri()),
            ..Config::default()
        };
        let client = WeatherClient::new(&config);
        tokio::task::spawn_blocking(move || client.fetch_current(48.85, 2.35))
            .await
            .unwrap()
    }

    #[test]
    fn test_parse() {
        let body = r#"{
            "latitude": 48.86,
            "longitude": 2.3399997,
            "generationtime_ms": 0.05,
            "current_weather_units": {
                "temperature": "°C",
                "windspeed": "km/h"
            },
            "current_weather": {
                "time": "2024-05-24T17:00",
                "interval": 900,
                "temperature": 18.0,
                "windspeed": 10.0,
                "winddirection": 250,
                "is_day": 1,
                "weathercode": 2
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.current_weather,
            CurrentWeather {
                temperature: 18.0,
                wind_speed: 10.0,
                weather_code: 2,
            }
        );
    }

    #[test]
    fn test_missing_current_weather() {
        let body = r#"{"error": true, "reason": "Latitude must be in range"}"#;
        assert!(serde_json::from_str::<ForecastResponse>(body).is_err());
    }

    #[tokio::test]
    async fn test_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "48.85"))
            .and(query_param("longitude", "2.35"))
            .and(query_param("current_weather", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": {
                    "temperature": 18.0,
                    "windspeed": 10.0,
                    "weathercode": 2
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            fetch(&server).await.unwrap(),
            CurrentWeather {
                temperature: 18.0,
                wind_speed: 10.0,
                weather_code: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_request_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(fetch(&server).await.is_err());
    }

    #[tokio::test]
    async fn test_request_missing_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": true, "reason": "bad"})),
            )
            .mount(&server)
            .await;
        assert!(fetch(&server).await.is_err());

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"latitude": 48.85})),
            )
            .mount(&server)
            .await;
        assert!(fetch(&server).await.is_err());
    }
}
