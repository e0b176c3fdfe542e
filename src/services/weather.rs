use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;

/// Current air temperature for a city.
///
/// Implementations never fail: any error (network, unknown city, non-2xx)
/// is logged and reported as `None`.
#[async_trait]
pub trait TemperatureProvider: Send + Sync {
    async fn current_temperature(&self, city: &str) -> Option<f64>;
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: Option<MainReadings>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
}

/// OpenWeatherMap "current weather" endpoint, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.weather_api_url.clone(),
            api_key: config.weather_api_key.clone(),
        })
    }

    async fn fetch(&self, city: &str) -> Result<Option<f64>, anyhow::Error> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Weather API error {}", response.status());
        }

        let payload: CurrentWeather = response.json().await?;
        Ok(temperature_of(payload))
    }
}

fn temperature_of(payload: CurrentWeather) -> Option<f64> {
    payload
        .main
        .and_then(|m| m.temp)
        .filter(|t| t.is_finite())
}

#[async_trait]
impl TemperatureProvider for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        match self.fetch(city).await {
            Ok(temperature) => {
                tracing::debug!(city = %city, temperature = ?temperature, "Fetched temperature");
                temperature
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Temperature lookup failed");
                None
            }
        }
    }
}
