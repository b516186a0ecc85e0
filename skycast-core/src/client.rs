use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{CurrentConditions, LookupError, Place, WeatherReport};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Stage of a lookup, reported just before the matching request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Geocoding,
    FetchingForecast,
}

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_endpoints(GEOCODING_URL, FORECAST_URL)
    }

    /// Client over custom endpoints instead of the public Open-Meteo hosts.
    pub fn with_endpoints(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    /// Look up the current weather for a city by name.
    ///
    /// Resolves the city to coordinates first, then fetches the current
    /// conditions there. Surrounding whitespace in the name is ignored; a
    /// blank name fails without touching the network.
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport, LookupError> {
        self.lookup_with(city, |_| {}).await
    }

    /// Same as [`lookup`](Self::lookup), reporting each phase to `on_phase`
    /// before its request is sent.
    pub async fn lookup_with(
        &self,
        city: &str,
        mut on_phase: impl FnMut(LookupPhase),
    ) -> Result<WeatherReport, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        on_phase(LookupPhase::Geocoding);
        let place = self.geocode(city).await?;
        tracing::debug!(
            "resolved '{}' to {}, {}",
            city,
            place.latitude,
            place.longitude
        );

        on_phase(LookupPhase::FetchingForecast);
        let current = self
            .current_conditions(place.latitude, place.longitude)
            .await?;

        Ok(WeatherReport { place, current })
    }

    async fn geocode(&self, city: &str) -> Result<Place, LookupError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await
            .map_err(|err| LookupError::GeocodeTransport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::GeocodeTransport(status.to_string()));
        }

        let parsed: GeocodingResponse = res
            .json()
            .await
            .map_err(|err| LookupError::GeocodeTransport(err.to_string()))?;

        let hit = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(LookupError::CityNotFound)?;

        Ok(Place {
            name: hit.name,
            country: hit.country,
            latitude: hit.latitude,
            longitude: hit.longitude,
        })
    }

    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, LookupError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("temperature_unit", "celsius"),
                ("windspeed_unit", "ms"),
                ("timeformat", "unixtime"),
            ])
            .send()
            .await
            .map_err(|err| LookupError::ForecastTransport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::ForecastTransport(status.to_string()));
        }

        let parsed: ForecastResponse = res
            .json()
            .await
            .map_err(|err| LookupError::ForecastTransport(err.to_string()))?;

        let payload = parsed
            .current_weather
            .ok_or(LookupError::ForecastDataMissing)?;

        Ok(CurrentConditions {
            temperature_c: payload.temperature,
            wind_speed_mps: payload.windspeed,
            wind_direction_deg: payload.winddirection,
            weather_code: payload.weathercode,
            observed_at: DateTime::from_timestamp(payload.time, 0).unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingHit {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherPayload>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    temperature: f64,
    windspeed: f64,
    winddirection: Option<f64>,
    weathercode: i32,
    time: i64,
}
