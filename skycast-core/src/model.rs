use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A place resolved by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Display label, e.g. "London, United Kingdom". The country segment is
    /// omitted when the geocoder returned none.
    pub fn label(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Instantaneous weather observation for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: Option<f64>,
    /// WMO weather code, see `lexicon::describe`.
    pub weather_code: i32,
    pub observed_at: DateTime<Utc>,
}

/// Successful outcome of one lookup: the resolved place together with its
/// current conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub place: Place,
    pub current: CurrentConditions,
}

/// Everything that can go wrong during a lookup. Each variant renders as the
/// status message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The city was empty after trimming; no request was issued.
    #[error("Enter a city")]
    InvalidInput,

    /// The geocoding exchange failed (send error, bad status, or an
    /// undecodable body).
    #[error("Geocoding failed: {0}")]
    GeocodeTransport(String),

    /// The geocoder answered with an empty result set.
    #[error("City not found")]
    CityNotFound,

    /// The forecast exchange failed.
    #[error("Weather fetch failed: {0}")]
    ForecastTransport(String),

    /// The forecast response carried no current-conditions block.
    #[error("No current weather data")]
    ForecastDataMissing,
}
