//! Human-readable descriptions for WMO weather interpretation codes.

use std::borrow::Cow;
use std::fmt;

/// Text and optional pictogram for a weather code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionDescription {
    pub text: Cow<'static, str>,
    pub pictogram: Option<&'static str>,
}

impl fmt::Display for ConditionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pictogram {
            Some(pictogram) => write!(f, "{pictogram} {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Describe a WMO weather code. Codes outside the table fall back to a
/// literal `Weather code N` with no pictogram.
pub fn describe(code: i32) -> ConditionDescription {
    match entry(code) {
        Some((text, pictogram)) => ConditionDescription {
            text: Cow::Borrowed(text),
            pictogram: Some(pictogram),
        },
        None => ConditionDescription {
            text: Cow::Owned(format!("Weather code {code}")),
            pictogram: None,
        },
    }
}

/// WMO interpretation codes as published with the Open-Meteo forecast docs.
fn entry(code: i32) -> Option<(&'static str, &'static str)> {
    let entry = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Drizzle: Light", "🌦️"),
        53 => ("Drizzle: Moderate", "🌦️"),
        55 => ("Drizzle: Dense", "🌧️"),
        56 => ("Freezing drizzle: Light", "🌧️"),
        57 => ("Freezing drizzle: Dense", "🌧️"),
        61 => ("Rain: Slight", "🌧️"),
        63 => ("Rain: Moderate", "🌧️"),
        65 => ("Rain: Heavy", "🌧️"),
        66 => ("Freezing rain: Light", "🌧️"),
        67 => ("Freezing rain: Heavy", "🌧️"),
        71 => ("Snow fall: Slight", "❄️"),
        73 => ("Snow fall: Moderate", "❄️"),
        75 => ("Snow fall: Heavy", "❄️"),
        77 => ("Snow grains", "❄️"),
        80 => ("Rain showers: Slight", "🌧️"),
        81 => ("Rain showers: Moderate", "🌧️"),
        82 => ("Violent rain showers", "🌧️"),
        85 => ("Snow showers: Slight", "❄️"),
        86 => ("Snow showers: Heavy", "❄️"),
        95 => ("Thunderstorm: Slight or moderate", "⛈️"),
        96 => ("Thunderstorm with slight hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_text_and_pictogram() {
        let clear = describe(0);
        assert_eq!(clear.text, "Clear sky");
        assert_eq!(clear.pictogram, Some("☀️"));

        let overcast = describe(3);
        assert_eq!(overcast.text, "Overcast");
        assert_eq!(overcast.pictogram, Some("☁️"));

        let storm = describe(95);
        assert_eq!(storm.text, "Thunderstorm: Slight or moderate");
        assert_eq!(storm.pictogram, Some("⛈️"));
    }

    #[test]
    fn unknown_code_falls_back_to_numeric_text() {
        let unknown = describe(999);
        assert_eq!(unknown.text, "Weather code 999");
        assert_eq!(unknown.pictogram, None);
    }

    #[test]
    fn display_prefixes_pictogram_when_present() {
        assert_eq!(describe(3).to_string(), "☁️ Overcast");
        assert_eq!(describe(999).to_string(), "Weather code 999");
    }
}
