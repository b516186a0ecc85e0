//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The Open-Meteo lookup client (geocoding + current weather)
//! - Weather code descriptions
//! - Persisted user preferences (last city, theme)
//! - Shared domain models
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod lexicon;
pub mod model;
pub mod prefs;

pub use client::{LookupPhase, WeatherClient};
pub use lexicon::{describe, ConditionDescription};
pub use model::{CurrentConditions, LookupError, Place, WeatherReport};
pub use prefs::{PrefStore, Preferences, Theme};
