//! Open-Meteo geocoding integration
//!
//! Resolves a free-text place name to coordinates using the Open-Meteo
//! geocoding API (<https://open-meteo.com/en/docs/geocoding-api>).

pub mod client;
mod models;

pub use client::{Geocoder, GeocodingConfig, GeocodingError, OpenMeteoGeocoder};
pub use models::Place;
