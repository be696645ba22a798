//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Provides current conditions and short daily forecasts for a coordinate
//! without requiring an API key.

pub mod client;
mod models;

pub use client::{
    DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS, OpenMeteoClient, WeatherClient, WeatherConfig,
    WeatherError,
};
pub use models::{CurrentWeather, DailySeries, Forecast, ForecastDay};
