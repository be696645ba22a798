//! Weather data models
//!
//! Public result types plus the raw Open-Meteo payload they are decoded from.

use serde::{Deserialize, Serialize};

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub windspeed: f64,
    /// Observation time as reported by the provider (local, ISO 8601-like)
    pub time: String,
}

impl CurrentWeather {
    /// Get a plain-text summary of current conditions
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Temperature: {:.1}°C, wind {:.1} km/h (observed {})",
            self.temperature, self.windspeed, self.time
        )
    }
}

/// One day of a daily forecast
///
/// Metrics are `None` when the provider sent fewer values than dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Forecast date (`YYYY-MM-DD`)
    pub date: String,
    /// Maximum temperature in Celsius
    pub temp_max: Option<f64>,
    /// Minimum temperature in Celsius
    pub temp_min: Option<f64>,
    /// Maximum precipitation probability in percent
    #[serde(rename = "precip_prob")]
    pub precip_probability: Option<f64>,
}

impl ForecastDay {
    /// Get a plain-text summary of the day
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: high {}, low {}, chance of precipitation {}",
            self.date,
            fmt_metric(self.temp_max, "°C"),
            fmt_metric(self.temp_min, "°C"),
            fmt_metric(self.precip_probability, "%"),
        )
    }
}

fn fmt_metric(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}{unit}"))
}

/// Daily forecast in date order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
}

impl Forecast {
    /// Get today's forecast
    #[must_use]
    pub fn today(&self) -> Option<&ForecastDay> {
        self.days.first()
    }

    /// One summary line per day
    #[must_use]
    pub fn summary(&self) -> String {
        self.days
            .iter()
            .map(ForecastDay::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Raw `current_weather` block
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CurrentWeatherData {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub time: Option<String>,
}

impl CurrentWeatherData {
    /// Convert into [`CurrentWeather`]; `None` when the block carries no readings
    pub(crate) fn into_current(self) -> Option<CurrentWeather> {
        Some(CurrentWeather {
            temperature: self.temperature?,
            windspeed: self.windspeed?,
            time: self.time.unwrap_or_default(),
        })
    }
}

/// Raw `daily` block: parallel arrays keyed by metric
///
/// Arrays may be missing, `null`, shorter than `time`, or contain `null`
/// elements. [`DailySeries::into_days`] is the one place that turns this into
/// records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<f64>>>,
}

impl DailySeries {
    /// Number of dates in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assemble at most `limit` records, one per date.
    ///
    /// A metric array that is shorter than `time` yields `None` for the
    /// missing positions.
    #[must_use]
    pub fn into_days(self, limit: usize) -> Vec<ForecastDay> {
        let time = self.time.unwrap_or_default();
        let tmax = self.temperature_2m_max.unwrap_or_default();
        let tmin = self.temperature_2m_min.unwrap_or_default();
        let rain = self.precipitation_probability_max.unwrap_or_default();

        time.into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, date)| ForecastDay {
                date,
                temp_max: tmax.get(i).copied().flatten(),
                temp_min: tmin.get(i).copied().flatten(),
                precip_probability: rain.get(i).copied().flatten(),
            })
            .collect()
    }
}

/// Raw API response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeatherData>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
}
