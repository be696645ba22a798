//! Geocoding data models

use std::fmt;

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Coordinates of the place
    #[serde(flatten)]
    pub location: GeoLocation,
    /// Canonical name as spelled by the provider
    pub name: String,
    /// Country name, empty when the provider has none
    #[serde(default)]
    pub country: String,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}, {}", self.name, self.country)
        }
    }
}

/// Raw search response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

impl SearchResponse {
    /// First candidate in provider order
    pub(crate) fn into_first(self) -> Option<Place> {
        self.results?.into_iter().next().map(SearchResult::into_place)
    }
}

/// One raw search candidate
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl SearchResult {
    fn into_place(self) -> Place {
        Place {
            location: GeoLocation::new(self.latitude, self.longitude),
            name: self.name,
            country: self.country.unwrap_or_default(),
        }
    }
}
