//! Immutable airport catalog with case-insensitive IATA/ICAO lookup.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Location;

/// Stable internal airport key (the OpenFlights numeric id).
pub type AirportId = i64;

/// Minimum Jaro-Winkler similarity for a code to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions attached to an unknown-code error.
const MAX_SUGGESTIONS: usize = 3;

/// A single airport as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub id: AirportId,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub name: String,
    pub city: String,
    pub country: String,
    pub location: Location,
}

impl Airport {
    /// Preferred code for display: IATA, then ICAO, then the numeric id.
    pub fn display_code(&self) -> String {
        self.iata
            .clone()
            .or_else(|| self.icao.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    fn codes(&self) -> impl Iterator<Item = &str> {
        self.iata.as_deref().into_iter().chain(self.icao.as_deref())
    }
}

/// The full airport list plus id and code indexes.
///
/// IATA and ICAO codes share one namespace. When two airports claim the same
/// code the first one loaded keeps it.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
    by_id: HashMap<AirportId, usize>,
    by_code: HashMap<String, usize>,
}

impl AirportCatalog {
    pub fn new(airports: Vec<Airport>) -> Self {
        let mut by_id = HashMap::with_capacity(airports.len());
        let mut by_code = HashMap::with_capacity(airports.len() * 2);
        let mut collisions = 0usize;

        for (index, airport) in airports.iter().enumerate() {
            by_id.entry(airport.id).or_insert(index);
            for code in airport.codes() {
                let key = code.to_ascii_lowercase();
                if by_code.contains_key(&key) {
                    collisions += 1;
                    continue;
                }
                by_code.insert(key, index);
            }
        }

        if collisions > 0 {
            debug!(collisions, "airport codes claimed more than once");
        }

        Self {
            airports,
            by_id,
            by_code,
        }
    }

    /// Airports in load order.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn get(&self, id: AirportId) -> Option<&Airport> {
        self.by_id.get(&id).map(|&index| &self.airports[index])
    }

    pub fn contains(&self, id: AirportId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Case-insensitive lookup by IATA or ICAO code.
    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.by_code
            .get(&code.trim().to_ascii_lowercase())
            .map(|&index| &self.airports[index])
    }

    /// Resolve a code or fail with [`Error::UnknownAirport`] carrying fuzzy suggestions.
    pub fn resolve(&self, code: &str) -> Result<&Airport> {
        self.by_code(code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
            suggestions: self.fuzzy_code_matches(code, MAX_SUGGESTIONS),
        })
    }

    /// Known codes that look like `code`, best match first.
    pub fn fuzzy_code_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = code.trim().to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .iter()
            .flat_map(Airport::codes)
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_ascii_uppercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut suggestions: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if suggestions.len() == limit {
                break;
            }
            if !suggestions.iter().any(|s| s.eq_ignore_ascii_case(candidate)) {
                suggestions.push(candidate.to_string());
            }
        }
        suggestions
    }

    /// Display code for an id, falling back to the id itself for unknown airports.
    pub fn display_code(&self, id: AirportId) -> String {
        self.get(id)
            .map(Airport::display_code)
            .unwrap_or_else(|| id.to_string())
    }
}
