//! Readers for the OpenFlights `airports.dat` and `routes.dat` formats.
//!
//! Both files are headerless CSV. The literal `\N` marks a missing value.
//! Malformed rows, including rows the CSV reader itself rejects, are dropped
//! rather than failing the load; the numbers of dropped rows are logged. Only
//! I/O errors abort a load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::airport::{Airport, AirportId};
use crate::error::Result;
use crate::geo::Location;

const NULL_MARKER: &str = "\\N";

mod airport_column {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const CITY: usize = 2;
    pub const COUNTRY: usize = 3;
    pub const IATA: usize = 4;
    pub const ICAO: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
}

mod route_column {
    pub const SOURCE_ID: usize = 3;
    pub const DESTINATION_ID: usize = 5;
    pub const STOPS: usize = 7;
}

/// A direct route record as read from `routes.dat`, before endpoint resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRoute {
    pub source_id: AirportId,
    pub destination_id: AirportId,
}

impl RawRoute {
    pub fn new(source_id: AirportId, destination_id: AirportId) -> Self {
        Self {
            source_id,
            destination_id,
        }
    }
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(input)
}

/// Unwrap a record, or log and drop it when the row itself is unreadable.
fn readable(record: csv::Result<StringRecord>, kind: &str) -> Result<Option<StringRecord>> {
    match record {
        Ok(record) => Ok(Some(record)),
        Err(err) if err.is_io_error() => Err(err.into()),
        Err(err) => {
            let line = err.position().map(|pos| pos.line());
            warn!(kind, ?line, error = %err, "skipping unreadable row");
            Ok(None)
        }
    }
}

fn field<'r>(record: &'r StringRecord, index: usize) -> Option<&'r str> {
    record
        .get(index)
        .filter(|value| !value.is_empty() && *value != NULL_MARKER)
}

fn parse_airport(record: &StringRecord) -> Option<Airport> {
    let id = field(record, airport_column::ID)?.parse().ok()?;
    let latitude: f64 = field(record, airport_column::LATITUDE)?.parse().ok()?;
    let longitude: f64 = field(record, airport_column::LONGITUDE)?.parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    let text = |index| field(record, index).unwrap_or_default().to_string();

    Some(Airport {
        id,
        iata: field(record, airport_column::IATA).map(str::to_string),
        icao: field(record, airport_column::ICAO).map(str::to_string),
        name: text(airport_column::NAME),
        city: text(airport_column::CITY),
        country: text(airport_column::COUNTRY),
        location: Location::new(latitude, longitude),
    })
}

/// Read airports in file order, skipping rows whose id or coordinates do not parse.
pub fn load_airports<R: Read>(input: R) -> Result<Vec<Airport>> {
    let mut airports = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in reader(input).records().enumerate() {
        let Some(record) = readable(record, "airport")? else {
            skipped += 1;
            continue;
        };
        match parse_airport(&record) {
            Some(airport) => airports.push(airport),
            None => {
                skipped += 1;
                warn!(line = line + 1, "skipping airport row with unusable id or coordinates");
            }
        }
    }

    debug!(loaded = airports.len(), skipped, "read airports");
    Ok(airports)
}

pub fn load_airports_from_path(path: &Path) -> Result<Vec<Airport>> {
    load_airports(File::open(path)?)
}

/// Read direct (zero-stop) routes in file order.
///
/// Multi-stop records and rows with a missing or non-numeric endpoint id are
/// dropped. Endpoints that do not exist in the catalog are left for the graph
/// builder to discard.
pub fn load_routes<R: Read>(input: R) -> Result<Vec<RawRoute>> {
    let mut routes = Vec::new();
    let mut multi_stop = 0usize;
    let mut malformed = 0usize;

    for record in reader(input).records() {
        let Some(record) = readable(record, "route")? else {
            malformed += 1;
            continue;
        };
        if record.get(route_column::STOPS) != Some("0") {
            multi_stop += 1;
            continue;
        }

        let source = field(&record, route_column::SOURCE_ID).and_then(|v| v.parse().ok());
        let destination =
            field(&record, route_column::DESTINATION_ID).and_then(|v| v.parse().ok());

        match (source, destination) {
            (Some(source_id), Some(destination_id)) => {
                routes.push(RawRoute::new(source_id, destination_id))
            }
            _ => malformed += 1,
        }
    }

    debug!(
        loaded = routes.len(),
        multi_stop, malformed, "read direct routes"
    );
    Ok(routes)
}

pub fn load_routes_from_path(path: &Path) -> Result<Vec<RawRoute>> {
    load_routes(File::open(path)?)
}
