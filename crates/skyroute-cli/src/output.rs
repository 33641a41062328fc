//! Output formatting for CLI results.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use skyroute_lib::RouteSummary;

use crate::commands::airport::{AirportDetails, GroundConnectionView};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON for scripting.
    Json,
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render_text()),
            OutputFormat::Json => print_json(summary)?,
        }
        Ok(())
    }

    pub fn render_airport(self, details: &AirportDetails) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", airport_text(details)),
            OutputFormat::Json => print_json(details)?,
        }
        Ok(())
    }

    pub fn render_ground(
        self,
        code: &str,
        max_km: f64,
        connections: &[GroundConnectionView],
    ) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", ground_text(code, max_km, connections)),
            OutputFormat::Json => print_json(&connections)?,
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{json}");
    Ok(())
}

pub fn airport_text(details: &AirportDetails) -> String {
    let airport = &details.airport;
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{} - {}", details.code, airport.name);
    let _ = writeln!(buffer, "  City:      {}, {}", airport.city, airport.country);
    let _ = writeln!(
        buffer,
        "  Codes:     IATA {} / ICAO {}",
        airport.iata.as_deref().unwrap_or("-"),
        airport.icao.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        buffer,
        "  Location:  {:.4}, {:.4}",
        airport.location.latitude, airport.location.longitude
    );
    let _ = writeln!(buffer, "  Departures: {}", details.departures);
    if details.ground_connections.is_empty() {
        let _ = writeln!(buffer, "  Ground:    none");
    } else {
        let codes: Vec<&str> = details
            .ground_connections
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        let _ = writeln!(buffer, "  Ground:    {}", codes.join(", "));
    }
    buffer
}

pub fn ground_text(code: &str, max_km: f64, connections: &[GroundConnectionView]) -> String {
    let mut buffer = String::new();
    if connections.is_empty() {
        let _ = writeln!(
            buffer,
            "No airports within {:.0} km of {} by ground.",
            max_km, code
        );
        return buffer;
    }

    let _ = writeln!(
        buffer,
        "Ground connections from {} (within {:.0} km):",
        code, max_km
    );
    for connection in connections {
        let _ = writeln!(
            buffer,
            "  {:<4} {} ({:.1} km)",
            connection.code, connection.name, connection.distance
        );
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyroute_lib::{Airport, Location};

    fn view(code: &str, distance: f64) -> GroundConnectionView {
        GroundConnectionView {
            code: code.to_string(),
            name: format!("{code} Airport"),
            distance,
        }
    }

    #[test]
    fn ground_text_lists_connections() {
        let text = ground_text("STN", 100.0, &[view("LGW", 73.1), view("LHR", 55.5)]);
        assert!(text.starts_with("Ground connections from STN (within 100 km):"));
        assert!(text.contains("  LGW  LGW Airport (73.1 km)"));
        assert!(text.contains("  LHR  LHR Airport (55.5 km)"));
    }

    #[test]
    fn ground_text_reports_none() {
        assert_eq!(
            ground_text("HAV", 100.0, &[]),
            "No airports within 100 km of HAV by ground.\n"
        );
    }

    #[test]
    fn airport_text_shows_codes_and_connectivity() {
        let details = AirportDetails {
            airport: Airport {
                id: 415,
                iata: Some("TLL".to_string()),
                icao: Some("EETN".to_string()),
                name: "Lennart Meri Tallinn Airport".to_string(),
                city: "Tallinn".to_string(),
                country: "Estonia".to_string(),
                location: Location::new(59.4133, 24.8328),
            },
            code: "TLL".to_string(),
            departures: 3,
            ground_connections: vec![],
        };

        let text = airport_text(&details);
        assert!(text.starts_with("TLL - Lennart Meri Tallinn Airport"));
        assert!(text.contains("IATA TLL / ICAO EETN"));
        assert!(text.contains("Departures: 3"));
        assert!(text.contains("Ground:    none"));
    }
}
