use std::fmt::Write;

use serde::Serialize;

use crate::airport::{AirportCatalog, AirportId};
use crate::error::{Error, Result};
use crate::path::SearchStrategy;
use crate::routing::RoutePlan;

/// How the traveller arrives at a stop.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Arrival {
    Origin,
    Flight,
    Ground,
}

impl Arrival {
    fn label(self) -> &'static str {
        match self {
            Arrival::Origin => "origin",
            Arrival::Flight => "flight",
            Arrival::Ground => "ground",
        }
    }
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: AirportId,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Visible stop along a route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStop {
    pub index: usize,
    pub id: AirportId,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub arrival: Arrival,
    /// Kilometres covered since the previous stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<f64>,
}

impl RouteStop {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub source: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub distance: f64,
    pub legs: usize,
    pub hop_ceiling: usize,
    pub strategy: SearchStrategy,
    pub ground_hops: bool,
    pub explored: usize,
    pub stops: Vec<RouteStop>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved codes and names.
    ///
    /// A ground continuation expands into a flight stop at the landing airport
    /// followed by a ground stop at the final airport.
    pub fn from_plan(catalog: &AirportCatalog, plan: &RoutePlan) -> Result<Self> {
        if plan.legs.is_empty() && plan.source != plan.destination {
            return Err(Error::EmptyRoutePlan);
        }

        let stop = |id: AirportId, arrival: Arrival, leg_distance: Option<f64>| RouteStop {
            index: 0,
            id,
            code: catalog.display_code(id),
            name: catalog.get(id).map(|airport| airport.name.clone()),
            arrival,
            leg_distance,
        };

        let mut stops = vec![stop(plan.source, Arrival::Origin, None)];
        for leg in &plan.legs {
            match leg.ground_hop_from {
                Some(landing) => {
                    let ground = match (catalog.get(landing), catalog.get(leg.destination)) {
                        (Some(from), Some(to)) => from.location.distance_to(&to.location),
                        _ => 0.0,
                    };
                    stops.push(stop(landing, Arrival::Flight, Some(leg.distance - ground)));
                    stops.push(stop(leg.destination, Arrival::Ground, Some(ground)));
                }
                None => stops.push(stop(leg.destination, Arrival::Flight, Some(leg.distance))),
            }
        }
        for (index, stop) in stops.iter_mut().enumerate() {
            stop.index = index;
        }

        let endpoint = |id: AirportId| RouteEndpoint {
            id,
            code: catalog.display_code(id),
            name: catalog.get(id).map(|airport| airport.name.clone()),
        };

        Ok(Self {
            source: endpoint(plan.source),
            destination: endpoint(plan.destination),
            distance: plan.distance,
            legs: plan.hop_count(),
            hop_ceiling: plan.hop_ceiling,
            strategy: plan.strategy,
            ground_hops: plan.ground_hops,
            explored: plan.explored,
            stops,
        })
    }

    /// Display codes of every visible stop, in travel order.
    pub fn codes(&self) -> Vec<String> {
        self.stops.iter().map(|stop| stop.code.clone()).collect()
    }

    /// Plain-text itinerary.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} legs, {:.1} km, max {} hops, strategy: {})",
            self.source.code,
            self.destination.code,
            self.legs,
            self.distance,
            self.hop_ceiling,
            self.strategy
        );
        for stop in &self.stops {
            match stop.leg_distance {
                Some(distance) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {:<4} {} ({}, {:.1} km)",
                        stop.index,
                        stop.code,
                        stop.display_name(),
                        stop.arrival.label(),
                        distance
                    );
                }
                None => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {:<4} {} ({})",
                        stop.index,
                        stop.code,
                        stop.display_name(),
                        stop.arrival.label()
                    );
                }
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::tests::airport;
    use crate::graph::Route;

    fn plan(legs: Vec<Route>, destination: AirportId) -> RoutePlan {
        RoutePlan {
            source: 1,
            destination,
            distance: legs.iter().map(|leg| leg.distance).sum(),
            legs,
            hop_ceiling: 4,
            strategy: SearchStrategy::OraclePruned,
            ground_hops: true,
            explored: 3,
        }
    }

    fn catalog() -> AirportCatalog {
        AirportCatalog::new(vec![
            airport(1, Some("AAA"), None),
            airport(2, Some("BBB"), None),
            airport(3, None, Some("CCCC")),
        ])
    }

    #[test]
    fn ground_continuation_expands_into_two_stops() {
        let catalog = catalog();
        let ground = catalog
            .get(2)
            .zip(catalog.get(3))
            .map(|(a, b)| a.location.distance_to(&b.location))
            .unwrap_or_default();
        let legs = vec![Route {
            source: 1,
            destination: 3,
            distance: 100.0 + ground,
            ground_hop_from: Some(2),
        }];

        let summary = RouteSummary::from_plan(&catalog, &plan(legs, 3)).expect("summary");
        assert_eq!(summary.codes(), vec!["AAA", "BBB", "CCCC"]);
        assert_eq!(summary.legs, 1);
        assert_eq!(summary.stops[1].arrival, Arrival::Flight);
        assert_eq!(summary.stops[2].arrival, Arrival::Ground);
        assert_eq!(summary.stops[2].index, 2);
        let flight = summary.stops[1].leg_distance.unwrap_or_default();
        assert!((flight - 100.0).abs() < 1e-9);
    }

    #[test]
    fn same_airport_route_has_a_single_stop() {
        let summary = RouteSummary::from_plan(&catalog(), &plan(Vec::new(), 1)).expect("summary");
        assert_eq!(summary.codes(), vec!["AAA"]);
        assert_eq!(summary.distance, 0.0);
    }

    #[test]
    fn legless_plan_between_distinct_airports_is_rejected() {
        let result = RouteSummary::from_plan(&catalog(), &plan(Vec::new(), 2));
        assert!(matches!(result, Err(Error::EmptyRoutePlan)));
    }

    #[test]
    fn text_rendering_lists_each_stop() {
        let legs = vec![Route::flight(1, 2, 12.5)];
        let summary = RouteSummary::from_plan(&catalog(), &plan(legs, 2)).expect("summary");
        let text = summary.render_text();
        assert!(text.starts_with("Route: AAA -> BBB (1 legs, 12.5 km"));
        assert!(text.contains("BBB"));
        assert!(text.contains("flight, 12.5 km"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn json_uses_snake_case_arrivals_and_strategy_names() {
        let legs = vec![Route::flight(1, 2, 12.5)];
        let summary = RouteSummary::from_plan(&catalog(), &plan(legs, 2)).expect("summary");
        let json = serde_json::to_value(&summary).expect("serialises");

        assert_eq!(json["strategy"], "oracle-pruned");
        assert_eq!(json["stops"][0]["arrival"], "origin");
        assert_eq!(json["stops"][1]["arrival"], "flight");
        assert!(json["stops"][0].get("leg_distance").is_none());
    }
}
