mod common;

use skyroute_lib::{plan_route, Error, RoutePlan, RouteRequest, RouteSummary, SearchStrategy};

use common::network;

fn codes(plan: &RoutePlan) -> Vec<String> {
    RouteSummary::from_plan(network().catalog(), plan)
        .expect("summary builds")
        .codes()
}

fn plan(request: RouteRequest) -> RoutePlan {
    plan_route(network(), &request).expect("route exists")
}

#[test]
fn tallinn_to_san_francisco_by_air() {
    let plan = plan(RouteRequest::new("TLL", "SFO"));

    assert!(plan.distance > 8900.0 && plan.distance < 9400.0, "{}", plan.distance);
    assert_eq!(codes(&plan), vec!["TLL", "TRD", "KEF", "YEG", "SFO"]);
    assert_eq!(plan.hop_count(), 4);
    assert!(!plan.ground_hops);
}

#[test]
fn tallinn_to_san_francisco_with_ground_hops() {
    let plan = plan(RouteRequest::new("TLL", "SFO").with_ground_hops(true));

    assert!(plan.distance > 8900.0 && plan.distance < 9050.0, "{}", plan.distance);
    assert_eq!(codes(&plan), vec!["TLL", "ARN", "OAK", "SFO"]);
    assert_eq!(plan.hop_count(), 2, "ground continuation is part of its leg");
}

#[test]
fn tallinn_to_heathrow_with_ground_hops() {
    let plan = plan(RouteRequest::new("TLL", "LHR").with_ground_hops(true));

    assert!(plan.distance > 1800.0 && plan.distance < 1850.0, "{}", plan.distance);
    assert_eq!(codes(&plan), vec!["TLL", "STN", "LHR"]);
    assert_eq!(plan.hop_count(), 1);
}

#[test]
fn tallinn_to_heathrow_by_air_is_longer() {
    let by_air = plan(RouteRequest::new("TLL", "LHR"));
    assert_eq!(codes(&by_air), vec!["TLL", "HEL", "AMS", "LHR"]);
    assert!(by_air.distance > 1990.0 && by_air.distance < 1995.0);
}

#[test]
fn havana_to_tartu_default_ceiling() {
    let plan = plan(RouteRequest::new("HAV", "TAY"));

    assert!(plan.distance > 9100.0 && plan.distance < 9200.0, "{}", plan.distance);
    assert_eq!(codes(&plan), vec!["HAV", "NAS", "JFK", "HEL", "TAY"]);
}

#[test]
fn havana_to_tartu_more_hops_buy_a_shorter_route() {
    let five = plan(RouteRequest::new("HAV", "TAY").with_hop_ceiling(5));
    let three = plan(RouteRequest::new("HAV", "TAY").with_hop_ceiling(3));

    assert_eq!(codes(&five), vec!["HAV", "NAS", "BOS", "KEF", "HEL", "TAY"]);
    assert_eq!(five.hop_count(), 5);
    assert_eq!(codes(&three), vec!["HAV", "AMS", "HEL", "TAY"]);
    assert!(three.distance > 9500.0 && three.distance < 9600.0, "{}", three.distance);
    assert!(five.distance < three.distance);
}

#[test]
fn havana_to_tartu_two_hops_is_not_connected() {
    let request = RouteRequest::new("HAV", "TAY").with_hop_ceiling(2);
    let err = plan_route(network(), &request).expect_err("unreachable in two legs");

    match err {
        Error::NotConnected {
            origin,
            destination,
            hop_ceiling,
        } => {
            assert_eq!(origin, "HAV");
            assert_eq!(destination, "TAY");
            assert_eq!(hop_ceiling, 2);
        }
        other => panic!("expected NotConnected, got {other:?}"),
    }
}

#[test]
fn ground_hop_to_airport_without_iata_code() {
    let plan = plan(RouteRequest::new("HEL", "EEEI").with_ground_hops(true));
    assert_eq!(codes(&plan), vec!["HEL", "TLL", "EEEI"]);
    assert!(plan.distance > 139.0 && plan.distance < 141.0, "{}", plan.distance);
}

#[test]
fn codes_resolve_case_insensitively_and_by_icao() {
    let by_iata = plan(RouteRequest::new("tll", "tay"));
    let by_icao = plan(RouteRequest::new("EETN", "eetu"));
    assert_eq!(by_iata.distance, by_icao.distance);
    assert_eq!(codes(&by_iata), vec!["TLL", "HEL", "TAY"]);
}

#[test]
fn unknown_code_reports_suggestions() {
    let err = plan_route(network(), &RouteRequest::new("TLX", "SFO")).expect_err("unknown");
    let message = err.to_string();
    assert!(message.contains("unknown airport code: TLX"), "{message}");
    assert!(message.contains("Did you mean"), "{message}");
}

#[test]
fn same_source_and_destination_is_a_zero_length_route() {
    let plan = plan(RouteRequest::new("TLL", "TLL"));
    assert_eq!(plan.distance, 0.0);
    assert_eq!(plan.hop_count(), 0);
    assert_eq!(codes(&plan), vec!["TLL"]);
}

#[test]
fn every_strategy_plans_the_same_route() {
    for ground_hops in [false, true] {
        let plans: Vec<RoutePlan> = SearchStrategy::ALL
            .into_iter()
            .map(|strategy| {
                plan(
                    RouteRequest::new("TLL", "SFO")
                        .with_ground_hops(ground_hops)
                        .with_strategy(strategy),
                )
            })
            .collect();

        for pair in plans.windows(2) {
            assert_eq!(pair[0].distance, pair[1].distance);
            assert_eq!(codes(&pair[0]), codes(&pair[1]));
        }
        assert!(plans[1].explored <= plans[0].explored);
        assert!(plans[2].explored <= plans[0].explored);
    }
}
