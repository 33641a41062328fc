//! Test utilities for microservice handler testing.
//!
//! Handlers are tested against the small OpenFlights extract checked in under
//! `docs/fixtures/openflights`.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::state::AppState;

/// Directory holding the fixture `airports.dat` and `routes.dat`.
pub const TEST_FIXTURE_DIR: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/openflights"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared `AppState` built from the fixture, loaded once per test binary.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let dir = fixture_dir();
            AppState::load(Some(&dir))
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", dir, e))
        })
        .clone()
}

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_DIR)
}

/// Airport codes present in the fixture.
pub mod fixture_airports {
    /// Tallinn.
    pub const TLL: &str = "TLL";

    /// San Francisco; reached from TLL in four legs without ground hops.
    pub const SFO: &str = "SFO";

    /// Havana.
    pub const HAV: &str = "HAV";

    /// Tampere; needs at least three legs from HAV.
    pub const TAY: &str = "TAY";

    /// London Stansted, within ground distance of LHR and LGW.
    pub const STN: &str = "STN";
}

/// Unique request id for tests.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dir_exists() {
        let dir = fixture_dir();
        assert!(dir.join("airports.dat").is_file(), "fixture missing at {:?}", dir);
    }

    #[test]
    fn test_state_contains_fixture_airports() {
        let state = test_state();
        let catalog = state.network().catalog();

        for code in [
            fixture_airports::TLL,
            fixture_airports::SFO,
            fixture_airports::HAV,
            fixture_airports::TAY,
            fixture_airports::STN,
        ] {
            assert!(catalog.by_code(code).is_some(), "{code} should exist in fixture");
        }
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
