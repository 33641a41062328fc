//! Shared fixture helpers for integration tests.

use std::path::PathBuf;
use std::sync::OnceLock;

use skyroute_lib::{load_network, DatasetPaths, Network};

/// Directory holding the checked-in OpenFlights fixture.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/openflights")
}

#[allow(dead_code)]
pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(&fixture_dir())
}

/// Network built from the fixture once per test binary.
#[allow(dead_code)]
pub fn network() -> &'static Network {
    static NETWORK: OnceLock<Network> = OnceLock::new();
    NETWORK.get_or_init(|| load_network(&fixture_paths()).expect("fixture network loads"))
}

/// Airport id for a fixture code.
#[allow(dead_code)]
pub fn id(code: &str) -> i64 {
    network()
        .catalog()
        .by_code(code)
        .unwrap_or_else(|| panic!("fixture has {code}"))
        .id
}
