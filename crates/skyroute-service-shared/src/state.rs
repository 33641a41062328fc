//! Application state for HTTP microservices.
//!
//! Handlers reach the route network through [`AppState`], which is built once
//! at startup and shared read-only across requests.

use std::path::Path;
use std::sync::Arc;

use skyroute_lib::{load_network, resolve_dataset, Error as LibError, Network};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The dataset directory is missing one of its files.
    DatasetNotFound(String),

    /// The dataset was found but could not be loaded.
    NetworkLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(path) => write!(f, "dataset not found: {}", path),
            Self::NetworkLoad(e) => write!(f, "failed to load route network: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NetworkLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => Self::DatasetNotFound(path.display().to_string()),
            other => Self::NetworkLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone (`Arc` inside); share it via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use skyroute_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let airports = state.network().catalog().len();
/// }
///
/// let state = AppState::load(Some("path/to/openflights".as_ref())).unwrap();
/// let app = Router::new()
///     .route("/airports", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Network>,
}

impl AppState {
    /// Load the dataset and build the network.
    ///
    /// `data_dir` falls back to `SKYROUTE_DATA_DIR` and then the platform
    /// data directory, as in [`resolve_dataset`].
    pub fn load(data_dir: Option<&Path>) -> Result<Self, AppStateError> {
        let paths = resolve_dataset(data_dir)?;

        tracing::info!(
            airports = %paths.airports.display(),
            routes = %paths.routes.display(),
            "loading route network"
        );
        let network = load_network(&paths)?;
        tracing::info!(
            airport_count = network.catalog().len(),
            flight_edges = network.flights().edge_count(),
            ground_pairs = network.ground_connections().pair_count(),
            "route network loaded successfully"
        );

        Ok(Self::from_network(network))
    }

    /// Wrap an already built network.
    pub fn from_network(network: Network) -> Self {
        Self {
            inner: Arc::new(network),
        }
    }

    pub fn network(&self) -> &Network {
        &self.inner
    }

    /// Owned handle for moving into `spawn_blocking`.
    pub fn network_arc(&self) -> Arc<Network> {
        Arc::clone(&self.inner)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("airport_count", &self.inner.catalog().len())
            .field("flight_edges", &self.inner.flights().edge_count())
            .field("augmented_edges", &self.inner.augmented().edge_count())
            .finish()
    }
}
