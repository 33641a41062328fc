use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the SkyRoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when neither the IATA nor the ICAO lookup resolves a code.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when the destination is unreachable within the hop ceiling.
    #[error("{origin} and {destination} are not connected in {hop_ceiling} allowed hops")]
    NotConnected {
        origin: String,
        destination: String,
        hop_ceiling: usize,
    },

    /// Raised when a computed route plan lacks any legs to summarise.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a search strategy name is not recognised.
    #[error("unknown search strategy: {name}")]
    UnknownStrategy { name: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
