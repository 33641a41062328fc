use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the directory that holds the dataset files.
pub const DATA_DIR_ENV: &str = "SKYROUTE_DATA_DIR";

/// File name of the airport table inside the dataset directory.
pub const AIRPORTS_FILENAME: &str = "airports.dat";

/// File name of the route table inside the dataset directory.
pub const ROUTES_FILENAME: &str = "routes.dat";

/// Paths to the two dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub airports: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    /// Paths for the standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            airports: dir.join(AIRPORTS_FILENAME),
            routes: dir.join(ROUTES_FILENAME),
        }
    }

    /// Fail with [`Error::DatasetNotFound`] for the first missing file.
    pub fn ensure_exists(&self) -> Result<()> {
        for path in [&self.airports, &self.routes] {
            if !path.is_file() {
                return Err(Error::DatasetNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Platform data directory used when nothing else is configured.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "skyroute", "skyroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Locate the dataset.
///
/// Resolution order: the explicit `dir`, then `SKYROUTE_DATA_DIR`, then the
/// platform data directory. Both files must exist in the chosen directory.
pub fn resolve_dataset(dir: Option<&Path>) -> Result<DatasetPaths> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => default_data_dir()?,
        },
    };

    let paths = DatasetPaths::in_dir(&dir);
    paths.ensure_exists()?;
    debug!(dir = %dir.display(), "resolved dataset directory");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(AIRPORTS_FILENAME), "").expect("write airports");
        fs::write(dir.path().join(ROUTES_FILENAME), "").expect("write routes");

        let paths = resolve_dataset(Some(dir.path())).expect("dataset resolves");
        assert_eq!(paths, DatasetPaths::in_dir(dir.path()));
    }

    #[test]
    fn missing_routes_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(AIRPORTS_FILENAME), "").expect("write airports");

        match resolve_dataset(Some(dir.path())) {
            Err(Error::DatasetNotFound { path }) => {
                assert!(path.ends_with(ROUTES_FILENAME))
            }
            other => panic!("expected DatasetNotFound, got {other:?}"),
        }
    }
}
