//! KD-tree over airport positions for radius queries.
//!
//! Airports are indexed by their Earth-centred Cartesian coordinates. A radius
//! query on chord distance returns a superset of the airports within the same
//! great-circle distance, because a chord is never longer than its arc. Callers
//! confirm each candidate with the haversine distance.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::airport::AirportCatalog;
use crate::geo::Location;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Slack added to the chord radius so rounding never drops a boundary airport.
const RADIUS_SLACK_KM: f64 = 1e-6;

/// Spatial index over every airport in a catalog.
pub struct AirportIndex {
    /// Items are positions in the catalog's load order.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    len: usize,
}

impl AirportIndex {
    pub fn build(catalog: &AirportCatalog) -> Self {
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        for (index, airport) in catalog.airports().iter().enumerate() {
            tree.add(&airport.location.to_cartesian(), index);
        }

        let len = catalog.len();
        debug!(airports = len, "built airport spatial index");
        Self { tree, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Candidate airports whose chord distance to `location` is within `radius_km`.
    ///
    /// Returns catalog positions in ascending order.
    pub fn candidates_within(&self, location: Location, radius_km: f64) -> Vec<usize> {
        if radius_km < 0.0 || self.len == 0 {
            return Vec::new();
        }

        let radius = radius_km + RADIUS_SLACK_KM;
        let mut positions: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&location.to_cartesian(), radius * radius)
            .into_iter()
            .map(|neighbour| neighbour.item)
            .collect();
        positions.sort_unstable();
        positions
    }
}
