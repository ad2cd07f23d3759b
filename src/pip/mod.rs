//! Point-in-Polygon (PIP) layer backend.
//!
//! Loads polygon layers from GeoJSON and answers containment queries
//! using an R-tree spatial index.

mod backend;
mod boundary;
mod index;

pub use backend::PolygonLayer;
pub use boundary::{parse_features, read_layer_file, FeatureId, PolygonFeature};
pub use index::LayerIndex;

#[cfg(test)]
pub(crate) use index::tests::square;
