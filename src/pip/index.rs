//! Spatial index for fast polygon containment lookups.

use std::path::Path;

use geo::{Intersects, Point};
use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

use super::boundary::{read_layer_file, FeatureId, PolygonFeature};
use crate::error::LayerError;

/// R-tree entry pointing back into the feature table
#[derive(Clone)]
struct IndexedFeature {
    id: FeatureId,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedFeature {
    fn new(feature: &PolygonFeature) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = feature.bbox()?;
        Some(Self {
            id: feature.id,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// An immutable polygon layer with an R-tree over feature envelopes
pub struct LayerIndex {
    name: String,
    features: Vec<PolygonFeature>,
    tree: RTree<IndexedFeature>,
}

impl LayerIndex {
    /// Build spatial index from polygon features
    pub fn build(name: impl Into<String>, mut features: Vec<PolygonFeature>) -> Self {
        let name = name.into();

        // Ids double as positions in the feature table
        for (position, feature) in features.iter_mut().enumerate() {
            feature.id = position;
        }

        let indexed: Vec<IndexedFeature> =
            features.iter().filter_map(IndexedFeature::new).collect();
        let tree = RTree::bulk_load(indexed);

        info!(
            "Spatial index for layer '{}' built with {} entries",
            name,
            tree.size()
        );

        Self {
            name,
            features,
            tree,
        }
    }

    /// Load a GeoJSON layer file and index it
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, LayerError> {
        let features = read_layer_file(path)?;
        Ok(Self::build(name, features))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find all features whose area, boundary included, covers a point.
    ///
    /// Ids are returned in ascending order.
    pub fn containing(&self, point: &Point<f64>) -> Vec<FeatureId> {
        let query_envelope = AABB::from_point([point.x(), point.y()]);

        // Use R-tree to get candidates via envelope intersection, then filter with exact test
        let mut ids: Vec<FeatureId> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|entry| self.features[entry.id].geometry.intersects(point))
            .map(|entry| entry.id)
            .collect();
        ids.sort_unstable();

        debug!(
            "Layer '{}' lookup at ({}, {}): {} features",
            self.name,
            point.x(),
            point.y(),
            ids.len()
        );

        ids
    }

    pub fn feature(&self, id: FeatureId) -> Option<&PolygonFeature> {
        self.features.get(id)
    }

    /// Get total number of features in the layer
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
