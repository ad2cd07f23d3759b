//! Resolve the zip, LEPC and county polygons containing a point.

use tracing::{debug, info, warn};

use crate::config::FieldConfig;
use crate::error::LocateError;
use crate::models::{LayerKey, MatchResult, PointOfInterest};
use crate::pip::PolygonLayer;

/// Point locator over the three polygon layers.
///
/// The layers are only read; a lookup never changes them.
pub struct PointLocator<L> {
    zip: L,
    lepc: L,
    county: L,
    fields: FieldConfig,
}

impl<L: PolygonLayer> PointLocator<L> {
    pub fn new(zip: L, lepc: L, county: L) -> Self {
        Self::with_fields(zip, lepc, county, FieldConfig::default())
    }

    pub fn with_fields(zip: L, lepc: L, county: L, fields: FieldConfig) -> Self {
        Self {
            zip,
            lepc,
            county,
            fields,
        }
    }

    pub fn layer(&self, key: LayerKey) -> &L {
        match key {
            LayerKey::Zip => &self.zip,
            LayerKey::Lepc => &self.lepc,
            LayerKey::County => &self.county,
        }
    }

    pub fn fields(&self) -> &FieldConfig {
        &self.fields
    }

    /// Look the point up in every layer, in [`LayerKey::processing_order`].
    ///
    /// The first layer that fails aborts the lookup.
    pub fn locate(&self, point: &PointOfInterest) -> Result<MatchResult, LocateError> {
        let mut result = MatchResult::new();

        for &key in LayerKey::processing_order() {
            if let Some(name) = self.locate_in(key, point)? {
                result.insert(key, name);
            }
        }

        info!(
            "Located ({}, {}) in {} of {} layers",
            point.lat(),
            point.lon(),
            result.len(),
            LayerKey::processing_order().len()
        );

        Ok(result)
    }

    /// Name of the single feature of one layer containing the point.
    ///
    /// `None` only for layers that allow coverage gaps.
    pub fn locate_in(
        &self,
        key: LayerKey,
        point: &PointOfInterest,
    ) -> Result<Option<String>, LocateError> {
        let layer = self.layer(key);

        let selected = layer
            .select_containing(point)
            .map_err(|source| LocateError::Selection { layer: key, source })?;

        debug!(
            "Selected {} features in {} (layer '{}')",
            selected.len(),
            key,
            layer.name()
        );

        let id = match selected.as_slice() {
            [] if key.allows_no_match() => {
                info!("No {} polygon contains the point; leaving it out", key);
                return Ok(None);
            }
            [] => return Err(LocateError::ZeroMatch { layer: key }),
            [id] => *id,
            ids => {
                warn!("Count for {} is {}", key, ids.len());
                return Err(LocateError::AmbiguousMatch {
                    layer: key,
                    count: ids.len(),
                });
            }
        };

        let field = self.fields.get(key);
        let name = layer
            .read_attribute(id, field)
            .map_err(|source| LocateError::AttributeRead {
                layer: key,
                field: field.to_string(),
                source,
            })?;

        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayerError;
    use crate::models::Coordinate;
    use crate::pip::square;
    use crate::pip::{FeatureId, LayerIndex};

    fn zip_square(name: &str, min: (f64, f64), max: (f64, f64)) -> crate::pip::PolygonFeature {
        let mut feature = square(0, name, min, max);
        feature.attributes.insert("ZCTA5CE10".to_string(), name.into());
        feature
    }

    /// County and LEPC tile lon -97..-96; zip covers only -96.5..-96.0.
    fn locator() -> PointLocator<LayerIndex> {
        let zip = LayerIndex::build(
            "zcta",
            vec![zip_square("77856", (-96.5, 30.0), (-96.0, 31.0))],
        );
        let lepc = LayerIndex::build(
            "lepc",
            vec![
                square(0, "Burleson County LEPC", (-97.0, 30.0), (-96.5, 31.0)),
                square(1, "Robertson County LEPC", (-96.5, 30.0), (-96.0, 31.0)),
            ],
        );
        let county = LayerIndex::build(
            "county",
            vec![
                square(0, "Burleson", (-97.0, 30.0), (-96.5, 31.0)),
                square(1, "Robertson", (-96.5, 30.0), (-96.0, 31.0)),
            ],
        );
        PointLocator::new(zip, lepc, county)
    }

    fn point(lat: f64, lon: f64) -> PointOfInterest {
        Coordinate::new(lat, lon).to_point().unwrap()
    }

    #[test]
    fn test_match_in_all_layers() {
        let result = locator().locate(&point(30.5, -96.25)).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.get(LayerKey::Zip), Some("77856"));
        assert_eq!(result.get(LayerKey::Lepc), Some("Robertson County LEPC"));
        assert_eq!(result.get(LayerKey::County), Some("Robertson"));
    }

    #[test]
    fn test_zip_gap_is_tolerated() {
        let result = locator().locate(&point(30.5, -96.75)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(LayerKey::Zip), None);
        assert_eq!(result.get(LayerKey::County), Some("Burleson"));
    }

    #[test]
    fn test_no_county_is_an_error() {
        let zip = LayerIndex::build("zcta", vec![]);
        let lepc = LayerIndex::build(
            "lepc",
            vec![square(0, "Brazos LEPC", (-97.0, 30.0), (-96.0, 31.0))],
        );
        let county = LayerIndex::build("county", vec![]);
        let locator = PointLocator::new(zip, lepc, county);

        match locator.locate(&point(30.5, -96.5)) {
            Err(LocateError::ZeroMatch { layer }) => assert_eq!(layer, LayerKey::County),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_lepc_is_an_error() {
        match locator().locate(&point(35.0, -96.25)) {
            Err(LocateError::ZeroMatch { layer }) => assert_eq!(layer, LayerKey::Lepc),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_shared_boundary_is_ambiguous() {
        // On the Burleson/Robertson line
        let zip = LayerIndex::build("zcta", vec![]);
        let base = locator();
        let locator = PointLocator::new(zip, base.lepc, base.county);

        match locator.locate(&point(30.5, -96.5)) {
            Err(LocateError::AmbiguousMatch { layer, count }) => {
                assert_eq!(layer, LayerKey::Lepc);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_zip_reported_first() {
        let zip = LayerIndex::build(
            "zcta",
            vec![
                zip_square("77836", (-97.0, 30.0), (-96.5, 31.0)),
                zip_square("77856", (-96.5, 30.0), (-96.0, 31.0)),
            ],
        );
        let base = locator();
        let locator = PointLocator::new(zip, base.lepc, base.county);

        assert!(matches!(
            locator.locate(&point(30.5, -96.5)),
            Err(LocateError::AmbiguousMatch {
                layer: LayerKey::Zip,
                count: 2
            })
        ));
    }

    #[test]
    fn test_missing_attribute_is_attribute_error() {
        let fields = FieldConfig {
            zip: "ZCTA5CE20".to_string(),
            ..FieldConfig::default()
        };
        let base = locator();
        let locator = PointLocator::with_fields(base.zip, base.lepc, base.county, fields);

        match locator.locate(&point(30.5, -96.25)) {
            Err(LocateError::AttributeRead { layer, field, .. }) => {
                assert_eq!(layer, LayerKey::Zip);
                assert_eq!(field, "ZCTA5CE20");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    struct BrokenLayer;

    impl PolygonLayer for BrokenLayer {
        fn name(&self) -> &str {
            "broken"
        }

        fn select_containing(&self, _: &PointOfInterest) -> Result<Vec<FeatureId>, LayerError> {
            Err(LayerError::Io(std::io::Error::other("connection reset")))
        }

        fn read_attribute(&self, id: FeatureId, _: &str) -> Result<String, LayerError> {
            Err(LayerError::UnknownFeature(id))
        }
    }

    #[test]
    fn test_backend_failure_is_selection_error() {
        let locator = PointLocator::new(BrokenLayer, BrokenLayer, BrokenLayer);
        assert!(matches!(
            locator.locate(&point(30.5, -96.25)),
            Err(LocateError::Selection {
                layer: LayerKey::Zip,
                ..
            })
        ));
    }

    #[test]
    fn test_borrowed_layers() {
        let base = locator();
        let borrowed = PointLocator::new(&base.zip, &base.lepc, &base.county);
        let result = borrowed.locate(&point(30.5, -96.25)).unwrap();
        assert_eq!(result, base.locate(&point(30.5, -96.25)).unwrap());
    }
}
