//! Backend abstraction over polygon layers.

use serde_json::Value;

use super::boundary::FeatureId;
use super::index::LayerIndex;
use crate::error::LayerError;
use crate::models::PointOfInterest;

/// The geospatial operations the locator needs from a polygon layer.
///
/// Implementations must not change any observable layer state when
/// selecting; the selection is the return value.
pub trait PolygonLayer {
    /// Layer name for diagnostics
    fn name(&self) -> &str;

    /// Select every feature whose polygon contains the point.
    fn select_containing(&self, point: &PointOfInterest) -> Result<Vec<FeatureId>, LayerError>;

    /// Read one attribute of a selected feature as text.
    fn read_attribute(&self, id: FeatureId, field: &str) -> Result<String, LayerError>;
}

impl PolygonLayer for LayerIndex {
    fn name(&self) -> &str {
        LayerIndex::name(self)
    }

    fn select_containing(&self, point: &PointOfInterest) -> Result<Vec<FeatureId>, LayerError> {
        Ok(self.containing(point.point()))
    }

    fn read_attribute(&self, id: FeatureId, field: &str) -> Result<String, LayerError> {
        let feature = self.feature(id).ok_or(LayerError::UnknownFeature(id))?;
        let value = feature
            .attributes
            .get(field)
            .ok_or_else(|| LayerError::MissingAttribute(field.to_string()))?;
        attribute_text(field, value)
    }
}

impl<L: PolygonLayer + ?Sized> PolygonLayer for &L {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn select_containing(&self, point: &PointOfInterest) -> Result<Vec<FeatureId>, LayerError> {
        (**self).select_containing(point)
    }

    fn read_attribute(&self, id: FeatureId, field: &str) -> Result<String, LayerError> {
        (**self).read_attribute(id, field)
    }
}

/// Render a scalar attribute value; strings are taken verbatim.
fn attribute_text(field: &str, value: &Value) -> Result<String, LayerError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(LayerError::NonScalarAttribute {
            field: field.to_string(),
            value: value.clone(),
        }),
    }
}
