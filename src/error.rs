//! Error types for point location runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::LayerKey;

/// Failures raised by a polygon layer backend.
#[derive(Debug, Error)]
pub enum LayerError {
    /// Reading the layer file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The layer file is not valid GeoJSON.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The layer declares a coordinate reference system other than NAD83/WGS84.
    #[error("unsupported coordinate reference system {0:?}")]
    UnsupportedCrs(String),

    /// The GeoJSON root is neither a feature nor a feature collection.
    #[error("expected a Feature or FeatureCollection")]
    NotFeatures,

    /// A feature id does not exist in the layer.
    #[error("no feature with id {0}")]
    UnknownFeature(usize),

    /// The attribute is absent from the feature.
    #[error("attribute {0:?} not present")]
    MissingAttribute(String),

    /// The attribute exists but has no scalar value.
    #[error("attribute {field:?} has non-scalar value {value}")]
    NonScalarAttribute {
        field: String,
        value: serde_json::Value,
    },
}

/// Every way a location run can fail.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Could not parse {axis} {value:?} as a number.")]
    InputParse { axis: &'static str, value: String },

    #[error("Error creating point geometry: {0}")]
    GeometryConstruction(String),

    #[error("Could not load {layer} layer from {}: {source}", .path.display())]
    LayerLoad {
        layer: LayerKey,
        path: PathBuf,
        #[source]
        source: LayerError,
    },

    #[error("File did not open: {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error selecting by location in {layer}: {source}")]
    Selection {
        layer: LayerKey,
        #[source]
        source: LayerError,
    },

    #[error("No features selected in {layer}.")]
    ZeroMatch { layer: LayerKey },

    #[error("More than one feature selected in {layer} ({count} features).")]
    AmbiguousMatch { layer: LayerKey, count: usize },

    #[error("Error reading {field} from {layer}: {source}")]
    AttributeRead {
        layer: LayerKey,
        field: String,
        #[source]
        source: LayerError,
    },

    #[error("Error writing to file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reported as a warning only; the output has already been flushed.
    #[error("Error closing file {}: {source}", .path.display())]
    FileClose {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
