//! Polygon features loaded from GeoJSON layer files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use geo::BoundingRect;
use geo_types::{Geometry, MultiPolygon};
use geojson::{GeoJson, JsonObject};
use tracing::{info, warn};

use crate::error::LayerError;

/// Index of a feature within its layer
pub type FeatureId = usize;

/// A single polygon feature with its attribute table row
#[derive(Debug, Clone)]
pub struct PolygonFeature {
    pub id: FeatureId,
    pub attributes: JsonObject,
    pub geometry: MultiPolygon<f64>,
}

impl PolygonFeature {
    /// Get the bounding box of this feature
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Read polygon features from a `.geojson` file, or a `.gz` compressed one.
pub fn read_layer_file(path: &Path) -> Result<Vec<PolygonFeature>, LayerError> {
    info!("Loading polygon layer from {}", path.display());

    let file = File::open(path)?;
    let mut reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let features = parse_features(&content)?;
    info!(
        "Loaded {} polygon features from {}",
        features.len(),
        path.display()
    );
    Ok(features)
}

/// Parse a GeoJSON FeatureCollection (or single Feature) into polygon features.
///
/// Features without an areal geometry are skipped.
pub fn parse_features(content: &str) -> Result<Vec<PolygonFeature>, LayerError> {
    let geojson: GeoJson = content.parse()?;

    let raw_features = match geojson {
        GeoJson::FeatureCollection(fc) => {
            check_crs(fc.foreign_members.as_ref())?;
            fc.features
        }
        GeoJson::Feature(feature) => {
            check_crs(feature.foreign_members.as_ref())?;
            vec![feature]
        }
        GeoJson::Geometry(_) => return Err(LayerError::NotFeatures),
    };

    let mut features = Vec::with_capacity(raw_features.len());

    for (position, feature) in raw_features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!("Skipping feature {} with no geometry", position);
            continue;
        };

        let geometry: Geometry<f64> = geometry.try_into()?;
        let polygons = match geometry {
            Geometry::MultiPolygon(mp) => mp,
            Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            _ => {
                warn!("Skipping feature {} with non-polygon geometry", position);
                continue;
            }
        };

        features.push(PolygonFeature {
            id: features.len(),
            attributes: feature.properties.unwrap_or_default(),
            geometry: polygons,
        });
    }

    Ok(features)
}

/// Reject layers that declare a CRS other than NAD83 or WGS84 geographic.
///
/// The two datums are treated as coincident; projected systems are not.
/// A null `crs` means no CRS was given. Linked CRS definitions cannot be
/// checked and are accepted.
fn check_crs(foreign_members: Option<&JsonObject>) -> Result<(), LayerError> {
    let Some(crs) = foreign_members.and_then(|m| m.get("crs")) else {
        return Ok(());
    };
    if crs.is_null() {
        return Ok(());
    }

    let Some(name) = crs
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
    else {
        warn!("Layer CRS has no name, assuming geographic coordinates: {}", crs);
        return Ok(());
    };

    if is_geographic_crs_name(name) {
        Ok(())
    } else {
        Err(LayerError::UnsupportedCrs(name.to_string()))
    }
}

/// `EPSG:4269`, `urn:ogc:def:crs:EPSG::4326`, `urn:ogc:def:crs:OGC:1.3:CRS84`, ...
fn is_geographic_crs_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    let mut segments = upper.rsplit(':');
    let code = segments.next().unwrap_or_default();

    match code {
        "CRS84" => true,
        "4269" | "4326" => segments.any(|s| s == "EPSG"),
        _ => false,
    }
}
