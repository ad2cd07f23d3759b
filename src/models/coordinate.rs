//! Input coordinates and the point geometry built from them.

use geo_types::Point;

use crate::error::LocateError;

/// EPSG code of NAD83 geographic coordinates, the reference system of every
/// input coordinate.
pub const NAD83_SRID: u32 = 4269;

/// A latitude/longitude pair in decimal degrees (NAD83)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse the textual latitude and longitude parameters.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, LocateError> {
        let lat = parse_degrees("latitude", latitude)?;
        let lon = parse_degrees("longitude", longitude)?;
        Ok(Self { lat, lon })
    }

    /// Build the point geometry used as the containment-test input.
    pub fn to_point(&self) -> Result<PointOfInterest, LocateError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(LocateError::GeometryConstruction(format!(
                "coordinates ({}, {}) are not finite",
                self.lat, self.lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(LocateError::GeometryConstruction(format!(
                "latitude {} is outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(LocateError::GeometryConstruction(format!(
                "longitude {} is outside [-180, 180]",
                self.lon
            )));
        }

        Ok(PointOfInterest {
            point: Point::new(self.lon, self.lat),
            srid: NAD83_SRID,
        })
    }
}

fn parse_degrees(axis: &'static str, value: &str) -> Result<f64, LocateError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| LocateError::InputParse {
            axis,
            value: value.to_string(),
        })
}

/// Immutable point geometry (x = longitude, y = latitude)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    point: Point<f64>,
    srid: u32,
}

impl PointOfInterest {
    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    pub fn srid(&self) -> u32 {
        self.srid
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }
}
