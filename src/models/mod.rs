//! Core data models for point location.

pub mod coordinate;
pub mod layer;
pub mod result;

pub use coordinate::{Coordinate, PointOfInterest, NAD83_SRID};
pub use layer::LayerKey;
pub use result::MatchResult;
