//! Polylocator - find the zip code tabulation area, LEPC district and county
//! containing a point.
//!
//! This library provides the locator and polygon layer backend used by the
//! `locate` binary.

pub mod config;
pub mod error;
pub mod job;
pub mod locator;
pub mod models;
pub mod pip;

pub use error::{LayerError, LocateError};
pub use locator::PointLocator;
pub use models::{Coordinate, LayerKey, MatchResult, PointOfInterest};
