//! Write a location result to the output file.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::{info, warn};

use crate::error::LocateError;
use crate::locator::PointLocator;
use crate::models::{MatchResult, PointOfInterest};
use crate::pip::PolygonLayer;

/// Outcome of a successful run
#[derive(Debug)]
pub struct RunReport {
    pub result: MatchResult,
    /// Set when the output was written but the final sync failed
    pub close_warning: Option<LocateError>,
}

/// Open (truncating) `path`, locate the point, and write one `key=name`
/// line per matched layer.
///
/// The file is opened before any lookup, so on a lookup failure it is left
/// empty.
pub fn locate_to_file<L: PolygonLayer>(
    locator: &PointLocator<L>,
    point: &PointOfInterest,
    path: &Path,
) -> Result<RunReport, LocateError> {
    let file = File::create(path).map_err(|source| LocateError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let result = locator.locate(point)?;

    let write_error = |source| LocateError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    result.write_lines(&mut writer).map_err(write_error)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_error(e.into_error()))?;

    let close_warning = file.sync_all().err().map(|source| {
        let err = LocateError::FileClose {
            path: path.to_path_buf(),
            source,
        };
        warn!("{}", err);
        err
    });

    info!("Wrote {} lines to {}", result.len(), path.display());

    Ok(RunReport {
        result,
        close_warning,
    })
}
