//! Route building from GPX tracks

use crate::{Coordinate, Extent, Result, RouteError, TrackSelection, select_track};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Coordinates and extent of the track currently on the map
#[derive(Clone, Debug, PartialEq)]
pub struct RouteData {
    /// Path in recording order
    coordinates: Arc<[Coordinate]>,
    /// Bounding box over all coordinates
    extent: Extent,
}

/// Extract the ordered coordinates of a track.
///
/// Segments are concatenated in document order; elevation and time are dropped.
pub fn build_coordinates(track: &gpx::Track) -> Vec<Coordinate> {
    track
        .segments
        .iter()
        .flat_map(|segment| segment.points.iter())
        .map(Coordinate::from)
        .collect()
}

/// Compute the bounding extent of a non-empty coordinate sequence
pub fn build_extent(coordinates: &[Coordinate]) -> Result<Extent> {
    let (first, rest) = coordinates.split_first().ok_or(RouteError::EmptyRoute)?;

    let mut min_lat = first.lat;
    let mut max_lat = first.lat;
    let mut min_lon = first.lon;
    let mut max_lon = first.lon;

    for coordinate in rest {
        min_lat = min_lat.min(coordinate.lat);
        max_lat = max_lat.max(coordinate.lat);
        min_lon = min_lon.min(coordinate.lon);
        max_lon = max_lon.max(coordinate.lon);
    }

    Ok(Extent {
        southwest: Coordinate::new(min_lat, min_lon),
        northeast: Coordinate::new(max_lat, max_lon),
    })
}

impl RouteData {
    /// Build the route of a single track
    pub fn from_track(track: &gpx::Track) -> Result<Self> {
        let coordinates = build_coordinates(track);
        let extent = build_extent(&coordinates)?;
        Ok(Self {
            coordinates: coordinates.into(),
            extent,
        })
    }

    /// Select a track from parsed GPX data and build its route
    pub fn from_gpx(gpx: &gpx::Gpx, selection: TrackSelection) -> Result<Self> {
        let track = select_track(&gpx.tracks, selection)?;
        Self::from_track(track)
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Shared handle to the coordinates, cheap to hand to a renderer
    pub fn shared_coordinates(&self) -> Arc<[Coordinate]> {
        Arc::clone(&self.coordinates)
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Parse GPX data from any reader
pub fn parse_gpx<R: Read>(reader: R) -> Result<gpx::Gpx> {
    Ok(gpx::read(reader)?)
}

/// Open and parse a GPX file
pub fn read_gpx(path: &Path) -> Result<gpx::Gpx> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RouteError::FileNotFound(path.to_path_buf()),
        _ => RouteError::Io(e),
    })?;
    parse_gpx(std::io::BufReader::new(file))
}

/// Read a GPX file and build the route of its selected track
pub fn load_route(path: &Path, selection: TrackSelection) -> Result<RouteData> {
    profiling::scope!("load_route");
    let _span = tracing::debug_span!("load_route", path = %path.display()).entered();

    let gpx = read_gpx(path)?;
    let route = RouteData::from_gpx(&gpx, selection)?;

    tracing::debug!(
        "Built route with {} points, extent ({:.4}, {:.4}) - ({:.4}, {:.4})",
        route.len(),
        route.extent.min_lat(),
        route.extent.min_lon(),
        route.extent.max_lat(),
        route.extent.max_lon()
    );
    Ok(route)
}
