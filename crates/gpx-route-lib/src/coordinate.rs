//! Geographic coordinates and bounding extents

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Wrap the longitude into [-180, 180) and clamp the latitude into [-90, 90].
    ///
    /// Map widgets that repeat the world horizontally report positions outside
    /// the canonical longitude range.
    pub fn normalize(self) -> Self {
        // In-range longitudes are returned bit-for-bit
        let lon = if (-180.0..180.0).contains(&self.lon) {
            self.lon
        } else {
            (self.lon + 180.0).rem_euclid(360.0) - 180.0
        };
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lon,
        }
    }

    /// Linear interpolation towards `other`, latitude and longitude independently
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + t * (other.lat - self.lat),
            lon: self.lon + t * (other.lon - self.lon),
        }
    }
}

impl From<&gpx::Waypoint> for Coordinate {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self::new(point.y(), point.x())
    }
}

/// Axis-aligned lat/lon bounding box given by its south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    pub southwest: Coordinate,
    pub northeast: Coordinate,
}

impl Extent {
    /// Zoom used when the extent has no area (single point)
    pub const POINT_ZOOM: f64 = 12.0;

    /// Build an extent from any two opposite corners
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            southwest: Coordinate::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            northeast: Coordinate::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.southwest.lat
    }

    pub fn max_lat(&self) -> f64 {
        self.northeast.lat
    }

    pub fn min_lon(&self) -> f64 {
        self.southwest.lon
    }

    pub fn max_lon(&self) -> f64 {
        self.northeast.lon
    }

    /// Inclusive containment test
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.lat >= self.min_lat()
            && coordinate.lat <= self.max_lat()
            && coordinate.lon >= self.min_lon()
            && coordinate.lon <= self.max_lon()
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat() + self.max_lat()) / 2.0,
            (self.min_lon() + self.max_lon()) / 2.0,
        )
    }

    pub fn is_point(&self) -> bool {
        self.southwest == self.northeast
    }

    /// Estimate a map zoom level at which the whole extent is visible
    pub fn fit_zoom(&self) -> f64 {
        if self.is_point() {
            return Self::POINT_ZOOM;
        }
        let lat_span = (self.max_lat() - self.min_lat()).abs();
        let lon_span = (self.max_lon() - self.min_lon()).abs();
        let zoom_estimate = (4.0 * 360.0 / lat_span.max(lon_span)).log2();
        (zoom_estimate - 0.5).clamp(1.0, 18.0)
    }
}
