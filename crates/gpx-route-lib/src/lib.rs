//! GPX Route Library - Core conversion of GPX tracks into map routes
//!
//! This library turns a parsed GPX track into something a map widget can draw and
//! frame: an ordered coordinate sequence plus the bounding extent used to fit the
//! viewport. It also holds the click-marker tween and the session state that a UI
//! layer drives through the [`MapView`] seam.
//!
//! # Architecture
//!
//! - **[`Coordinate`] / [`Extent`]**: Plain lat/lon values and their bounding box
//! - **[`RouteData`]**: Coordinates and extent of the one track currently shown
//! - **[`select_track`]**: Track selection policy for multi-track files
//! - **[`ClickMarker`]**: Marker that tweens towards each new click
//! - **[`RouteSession`]**: UI-owned state, fed with [`MapEvent`]s
//!
//! # Pipeline
//!
//! file bytes → [`parse_gpx`] → [`select_track`] → [`build_coordinates`] →
//! [`build_extent`] → [`MapView`]

mod coordinate;
mod marker;
mod route;
mod session;
mod track;

// Public API exports
pub use coordinate::{Coordinate, Extent};
pub use marker::{ANIMATION_DURATION, ClickMarker, ClickOutcome, Tween};
pub use route::{RouteData, build_coordinates, build_extent, load_route, parse_gpx, read_gpx};
pub use session::{CoordinateLine, LineId, MapEvent, MapView, ROUTE_COLOR, RouteSession, ViewConfig};
pub use track::{TrackSelection, select_track};

use std::path::PathBuf;

/// Error types for loading and building routes
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("GPX file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("GPX parsing error: {0}")]
    Parse(#[from] gpx::errors::GpxError),

    #[error("There are no tracks to visualize in the provided GPX file")]
    NoTrack,

    #[error("The GPX file contains {count} tracks, please provide a file with a single track")]
    AmbiguousTrack { count: usize },

    #[error("Empty route")]
    EmptyRoute,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
