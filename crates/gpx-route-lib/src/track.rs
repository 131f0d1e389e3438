//! Track selection for files with zero, one or many tracks

use crate::{Result, RouteError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a GPX file holds more than one track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackSelection {
    /// Use the first track in document order
    #[default]
    First,
    /// Reject the file unless it has exactly one track
    RequireSingle,
}

/// Pick the track to display from the tracks of a parsed file
pub fn select_track(tracks: &[gpx::Track], policy: TrackSelection) -> Result<&gpx::Track> {
    match (tracks, policy) {
        ([], _) => Err(RouteError::NoTrack),
        ([track], _) => Ok(track),
        ([first, ..], TrackSelection::First) => {
            tracing::debug!(
                "File has {} tracks, using the first one ({:?})",
                tracks.len(),
                first.name
            );
            Ok(first)
        }
        (_, TrackSelection::RequireSingle) => Err(RouteError::AmbiguousTrack {
            count: tracks.len(),
        }),
    }
}
