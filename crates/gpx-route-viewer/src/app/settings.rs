use clap::{Parser, ValueEnum};
use eframe_entrypoints::parse_args_or_exit;
use gpx_route_lib::{Coordinate, TrackSelection, ViewConfig};
use std::path::PathBuf;

/// Track selection policy as spelled on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrackSelectionArg {
    /// Show the first track of multi-track files
    First,
    /// Reject files that do not contain exactly one track
    Single,
}

impl From<TrackSelectionArg> for TrackSelection {
    fn from(arg: TrackSelectionArg) -> Self {
        match arg {
            TrackSelectionArg::First => TrackSelection::First,
            TrackSelectionArg::Single => TrackSelection::RequireSingle,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPX Route Viewer - A desktop map that draws a GPX track and follows your clicks with a marker
pub struct Settings {
    /// GPX file to load on startup
    #[clap(short, long, value_name = "FILE")]
    pub gpx_file: Option<PathBuf>,

    /// Default zoom level, also used by the zoom reset button
    #[clap(short, long, default_value = "14", value_parser = clap::value_parser!(u8).range(1..=19))]
    pub zoom: u8,

    /// Latitude of the initial map center
    #[clap(long, default_value = "52.3676", allow_hyphen_values = true)]
    pub center_lat: f64,

    /// Longitude of the initial map center
    #[clap(long, default_value = "4.9041", allow_hyphen_values = true)]
    pub center_lon: f64,

    /// What to do with files that contain more than one track
    #[clap(long, value_enum, default_value = "first")]
    pub track_selection: TrackSelectionArg,

    /// Ignore previously persisted state and start fresh
    #[clap(long, default_value = "false")]
    pub ignore_persisted: bool,
}

impl Settings {
    pub fn from_cli() -> Self {
        parse_args_or_exit::<Settings>()
    }

    /// Session configuration derived from the command line
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            center: Coordinate::new(self.center_lat, self.center_lon).normalize(),
            zoom: self.zoom,
            ..ViewConfig::default()
        }
    }

    pub fn track_selection(&self) -> TrackSelection {
        self.track_selection.into()
    }
}
