//! Map view adapter over walkers
//!
//! [`WalkersMapView`] implements the session's [`MapView`] seam on top of a
//! `walkers::MapMemory` (camera) and a [`Scene`] (what the plugin paints).

use gpx_route_lib::{Coordinate, CoordinateLine, Extent, LineId, MapView};
use walkers::{MapMemory, Position};

/// Everything drawn on top of the map tiles
#[derive(Default, Clone)]
pub struct Scene {
    lines: Vec<(LineId, CoordinateLine)>,
    marker: Option<Coordinate>,
    next_line_id: u64,
}

impl Scene {
    pub fn lines(&self) -> impl Iterator<Item = &CoordinateLine> {
        self.lines.iter().map(|(_, line)| line)
    }

    pub fn marker(&self) -> Option<Coordinate> {
        self.marker
    }
}

pub fn to_position(coordinate: Coordinate) -> Position {
    walkers::lat_lon(coordinate.lat, coordinate.lon)
}

pub fn from_position(position: Position) -> Coordinate {
    Coordinate::new(position.y(), position.x())
}

/// Borrowed view over the camera and scene for one frame
pub struct WalkersMapView<'a> {
    memory: &'a mut MapMemory,
    scene: &'a mut Scene,
    /// Position the map centers on while not detached
    home: Position,
}

impl<'a> WalkersMapView<'a> {
    pub fn new(memory: &'a mut MapMemory, scene: &'a mut Scene, home: Position) -> Self {
        Self {
            memory,
            scene,
            home,
        }
    }

    fn apply_zoom(&mut self, zoom: f64) {
        if self.memory.set_zoom(zoom).is_err() {
            tracing::warn!("Zoom level {zoom} rejected by the map");
        }
    }
}

impl MapView for WalkersMapView<'_> {
    fn add_line(&mut self, line: CoordinateLine) -> LineId {
        let id = LineId(self.scene.next_line_id);
        self.scene.next_line_id += 1;
        self.scene.lines.push((id, line));
        id
    }

    fn remove_line(&mut self, id: LineId) {
        self.scene.lines.retain(|(line_id, _)| *line_id != id);
    }

    fn set_extent(&mut self, extent: Extent) {
        self.memory.center_at(to_position(extent.center()));
        self.apply_zoom(extent.fit_zoom());
        tracing::trace!(
            "Fitted to extent ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom: {:.1}",
            extent.min_lat(),
            extent.min_lon(),
            extent.max_lat(),
            extent.max_lon(),
            extent.fit_zoom()
        );
    }

    fn add_marker(&mut self, position: Coordinate) {
        self.scene.marker = Some(position);
    }

    fn move_marker(&mut self, position: Coordinate) {
        if self.scene.marker.is_some() {
            self.scene.marker = Some(position);
        }
    }

    fn remove_marker(&mut self) {
        self.scene.marker = None;
    }

    fn zoom(&self) -> u8 {
        self.memory.zoom().round().clamp(0.0, f64::from(u8::MAX)) as u8
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.apply_zoom(f64::from(zoom));
    }

    fn center(&self) -> Coordinate {
        from_position(self.memory.detached().unwrap_or(self.home))
    }

    fn set_center(&mut self, center: Coordinate) {
        self.memory.center_at(to_position(center));
    }
}
