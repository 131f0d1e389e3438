//! Route session: the state a UI keeps for the one displayed route
//!
//! The session owns the current [`RouteData`] and the [`ClickMarker`] and talks to
//! the map widget only through the [`MapView`] trait. Map interactions arrive as
//! [`MapEvent`] values and are dispatched by [`RouteSession::handle_event`].

use crate::{
    ClickMarker, ClickOutcome, Coordinate, Extent, Result, RouteData, TrackSelection, load_route,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Orange-red
pub const ROUTE_COLOR: [u8; 3] = [255, 69, 0];

/// Handle of a line added to a [`MapView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub u64);

/// A polyline handed to the map view
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateLine {
    pub coordinates: Arc<[Coordinate]>,
    /// RGB
    pub color: [u8; 3],
    pub visible: bool,
}

impl CoordinateLine {
    pub fn new(coordinates: Arc<[Coordinate]>, color: [u8; 3]) -> Self {
        Self {
            coordinates,
            color,
            visible: true,
        }
    }
}

/// Operations the session needs from the map widget
pub trait MapView {
    fn add_line(&mut self, line: CoordinateLine) -> LineId;
    fn remove_line(&mut self, id: LineId);
    /// Fit the viewport to the extent
    fn set_extent(&mut self, extent: Extent);
    fn add_marker(&mut self, position: Coordinate);
    fn move_marker(&mut self, position: Coordinate);
    fn remove_marker(&mut self);
    fn zoom(&self) -> u8;
    fn set_zoom(&mut self, zoom: u8);
    fn center(&self) -> Coordinate;
    fn set_center(&mut self, center: Coordinate);
}

/// Incoming map interactions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// The map was clicked at this position
    Clicked(Coordinate),
    /// The user selected a new extent on the map
    ExtentChanged(Extent),
}

/// Startup view and styling
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub center: Coordinate,
    pub zoom: u8,
    pub route_color: [u8; 3],
    pub animation_duration: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            // Amsterdam
            center: Coordinate::new(52.3676, 4.9041),
            zoom: 14,
            route_color: ROUTE_COLOR,
            animation_duration: crate::ANIMATION_DURATION,
        }
    }
}

/// State of the displayed route and click marker
pub struct RouteSession {
    config: ViewConfig,
    selection: TrackSelection,
    route: Option<RouteData>,
    /// Line currently drawn for `route`
    line: Option<LineId>,
    marker: ClickMarker,
    initialized: bool,
}

impl RouteSession {
    pub fn new(config: ViewConfig, selection: TrackSelection) -> Self {
        let marker = ClickMarker::new(config.animation_duration);
        Self {
            config,
            selection,
            route: None,
            line: None,
            marker,
            initialized: false,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn route(&self) -> Option<&RouteData> {
        self.route.as_ref()
    }

    pub fn marker(&self) -> &ClickMarker {
        &self.marker
    }

    /// Whether [`initialize`](Self::initialize) has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Finish setup once the map widget is ready.
    ///
    /// Applies the default zoom and center, then draws and fits a route that was
    /// loaded before the map existed.
    pub fn initialize(&mut self, view: &mut impl MapView) {
        if self.initialized {
            return;
        }
        tracing::debug!("Map initialized, setting center and enabling controls");
        view.set_zoom(self.config.zoom);
        view.set_center(self.config.center);
        self.initialized = true;

        if let Some(route) = &self.route {
            self.line = Some(Self::draw_route(route, self.config.route_color, view));
        }
        if self.marker.is_visible()
            && let Some(position) = self.marker.position()
        {
            view.add_marker(position);
        }
    }

    /// Load a GPX file and show its route.
    ///
    /// On failure the previously shown route stays untouched.
    pub fn load_file(&mut self, path: &Path, view: &mut impl MapView) -> Result<&RouteData> {
        profiling::scope!("RouteSession::load_file");

        match load_route(path, self.selection) {
            Ok(route) => {
                tracing::info!("Loaded {} ({} points)", path.display(), route.len());
                Ok(self.show_route(route, view))
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Replace the current route. The old line is removed before the new one is added.
    pub fn show_route(&mut self, route: RouteData, view: &mut impl MapView) -> &RouteData {
        if let Some(id) = self.line.take() {
            view.remove_line(id);
        }
        if self.initialized {
            self.line = Some(Self::draw_route(&route, self.config.route_color, view));
        }
        self.route.insert(route)
    }

    /// Add the route line and fit the view to it
    fn draw_route(route: &RouteData, color: [u8; 3], view: &mut impl MapView) -> LineId {
        let id = view.add_line(CoordinateLine::new(route.shared_coordinates(), color));
        view.set_extent(route.extent());
        id
    }

    /// Dispatch a map interaction
    pub fn handle_event(&mut self, event: MapEvent, view: &mut impl MapView) {
        match event {
            MapEvent::Clicked(position) => self.on_click(position.normalize(), view),
            MapEvent::ExtentChanged(extent) => view.set_extent(extent),
        }
    }

    fn on_click(&mut self, position: Coordinate, view: &mut impl MapView) {
        match self.marker.click(position) {
            ClickOutcome::Ignored => {}
            ClickOutcome::Placed(position) => {
                tracing::trace!("Click marker placed at {:?}", position);
                view.add_marker(position);
            }
            ClickOutcome::Animating { from, to } => {
                tracing::trace!("Click marker moving {:?} -> {:?}", from, to);
            }
        }
    }

    /// Advance the marker tween by one frame. Returns whether it is still running.
    pub fn advance(&mut self, dt: Duration, view: &mut impl MapView) -> bool {
        if let Some(position) = self.marker.advance(dt) {
            view.move_marker(position);
        }
        self.marker.is_animating()
    }

    pub fn set_marker_visible(&mut self, visible: bool, view: &mut impl MapView) {
        if visible == self.marker.is_visible() {
            return;
        }
        self.marker.set_visible(visible);
        if !self.initialized {
            return;
        }

        match (visible, self.marker.position()) {
            (true, Some(position)) => view.add_marker(position),
            (false, Some(_)) => view.remove_marker(),
            (_, None) => {}
        }
    }

    /// Back to the default zoom level
    pub fn reset_zoom(&self, view: &mut impl MapView) {
        view.set_zoom(self.config.zoom);
    }

    /// Fit the view to the current route. Returns false if there is none.
    pub fn fit_route(&self, view: &mut impl MapView) -> bool {
        match &self.route {
            Some(route) => {
                view.set_extent(route.extent());
                true
            }
            None => false,
        }
    }
}
