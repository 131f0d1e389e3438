//! Application state management
//!
//! Owns the route session together with the camera and scene it draws into,
//! and wires file loading, map input and the marker animation to it.

use crate::app::plugin::{MapInput, SharedMapInput};
use crate::app::settings::Settings;
use crate::app::view::{Scene, WalkersMapView, from_position, to_position};
use gpx_route_lib::{Coordinate, MapView, RouteSession};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use walkers::{MapMemory, Position};

/// Longest frame delta fed to the marker animation
pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// Main application state
pub struct AppState {
    /// Route and click marker
    pub session: RouteSession,

    /// What the map plugin paints
    pub scene: Scene,

    /// Map camera (center, zoom)
    pub map_memory: MapMemory,

    /// Center used while the camera follows no explicit position
    pub home: Position,

    /// Events recorded by the map plugin during the last frame
    pub map_input: SharedMapInput,

    /// Message of the last failed load, shown in the error banner
    pub last_error: Option<String>,

    /// File of the route currently shown
    pub loaded_file: Option<PathBuf>,

    /// File to load once the map is ready
    pub pending_file: Option<PathBuf>,

    /// Track line width in pixels
    pub line_width: f32,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let config = settings.view_config();
        Self {
            home: to_position(config.center),
            session: RouteSession::new(config, settings.track_selection()),
            scene: Scene::default(),
            map_memory: MapMemory::default(),
            map_input: Arc::new(Mutex::new(MapInput::default())),
            last_error: None,
            loaded_file: None,
            pending_file: settings.gpx_file.clone(),
            line_width: 3.0,
        }
    }

    /// Initialize the session on the first frame and load the startup file
    pub fn initialize(&mut self) {
        if self.session.is_initialized() {
            return;
        }
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        self.session.initialize(&mut view);

        if let Some(path) = self.pending_file.take() {
            self.load_gpx_file(path);
        }
    }

    /// Load a GPX file, replacing the shown route on success
    pub fn load_gpx_file(&mut self, path: PathBuf) {
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        match self.session.load_file(&path, &mut view) {
            Ok(_) => {
                self.last_error = None;
                self.loaded_file = Some(path);
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Load files chosen in the file picker
    pub fn process_picked_files(&mut self) {
        for path in eframe_entrypoints::file_picker::drain_file_queue() {
            self.load_gpx_file(path);
        }
    }

    /// Hand the events recorded by the map plugin to the session
    pub fn process_map_events(&mut self) {
        let events = match self.map_input.lock() {
            Ok(mut input) => input.drain(),
            Err(_) => return,
        };

        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        for event in events {
            self.session.handle_event(event, &mut view);
        }
    }

    /// Step the marker animation by the time since the previous frame, capped at
    /// [`MAX_FRAME_DT`]. Call before [`process_map_events`](Self::process_map_events)
    /// so a tween started by this frame's click begins at zero.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        self.session.advance(dt.min(MAX_FRAME_DT), &mut view)
    }

    pub fn is_animating(&self) -> bool {
        self.session.marker().is_animating()
    }

    pub fn set_marker_visible(&mut self, visible: bool) {
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        self.session.set_marker_visible(visible, &mut view);
    }

    pub fn reset_zoom(&mut self) {
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        self.session.reset_zoom(&mut view);
    }

    pub fn fit_route(&mut self) {
        let mut view = WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home);
        if !self.session.fit_route(&mut view) {
            tracing::debug!("No route to fit");
        }
    }

    pub fn zoom(&mut self) -> u8 {
        WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home).zoom()
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        WalkersMapView::new(&mut self.map_memory, &mut self.scene, self.home).set_zoom(zoom);
    }

    /// Current camera center
    pub fn center(&self) -> Coordinate {
        from_position(self.map_memory.detached().unwrap_or(self.home))
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use gpx_route_lib::MapEvent;

    const TWO_POINT_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="51.9" lon="4.0"></trkpt>
      <trkpt lat="52.1" lon="4.2"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    fn state(args: &[&str]) -> AppState {
        let mut argv = vec!["gpx-route-viewer"];
        argv.extend_from_slice(args);
        AppState::new(&Settings::try_parse_from(argv).unwrap())
    }

    fn temp_gpx(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "gpx-route-viewer-{}-{}.gpx",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_initialize_applies_default_view() {
        let mut state = state(&["--zoom", "10"]);
        assert!(!state.session.is_initialized());

        state.initialize();
        assert!(state.session.is_initialized());
        assert_eq!(state.zoom(), 10);
        let center = state.center();
        assert!((center.lat - 52.3676).abs() < 1e-9);
        assert!((center.lon - 4.9041).abs() < 1e-9);
    }

    #[test]
    fn test_startup_file_loaded_on_initialize() {
        let path = temp_gpx("startup", TWO_POINT_GPX);
        let mut state = state(&["--gpx-file", path.to_str().unwrap()]);

        assert!(state.scene.lines().next().is_none());
        state.initialize();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(state.scene.lines().count(), 1);
        assert_eq!(state.loaded_file.as_deref(), Some(path.as_path()));
        assert!(state.last_error.is_none());
        let center = state.center();
        assert!((center.lat - 52.0).abs() < 1e-9);
        assert!((center.lon - 4.1).abs() < 1e-9);
    }

    #[test]
    fn test_failed_load_keeps_previous_route() {
        let path = temp_gpx("keep", TWO_POINT_GPX);
        let mut state = state(&[]);
        state.initialize();
        state.load_gpx_file(path.clone());
        std::fs::remove_file(&path).unwrap();

        let missing = std::env::temp_dir().join("gpx-route-viewer-definitely-missing.gpx");
        state.load_gpx_file(missing);

        let error = state.last_error.clone().unwrap();
        assert!(error.contains("not found"), "unexpected error: {error}");
        assert_eq!(state.loaded_file.as_deref(), Some(path.as_path()));
        assert_eq!(state.scene.lines().count(), 1);

        state.clear_error();
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_click_event_places_marker() {
        let mut state = state(&[]);
        state.initialize();
        state.set_marker_visible(true);

        if let Ok(mut input) = state.map_input.lock() {
            input.push(MapEvent::Clicked(Coordinate::new(52.37, 364.90)));
        }
        state.process_map_events();

        let marker = state.scene.marker().unwrap();
        assert!((marker.lon - 4.90).abs() < 1e-9);
        assert!(!state.advance(Duration::from_millis(16)));
    }

    #[test]
    fn test_hidden_marker_ignores_clicks() {
        let mut state = state(&[]);
        state.initialize();

        if let Ok(mut input) = state.map_input.lock() {
            input.push(MapEvent::Clicked(Coordinate::new(52.37, 4.90)));
        }
        state.process_map_events();
        assert!(state.scene.marker().is_none());
    }

    #[test]
    fn test_marker_animates_to_second_click() {
        let mut state = state(&[]);
        state.initialize();
        state.set_marker_visible(true);

        for target in [Coordinate::new(52.0, 4.0), Coordinate::new(52.2, 4.2)] {
            if let Ok(mut input) = state.map_input.lock() {
                input.push(MapEvent::Clicked(target));
            }
            state.process_map_events();
        }
        assert_eq!(state.scene.marker(), Some(Coordinate::new(52.0, 4.0)));

        for _ in 0..5 {
            assert!(state.advance(MAX_FRAME_DT));
        }
        let halfway = state.scene.marker().unwrap();
        assert!((halfway.lat - 52.1).abs() < 1e-9);

        for _ in 0..5 {
            state.advance(MAX_FRAME_DT);
        }
        assert!(!state.is_animating());
        assert_eq!(state.scene.marker(), Some(Coordinate::new(52.2, 4.2)));
    }

    /// One `update()`: advance by the frame delta, then handle the frame's events
    fn frame(state: &mut AppState, dt: Duration, click: Option<Coordinate>) {
        state.advance(dt);
        if let Some(target) = click
            && let Ok(mut input) = state.map_input.lock()
        {
            input.push(MapEvent::Clicked(target));
        }
        state.process_map_events();
    }

    #[test]
    fn test_idle_time_before_click_not_charged_to_animation() {
        let mut state = state(&[]);
        state.initialize();
        state.set_marker_visible(true);
        frame(&mut state, Duration::from_millis(16), Some(Coordinate::new(52.0, 4.0)));

        // Two seconds idle, then press and release arrive in the same frame
        frame(&mut state, Duration::from_secs(2), Some(Coordinate::new(52.2, 4.2)));
        assert!(state.is_animating());
        assert_eq!(state.scene.marker(), Some(Coordinate::new(52.0, 4.0)));

        frame(&mut state, Duration::from_millis(16), None);
        assert!(state.is_animating());
        let marker = state.scene.marker().unwrap();
        assert!(marker.lat > 52.0 && marker.lat < 52.01);
    }

    #[test]
    fn test_long_frame_delta_is_capped() {
        let mut state = state(&[]);
        state.initialize();
        state.set_marker_visible(true);
        frame(&mut state, Duration::ZERO, Some(Coordinate::new(52.0, 4.0)));
        frame(&mut state, Duration::ZERO, Some(Coordinate::new(53.0, 4.0)));

        // A stalled frame moves the marker by at most one capped step
        frame(&mut state, Duration::from_secs(5), None);
        assert!(state.is_animating());
        let marker = state.scene.marker().unwrap();
        assert!((marker.lat - 52.1).abs() < 1e-9);
    }
}
