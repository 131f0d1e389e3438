//! Application module
//!
//! This module provides the main application structure:
//! - Full-screen OpenStreetMap view with the route drawn on top
//! - Top bar with file, zoom and marker controls
//! - A marker that glides to wherever the map is clicked

mod plugin;
pub(crate) mod settings;
mod state;
mod ui_panels;
mod view;

use crate::app::plugin::ScenePlugin;
use crate::app::settings::Settings;
use crate::app::state::AppState;
use eframe::egui;
use gpx_route_lib::Coordinate;
use std::path::PathBuf;
use walkers::{HttpTiles, Map, sources::OpenStreetMap};

const STORAGE_KEY: &str = "persisted_settings";
const ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Persisted settings (no route data, the last file is reloaded instead)
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct PersistedSettings {
    zoom: u8,
    center: Coordinate,
    marker_visible: bool,
    last_file: Option<PathBuf>,
}

impl PersistedSettings {
    fn from_json(json: &str) -> Option<Self> {
        if json.is_empty() {
            return None;
        }
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Discarding unreadable persisted settings: {}", e);
                None
            }
        }
    }
}

/// Main application structure
pub struct RouteViewerApp {
    /// Route session, camera and scene
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles: HttpTiles,

    /// Camera restored from the previous run, applied after the first frame
    restored_view: Option<(Coordinate, u8)>,

    /// Frame clock for the marker animation
    last_frame: instant::Instant,

    /// Build information shown in the top bar
    version: String,
}

impl RouteViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let cli_args = Settings::from_cli();
        let mut state = AppState::new(&cli_args);

        let persisted = if cli_args.ignore_persisted {
            tracing::info!("Ignoring persisted state (--ignore-persisted flag)");
            None
        } else {
            cc.storage
                .and_then(|storage| storage.get_string(STORAGE_KEY))
                .and_then(|json| PersistedSettings::from_json(&json))
        };

        let restored_view = match persisted {
            Some(settings) => {
                tracing::info!("Restored settings from previous session");
                Self::apply_persisted(&mut state, settings)
            }
            None => None,
        };

        Self {
            state,
            tiles: HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone()),
            restored_view,
            last_frame: instant::Instant::now(),
            version: eframe_entrypoints::short_version_info(env!("CARGO_PKG_NAME")),
        }
    }

    /// Apply persisted settings. A file given on the command line wins over the
    /// persisted one, and the persisted camera is only kept without it.
    fn apply_persisted(
        state: &mut AppState,
        settings: PersistedSettings,
    ) -> Option<(Coordinate, u8)> {
        state.set_marker_visible(settings.marker_visible);

        if state.pending_file.is_some() {
            return None;
        }
        if let Some(path) = settings.last_file
            && path.exists()
        {
            state.pending_file = Some(path);
        }
        Some((settings.center.normalize(), settings.zoom))
    }

    fn persisted_settings(&mut self) -> PersistedSettings {
        PersistedSettings {
            zoom: self.state.zoom(),
            center: self.state.center(),
            marker_visible: self.state.session.marker().is_visible(),
            last_file: self.state.loaded_file.clone(),
        }
    }

    fn first_frame(&mut self) {
        self.state.initialize();
        if let Some((center, zoom)) = self.restored_view.take() {
            self.state.set_zoom(zoom);
            self.state.map_memory.center_at(view::to_position(center));
        }
    }
}

#[profiling::all_functions]
impl eframe::App for RouteViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = instant::Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;

        if !self.state.session.is_initialized() {
            self.first_frame();
        }

        // Only tweens started in earlier frames consume this frame's delta
        self.state.advance(dt);

        self.state.process_picked_files();

        ui_panels::render_top_panel(ctx, &mut self.state, &self.version);

        let plugin = ScenePlugin::new(
            self.state.scene.clone(),
            self.state.line_width,
            self.state.map_input.clone(),
        );

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let map = Map::new(
                    Some(&mut self.tiles),
                    &mut self.state.map_memory,
                    self.state.home,
                )
                .with_plugin(plugin);

                ui.add(map);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    ATTRIBUTION,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        self.state.process_map_events();

        if self.state.is_animating() {
            ctx.request_repaint();
        }
        if eframe_entrypoints::file_picker::is_picker_open() {
            // Poll for the chosen file
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = self.persisted_settings();
        match serde_json::to_string(&settings) {
            Ok(json) => {
                storage.set_string(STORAGE_KEY, json);
                tracing::debug!("Saved settings on exit");
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn state() -> AppState {
        AppState::new(&Settings::try_parse_from(["gpx-route-viewer"]).unwrap())
    }

    #[test]
    fn test_persisted_settings_json() {
        let settings = PersistedSettings {
            zoom: 9,
            center: Coordinate::new(48.8566, 2.3522),
            marker_visible: true,
            last_file: Some(PathBuf::from("/tmp/ride.gpx")),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(PersistedSettings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_unreadable_settings_discarded() {
        assert_eq!(PersistedSettings::from_json(""), None);
        assert_eq!(PersistedSettings::from_json("{\"zoom\": \"high\"}"), None);
    }

    #[test]
    fn test_apply_persisted_restores_marker_and_camera() {
        let mut state = state();
        let settings = PersistedSettings {
            zoom: 9,
            center: Coordinate::new(48.8566, 2.3522),
            marker_visible: true,
            last_file: Some(std::env::temp_dir().join("gpx-route-viewer-gone.gpx")),
        };

        let restored = RouteViewerApp::apply_persisted(&mut state, settings);
        assert_eq!(restored, Some((Coordinate::new(48.8566, 2.3522), 9)));
        assert!(state.session.marker().is_visible());
        // Files that no longer exist are not reloaded
        assert!(state.pending_file.is_none());
    }

    #[test]
    fn test_cli_file_wins_over_persisted() {
        let mut state = AppState::new(
            &Settings::try_parse_from(["gpx-route-viewer", "--gpx-file", "cli.gpx"]).unwrap(),
        );
        let settings = PersistedSettings {
            zoom: 9,
            center: Coordinate::new(48.8566, 2.3522),
            marker_visible: false,
            last_file: None,
        };

        assert_eq!(RouteViewerApp::apply_persisted(&mut state, settings), None);
        assert_eq!(state.pending_file, Some(PathBuf::from("cli.gpx")));
    }
}
