//! UI panels for the application
//!
//! A top bar with the map controls and a dismissible banner for load errors.

use crate::app::state::AppState;
use eframe_entrypoints::file_picker::{self, FileFilter, PickerError};
use egui::{Color32, RichText, Ui};

const MIN_ZOOM: u8 = 1;
const MAX_ZOOM: u8 = 19;

/// Render the top control bar
pub fn render_top_panel(ctx: &egui::Context, state: &mut AppState, version: &str) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // Controls stay disabled until the map has been initialized
            let enabled = state.session.is_initialized();
            ui.add_enabled_ui(enabled, |ui| {
                render_controls(ui, state);
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new("ℹ").weak()).on_hover_text(version);
                if let Some(path) = &state.loaded_file {
                    ui.label(RichText::new(path.display().to_string()).small().weak());
                }
            });
        });
    });

    if state.last_error.is_some() {
        render_error_banner(ctx, state);
    }
}

fn render_controls(ui: &mut Ui, state: &mut AppState) {
    let picker_open = file_picker::is_picker_open();
    if ui
        .add_enabled(!picker_open, egui::Button::new("📂 Open GPX…"))
        .on_hover_text("Choose a GPX file to display")
        .clicked()
    {
        open_picker(state);
    }

    ui.separator();

    let default_zoom = state.session.config().zoom;
    if ui
        .button(format!("🔍 {default_zoom}"))
        .on_hover_text("Reset to the default zoom level")
        .clicked()
    {
        state.reset_zoom();
    }

    let mut zoom = state.zoom();
    if ui
        .add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom"))
        .changed()
    {
        state.set_zoom(zoom);
    }

    ui.separator();

    let has_route = state.session.route().is_some();
    if ui
        .add_enabled(has_route, egui::Button::new("🎯 Fit route"))
        .on_hover_text("Zoom to the whole route")
        .clicked()
    {
        state.fit_route();
    }

    let mut marker_visible = state.session.marker().is_visible();
    if ui
        .checkbox(&mut marker_visible, "Show marker")
        .on_hover_text("Place a marker where you click on the map")
        .changed()
    {
        state.set_marker_visible(marker_visible);
    }

    if let Some(route) = state.session.route() {
        ui.separator();
        ui.label(format!("{} points", route.len()));
    }
}

fn open_picker(state: &mut AppState) {
    match file_picker::open_file_picker(Some(FileFilter::new("GPX files", "gpx"))) {
        Ok(()) => {}
        Err(PickerError::AlreadyOpen) => {
            tracing::debug!("File picker already open");
        }
        Err(e) => {
            tracing::warn!("Could not open file picker: {}", e);
            state.last_error = Some(e.to_string());
        }
    }
}

fn render_error_banner(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.last_error.clone() else {
        return;
    };

    egui::TopBottomPanel::top("error_banner")
        .frame(
            egui::Frame::new()
                .fill(Color32::from_rgb(120, 30, 30))
                .inner_margin(egui::Margin::symmetric(8, 4)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("⚠ {message}")).color(Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        state.clear_error();
                    }
                });
            });
        });
}
