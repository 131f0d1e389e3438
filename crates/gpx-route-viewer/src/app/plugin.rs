//! Walkers plugin for drawing the route scene and capturing map input
//!
//! The plugin paints the route lines and the click marker, and turns pointer
//! interaction on the map into [`MapEvent`]s which the app drains after the map
//! has been laid out.

use crate::app::view::{Scene, from_position, to_position};
use egui::{Color32, PointerButton, Pos2, Stroke};
use gpx_route_lib::{Extent, MapEvent};
use std::sync::{Arc, Mutex};
use walkers::{Plugin, Projector};

const MARKER_COLOR: Color32 = Color32::from_rgb(255, 140, 0);
const MARKER_RADIUS: f32 = 7.0;
const SELECTION_FILL: Color32 = Color32::from_rgba_premultiplied(40, 40, 80, 40);

/// Input captured while the map was painted
#[derive(Default)]
pub struct MapInput {
    events: Vec<MapEvent>,
    /// Screen position where a secondary-button drag started
    selection_start: Option<Pos2>,
}

impl MapInput {
    pub fn push(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }
}

pub type SharedMapInput = Arc<Mutex<MapInput>>;

/// Plugin rendering the scene for one frame
pub struct ScenePlugin {
    scene: Scene,
    line_width: f32,
    input: SharedMapInput,
}

impl ScenePlugin {
    pub fn new(scene: Scene, line_width: f32, input: SharedMapInput) -> Self {
        Self {
            scene,
            line_width,
            input,
        }
    }

    fn screen_pos(projector: &Projector, position: walkers::Position) -> Pos2 {
        let screen_vec = projector.project(position);
        Pos2::new(screen_vec.x, screen_vec.y)
    }

    fn render_lines(&self, projector: &Projector, painter: &egui::Painter) {
        for line in self.scene.lines().filter(|line| line.visible) {
            let [r, g, b] = line.color;
            let stroke = Stroke::new(self.line_width, Color32::from_rgb(r, g, b));

            let screen_points: Vec<Pos2> = line
                .coordinates
                .iter()
                .map(|c| Self::screen_pos(projector, to_position(*c)))
                .collect();

            match screen_points.as_slice() {
                [] => {}
                [single] => {
                    painter.circle_filled(*single, self.line_width, stroke.color);
                }
                _ => {
                    painter.add(egui::Shape::line(screen_points, stroke));
                }
            }
        }
    }

    fn render_marker(&self, projector: &Projector, painter: &egui::Painter) {
        if let Some(marker) = self.scene.marker() {
            let screen_pos = Self::screen_pos(projector, to_position(marker));
            painter.circle_filled(screen_pos, MARKER_RADIUS, MARKER_COLOR);
            painter.circle_stroke(screen_pos, MARKER_RADIUS, Stroke::new(1.5, Color32::WHITE));
        }
    }

    /// Record clicks and secondary-button extent selections
    fn capture_input(
        &self,
        response: &egui::Response,
        projector: &Projector,
        painter: &egui::Painter,
    ) {
        let Ok(mut input) = self.input.lock() else {
            tracing::warn!("Map input lock poisoned, dropping this frame's input");
            return;
        };

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let position = projector.unproject(pos.to_vec2());
            input.push(MapEvent::Clicked(from_position(position)));
        }

        if response.drag_started_by(PointerButton::Secondary) {
            input.selection_start = response.interact_pointer_pos();
        }

        let Some(start) = input.selection_start else {
            return;
        };
        let Some(current) = response.interact_pointer_pos() else {
            return;
        };

        if response.dragged_by(PointerButton::Secondary) {
            let rect = egui::Rect::from_two_pos(start, current);
            painter.rect_filled(rect, 0.0, SELECTION_FILL);
            painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(1.0, Color32::DARK_BLUE),
                egui::StrokeKind::Middle,
            );
        }

        if response.drag_stopped_by(PointerButton::Secondary) {
            input.selection_start = None;
            if start.distance(current) > 4.0 {
                let a = from_position(projector.unproject(start.to_vec2()));
                let b = from_position(projector.unproject(current.to_vec2()));
                input.push(MapEvent::ExtentChanged(Extent::from_corners(
                    a.normalize(),
                    b.normalize(),
                )));
            }
        }
    }
}

impl Plugin for ScenePlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("ScenePlugin::run");

        let painter = ui.painter().with_clip_rect(response.rect);
        self.render_lines(projector, &painter);
        self.render_marker(projector, &painter);
        self.capture_input(response, projector, &painter);
    }
}
