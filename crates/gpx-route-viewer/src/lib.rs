//! GPX Route Viewer - Application Library
//!
//! Integrates the route model from `gpx-route-lib` with a walkers map and the
//! shared native entry point.

mod app;

pub use app::RouteViewerApp;

eframe_entrypoints::eframe_app!("GPX Route Viewer", |cc| Box::new(RouteViewerApp::new(cc)));
