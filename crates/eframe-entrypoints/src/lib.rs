//! Native entry point system for egui/eframe applications
//!
//! This crate provides the desktop entry point along with utilities for CLI parsing,
//! logging setup, build metadata and a non-blocking file picker.
//!
//! # Usage
//!
//! In your application's `lib.rs`, use the `eframe_app!` macro to define the entry point:
//!
//! ```ignore
//! eframe_entrypoints::eframe_app!(
//!     "My App Name",
//!     |cc| Box::new(MyApp::new(cc))
//! );
//! ```
//!
//! In your `main.rs`:
//!
//! ```ignore
//! fn main() {
//!     my_app::run_native();
//! }
//! ```

pub mod async_runtime;
pub mod cli;
pub mod file_picker;
pub mod logging;

mod metadata;

// Re-export commonly used types
pub use cli::parse_args_or_exit;
pub use logging::setup_logging;
pub use metadata::{log_version_info, short_version_info};

// Re-exports used by the generated entry point
pub use eframe;
pub use eframe::CreationContext;
pub use tokio;

/// Define the native entry point for an eframe application.
///
/// # Arguments
///
/// * `$app_name` - A string literal with the application name (window title, logging)
/// * `$app_creator` - A closure that takes `&CreationContext` and returns `Box<dyn eframe::App>`
///
/// # Generated Code
///
/// ```ignore
/// pub fn run_native() { ... }  // Call this from main.rs
/// ```
#[macro_export]
macro_rules! eframe_app {
    ($app_name:expr, $app_creator:expr) => {
        /// Run the application on native (desktop) platforms.
        ///
        /// Call this from your `main.rs`:
        /// ```ignore
        /// fn main() {
        ///     my_app::run_native();
        /// }
        /// ```
        pub fn run_native() {
            let rt = match $crate::tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create Tokio runtime: {e}");
                    return;
                }
            };

            rt.block_on(async {
                $crate::native_main_impl($app_name, $app_creator).await;
            });
        }
    };
}

/// Internal implementation for the native entry point.
/// Use the `eframe_app!` macro instead of calling this directly.
#[doc(hidden)]
pub async fn native_main_impl(
    app_name: &str,
    app_creator: impl FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App>,
) {
    // Must run before anything logs
    logging::setup_logging();

    log_version_info(app_name);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(app_name),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        app_name,
        native_options,
        Box::new(move |cc| Ok(app_creator(cc))),
    ) {
        tracing::error!("{} exited with an error: {}", app_name, e);
    }
}
