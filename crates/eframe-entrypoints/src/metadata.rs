use shadow_rs::shadow;

shadow!(build);

/// Log version info through `tracing`.
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info(app_name: &str) {
    tracing::info!("{}", short_version_info(app_name));
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

/// One-line `name (branch@commit)` summary of the current build
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn short_version_info(app_name: &str) -> String {
    format!(
        "{} ({}@{}{})",
        app_name,
        build::BRANCH,
        build::SHORT_COMMIT,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}
