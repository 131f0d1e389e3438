//! Non-blocking native file picker.
//!
//! `open_file_picker(...)` shows an `rfd` dialog from a task on the async runtime
//! so the UI keeps painting while the dialog is open. Chosen paths land in a
//! shared queue; the UI calls `drain_file_queue()` once per frame to pick them up.
//! Closing the dialog without a selection enqueues nothing.

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared queue of picked file paths.
static QUEUE: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Set while a dialog is on screen, so repeated clicks do not stack dialogs.
static DIALOG_OPEN: AtomicBool = AtomicBool::new(false);

/// Error opening the picker
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    #[error("a file dialog is already open")]
    AlreadyOpen,
    #[error("no async runtime available for the file dialog")]
    NoRuntime,
}

/// Clears [`DIALOG_OPEN`] when the dialog task ends, including by panic.
struct DialogOpenGuard;

impl Drop for DialogOpenGuard {
    fn drop(&mut self) {
        DIALOG_OPEN.store(false, Ordering::Release);
    }
}

/// Filter the dialog by extension, e.g. `FileFilter::new("GPX files", "gpx")`
#[derive(Debug, Clone)]
pub struct FileFilter {
    pub name: String,
    pub extension: String,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }
}

async fn open_file_picker_async(filter: Option<FileFilter>) {
    let _guard = DialogOpenGuard;
    let mut dialog = rfd::AsyncFileDialog::new();
    if let Some(filter) = &filter {
        dialog = dialog.add_filter(filter.name.as_str(), &[filter.extension.as_str()]);
    }

    match dialog.pick_file().await {
        Some(handle) => {
            let path = handle.path().to_path_buf();
            tracing::debug!("Picked {}", path.display());
            enqueue(path);
        }
        None => tracing::debug!("File dialog closed without a selection"),
    }
}

/// Show the dialog without blocking the caller.
pub fn open_file_picker(filter: Option<FileFilter>) -> Result<(), PickerError> {
    if !crate::async_runtime::in_runtime_context() {
        return Err(PickerError::NoRuntime);
    }
    if DIALOG_OPEN.swap(true, Ordering::AcqRel) {
        return Err(PickerError::AlreadyOpen);
    }
    crate::async_runtime::spawn(open_file_picker_async(filter));
    Ok(())
}

/// Whether a dialog is currently on screen
pub fn is_picker_open() -> bool {
    DIALOG_OPEN.load(Ordering::Acquire)
}

fn enqueue(path: PathBuf) {
    match QUEUE.lock() {
        Ok(mut guard) => guard.push(path),
        Err(poisoned) => poisoned.into_inner().push(path),
    }
}

/// Take every path picked since the last call.
pub fn drain_file_queue() -> Vec<PathBuf> {
    match QUEUE.lock() {
        Ok(mut guard) => guard.drain(..).collect(),
        Err(poisoned) => poisoned.into_inner().drain(..).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_round_trip() {
        enqueue(PathBuf::from("a.gpx"));
        enqueue(PathBuf::from("b.gpx"));
        let drained = drain_file_queue();
        assert!(drained.ends_with(&[PathBuf::from("a.gpx"), PathBuf::from("b.gpx")]));
        assert!(drain_file_queue().is_empty());
    }

    #[test]
    fn test_guard_clears_flag_on_panic() {
        DIALOG_OPEN.store(true, Ordering::Release);
        let result = std::panic::catch_unwind(|| {
            let _guard = DialogOpenGuard;
            panic!("dialog task failed");
        });
        assert!(result.is_err());
        assert!(!is_picker_open());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PickerError::AlreadyOpen.to_string(),
            "a file dialog is already open"
        );
        assert!(PickerError::NoRuntime.to_string().contains("runtime"));
    }

    #[test]
    fn test_open_without_runtime_fails() {
        assert_eq!(
            open_file_picker(Some(FileFilter::new("GPX files", "gpx"))),
            Err(PickerError::NoRuntime)
        );
    }
}
