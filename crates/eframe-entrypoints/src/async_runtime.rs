//! Async runtime helpers
//!
//! The entry point runs the UI inside a multi-threaded tokio runtime; helpers here
//! spawn background work onto it without the UI code naming tokio directly.

/// Spawn an async task on the current tokio runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    #[cfg(feature = "profiling")]
    {
        tokio::spawn(async move {
            profiling::scope!(
                "async_runtime::spawn",
                format!("task_type={}", std::any::type_name::<F>()).as_str()
            );
            future.await
        })
    }
    #[cfg(not(feature = "profiling"))]
    {
        tokio::spawn(future)
    }
}

/// Check if we're running inside a tokio runtime context.
pub fn in_runtime_context() -> bool {
    tokio::runtime::Handle::try_current().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_runtime_outside_block_on() {
        assert!(!in_runtime_context());
    }

    #[test]
    fn test_spawn_inside_runtime() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let value = rt.block_on(async {
            assert!(in_runtime_context());
            spawn(async { 21 * 2 }).await.unwrap()
        });
        assert_eq!(value, 42);
    }
}
