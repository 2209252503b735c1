//! Shared server state: configuration plus the per-file lock registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ServerConfig;

/// Immutable after construction apart from the lock registry. Every tool
/// call holds its file's lock across the full open-mutate-save sequence, so
/// concurrent calls against the same workbook serialize instead of racing
/// on the file.
pub struct AppState {
    config: Arc<ServerConfig>,
    path_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            path_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn resolve_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.config.resolve_path(relative)
    }

    /// The mutex guarding the given resolved path. Entries nobody holds
    /// anymore are evicted on the way in, so the registry tracks the set of
    /// in-flight paths rather than every path ever touched.
    pub fn lock_for(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.path_locks.lock();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    fn lock_registry_len(&self) -> usize {
        self.path_locks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliArgs, ServerConfig};

    fn test_state() -> AppState {
        let config = ServerConfig::from_args(CliArgs::default()).unwrap();
        AppState::new(Arc::new(config))
    }

    #[test]
    fn same_path_yields_same_lock() {
        let state = test_state();
        let a = state.lock_for(Path::new("/tmp/book.xlsx"));
        let b = state.lock_for(Path::new("/tmp/book.xlsx"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_paths_yield_distinct_locks() {
        let state = test_state();
        let a = state.lock_for(Path::new("/tmp/a.xlsx"));
        let b = state.lock_for(Path::new("/tmp/b.xlsx"));
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn released_locks_are_evicted_from_the_registry() {
        let state = test_state();
        let held = state.lock_for(Path::new("/tmp/held.xlsx"));
        drop(state.lock_for(Path::new("/tmp/released.xlsx")));
        let other = state.lock_for(Path::new("/tmp/other.xlsx"));
        assert_eq!(state.lock_registry_len(), 2);
        drop(held);
        drop(other);
    }
}
