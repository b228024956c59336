//! Route navigation

use parking_lot::Mutex;
use std::sync::Arc;

/// Reads and changes the current route
pub trait Navigator: Send {
    /// Current route path
    fn path(&self) -> String;

    /// Navigate to `route`
    fn set_path(&self, route: &str);
}

/// Whether `path` is `route` itself or one of its sub-routes
///
/// `/safe/1/history` is within `/safe/1`; `/safe/10` is not.
pub fn is_within_route(path: &str, route: &str) -> bool {
    let route = route.trim_end_matches('/');
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Navigator that keeps the route in memory
///
/// Clones share the same route, so the host can read what the controller set.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    path: Arc<Mutex<String>>,
}

impl MemoryNavigator {
    /// Start at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Mutex::new(path.into())),
        }
    }
}

impl Navigator for MemoryNavigator {
    fn path(&self) -> String {
        self.path.lock().clone()
    }

    fn set_path(&self, route: &str) {
        tracing::debug!("Navigating to {}", route);
        *self.path.lock() = route.to_string();
    }
}
