//! Per-session analysis state
//!
//! Each camera stream gets its own [`SessionState`] behind a tokio `Mutex`;
//! the mutex is fair, so frames from one client are scored in arrival order
//! even when the client pipelines requests.

use face_analysis::SessionState;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// Registry mapping session ids to their rolling analysis state.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionState>>>>,
    window_capacity: usize,
}

impl SessionRegistry {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            window_capacity,
        }
    }

    /// Fetch the state for a session, creating it on first sight.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<SessionState>> {
        if let Ok(map) = self.sessions.read() {
            if let Some(state) = map.get(session_id) {
                return Arc::clone(state);
            }
        }
        let mut map = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            map.entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(SessionState::new(self.window_capacity)))),
        )
    }

    /// Drop a session's state, returning whether it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut map = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        map.remove(session_id).is_some()
    }

    pub fn count(&self) -> usize {
        self.sessions
            .read()
            .map(|map| map.len())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_reuses_state() {
        let registry = SessionRegistry::new(10);
        let a = registry.get_or_create("cam-1");
        let b = registry.get_or_create("cam-1");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(10);
        let a = registry.get_or_create("cam-1");
        let b = registry.get_or_create("cam-2");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_remove() {
        let registry = SessionRegistry::new(10);
        registry.get_or_create("cam-1");
        assert!(registry.remove("cam-1"));
        assert!(!registry.remove("cam-1"));
        assert_eq!(registry.count(), 0);
    }
}
