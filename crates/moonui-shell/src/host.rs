//! Traits the host environment implements for the shell.
//!
//! The browser bindings implement these against `window`, `sessionStorage`
//! and the DOM; tests use the in-memory versions.

use std::collections::HashMap;

/// Measures the current viewport width.
pub trait ViewportProbe {
    /// Width in CSS pixels, or `None` when there is no display surface.
    fn width(&self) -> Option<f64>;
}

impl ViewportProbe for Option<f64> {
    fn width(&self) -> Option<f64> {
        *self
    }
}

impl ViewportProbe for f64 {
    fn width(&self) -> Option<f64> {
        Some(*self)
    }
}

/// A session-scoped string key/value store.
pub trait SessionStore {
    /// Read a value. Unavailable storage reads as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Errors a session store may report on write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session storage is unavailable")]
    Unavailable,

    #[error("Session storage rejected write: {0}")]
    Rejected(String),
}

/// In-memory session store.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Suppresses scrolling of the page behind an overlay.
pub trait ScrollLock {
    fn set_locked(&mut self, locked: bool);
}

impl ScrollLock for bool {
    fn set_locked(&mut self, locked: bool) {
        *self = locked;
    }
}

/// A scrollable region whose vertical offset can be read and written.
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&mut self, offset: f64);
}
