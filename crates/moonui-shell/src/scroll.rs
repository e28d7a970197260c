//! Panel scroll memory across navigations.
//!
//! The offset lives in a single session slot shared by every page, so moving
//! between two pages carries over whichever offset was saved last. There is
//! no per-route memory.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::host::{ScrollSurface, SessionStore};

/// Session key holding the panel offset.
pub const SCROLL_STORAGE_KEY: &str = "sidebar-scroll-position";

/// Delay before a restored offset is applied, giving layout time to settle.
pub const RESTORE_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Vertical scroll offset of the panel in CSS pixels. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScrollOffset(f64);

impl ScrollOffset {
    pub const TOP: ScrollOffset = ScrollOffset(0.0);

    /// Returns `None` for negative or non-finite values.
    pub fn new(px: f64) -> Option<Self> {
        (px.is_finite() && px >= 0.0).then_some(Self(px))
    }

    /// Read the current offset of a surface, clamping overscroll to zero.
    pub fn of(surface: &impl ScrollSurface) -> Self {
        Self::new(surface.scroll_top().max(0.0)).unwrap_or(Self::TOP)
    }

    /// Parse a stored value. Fractions are truncated to whole pixels.
    pub fn parse(raw: &str) -> Option<Self> {
        let px: f64 = raw.trim().parse().ok()?;
        Self::new(px.trunc())
    }

    pub fn px(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session-scoped single-slot offset store.
#[derive(Debug)]
pub struct ScrollPositionStore<S: SessionStore> {
    store: S,
    key: String,
}

impl<S: SessionStore> ScrollPositionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SCROLL_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrite the slot. Storage failures are logged and otherwise ignored.
    pub fn save(&mut self, offset: ScrollOffset) {
        match self.store.set(&self.key, &offset.to_string()) {
            Ok(()) => debug!(offset = offset.px(), "saved panel scroll offset"),
            Err(e) => debug!("could not save panel scroll offset: {}", e),
        }
    }

    /// Read the slot. Absent or unparseable values yield `None`.
    pub fn restore(&self) -> Option<ScrollOffset> {
        self.store.get(&self.key).and_then(|raw| ScrollOffset::parse(&raw))
    }
}

/// A restore waiting for layout to settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRestore {
    pub offset: ScrollOffset,
    generation: u64,
}

/// Tracks panel mounts so deferred restores never touch a detached panel.
#[derive(Debug, Default)]
pub struct PanelScrollTracker {
    generation: u64,
    mounted: bool,
    route: Option<String>,
}

impl PanelScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a panel mount on `route` and schedule a restore if one is saved.
    pub fn mount<S: SessionStore>(
        &mut self,
        route: &str,
        store: &ScrollPositionStore<S>,
    ) -> Option<PendingRestore> {
        self.generation += 1;
        self.mounted = true;
        self.route = Some(route.to_string());
        self.schedule(store)
    }

    /// Record that the panel went away. Any pending restore becomes stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    /// Save the current offset ahead of a page unload or link navigation.
    pub fn save_before_navigation<S: SessionStore>(
        &self,
        surface: &impl ScrollSurface,
        store: &mut ScrollPositionStore<S>,
    ) {
        if self.mounted {
            store.save(ScrollOffset::of(surface));
        }
    }

    /// Handle an in-session route change.
    ///
    /// Saves the outgoing offset, then schedules a restore for the panel
    /// showing the new route. Returns `None` when the route did not change.
    pub fn on_route_change<S: SessionStore>(
        &mut self,
        route: &str,
        surface: &impl ScrollSurface,
        store: &mut ScrollPositionStore<S>,
    ) -> Option<PendingRestore> {
        if !self.mounted || self.route.as_deref() == Some(route) {
            return None;
        }

        self.save_before_navigation(surface, store);
        self.generation += 1;
        self.route = Some(route.to_string());
        self.schedule(store)
    }

    /// Apply a settled restore. Returns `false` if it went stale.
    pub fn apply(&self, pending: PendingRestore, surface: &mut impl ScrollSurface) -> bool {
        if !self.mounted || pending.generation != self.generation {
            debug!("dropping stale panel scroll restore");
            return false;
        }

        surface.set_scroll_top(pending.offset.px());
        true
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    fn schedule<S: SessionStore>(&self, store: &ScrollPositionStore<S>) -> Option<PendingRestore> {
        store.restore().map(|offset| PendingRestore {
            offset,
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemorySessionStore, StoreError};

    #[derive(Default)]
    struct Panel {
        top: f64,
    }

    impl ScrollSurface for Panel {
        fn scroll_top(&self) -> f64 {
            self.top
        }

        fn set_scroll_top(&mut self, offset: f64) {
            self.top = offset;
        }
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn save_then_restore_yields_offset() {
        let mut store = ScrollPositionStore::new(MemorySessionStore::new());

        store.save(ScrollOffset::new(42.0).unwrap());

        assert_eq!(store.restore(), ScrollOffset::new(42.0));
    }

    #[test]
    fn restore_without_save_is_absent_and_noop() {
        let store = ScrollPositionStore::new(MemorySessionStore::new());
        let mut tracker = PanelScrollTracker::new();
        let panel = Panel { top: 17.0 };

        assert_eq!(store.restore(), None);
        assert_eq!(tracker.mount("/docs/introduction", &store), None);
        assert_eq!(panel.top, 17.0);
    }

    #[test]
    fn garbage_values_are_absent() {
        let mut raw = MemorySessionStore::new();
        raw.set(SCROLL_STORAGE_KEY, "not-a-number").unwrap();
        let store = ScrollPositionStore::new(raw);
        assert_eq!(store.restore(), None);

        let mut raw = MemorySessionStore::new();
        raw.set(SCROLL_STORAGE_KEY, "-5").unwrap();
        let store = ScrollPositionStore::new(raw);
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn fractional_values_truncate() {
        assert_eq!(ScrollOffset::parse("300.75"), ScrollOffset::new(300.0));
        assert_eq!(ScrollOffset::parse(" 12 "), ScrollOffset::new(12.0));
    }

    #[test]
    fn broken_storage_degrades_silently() {
        let mut store = ScrollPositionStore::new(BrokenStore);
        store.save(ScrollOffset::new(10.0).unwrap());
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn stale_restore_is_ignored_after_unmount() {
        let mut store = ScrollPositionStore::new(MemorySessionStore::new());
        store.save(ScrollOffset::new(120.0).unwrap());

        let mut tracker = PanelScrollTracker::new();
        let pending = tracker.mount("/", &store).unwrap();
        tracker.unmount();

        let mut panel = Panel::default();
        assert!(!tracker.apply(pending, &mut panel));
        assert_eq!(panel.top, 0.0);
    }

    #[test]
    fn stale_restore_is_ignored_after_remount() {
        let mut store = ScrollPositionStore::new(MemorySessionStore::new());
        store.save(ScrollOffset::new(64.0).unwrap());

        let mut tracker = PanelScrollTracker::new();
        let first = tracker.mount("/a", &store).unwrap();
        tracker.unmount();
        let second = tracker.mount("/b", &store).unwrap();

        let mut panel = Panel::default();
        assert!(!tracker.apply(first, &mut panel));
        assert!(tracker.apply(second, &mut panel));
        assert_eq!(panel.top, 64.0);
    }

    #[test]
    fn route_change_saves_then_restores() {
        let mut store = ScrollPositionStore::new(MemorySessionStore::new());
        let mut tracker = PanelScrollTracker::new();
        let mut panel = Panel::default();

        assert!(tracker.mount("/a", &store).is_none());
        panel.top = 250.0;

        let pending = tracker
            .on_route_change("/b", &panel, &mut store)
            .expect("offset was saved");
        panel.top = 0.0;

        assert!(tracker.apply(pending, &mut panel));
        assert_eq!(panel.top, 250.0);
        assert_eq!(tracker.route(), Some("/b"));
    }

    #[test]
    fn same_route_is_not_a_navigation() {
        let mut store = ScrollPositionStore::new(MemorySessionStore::new());
        let mut tracker = PanelScrollTracker::new();
        let panel = Panel { top: 90.0 };

        tracker.mount("/a", &store);

        assert!(tracker.on_route_change("/a", &panel, &mut store).is_none());
        assert_eq!(store.restore(), None);
    }
}
