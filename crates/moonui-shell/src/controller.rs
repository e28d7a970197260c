//! Side panel visibility controller.
//!
//! One controller is mounted per page. It owns the viewport class and the
//! panel visibility flag, enforces the dismissal rules, and drives the body
//! scroll lock while the panel is open as an overlay.

use tracing::debug;

use crate::host::{ScrollLock, ViewportProbe};
use crate::viewport::{Breakpoint, ViewportClass};

/// Where a document interaction landed, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Inside the panel itself
    Panel,
    /// The floating toggle button
    ToggleButton,
    /// The dimmed backdrop behind the open panel
    Backdrop,
    /// Anywhere else on the page
    Elsewhere,
}

impl HitRegion {
    /// Whether an interaction here counts as "outside" the panel.
    pub fn is_outside(self) -> bool {
        !matches!(self, Self::Panel | Self::ToggleButton)
    }
}

/// Observable shell state after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellSnapshot {
    /// Current layout class
    pub viewport: ViewportClass,
    /// The visibility flag itself
    pub shown: bool,
}

impl ShellSnapshot {
    /// Whether the panel is on screen. Wide layouts always render it.
    pub fn panel_rendered(&self) -> bool {
        self.shown || !self.viewport.is_narrow()
    }

    /// Narrow and shown: the panel covers the page as an overlay.
    ///
    /// While this holds the body is scroll locked, the backdrop is rendered
    /// and the outside-click and escape listeners are armed.
    pub fn overlay_open(&self) -> bool {
        self.shown && self.viewport.is_narrow()
    }

    /// The floating toggle button only exists on narrow layouts.
    pub fn toggle_rendered(&self) -> bool {
        self.viewport.is_narrow()
    }
}

/// Snapshot pair describing the effect of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub before: ShellSnapshot,
    pub after: ShellSnapshot,
}

impl Transition {
    /// Whether anything observable changed.
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// The dismissal listeners must be attached after this transition.
    pub fn arms_dismissal(&self) -> bool {
        !self.before.overlay_open() && self.after.overlay_open()
    }

    /// The dismissal listeners must be removed after this transition.
    pub fn disarms_dismissal(&self) -> bool {
        self.before.overlay_open() && !self.after.overlay_open()
    }
}

/// Visibility and breakpoint state machine for the side panel.
pub struct NavigationShellController<L: ScrollLock> {
    breakpoint: Breakpoint,
    state: ShellSnapshot,
    lock: L,
    locked: bool,
}

impl<L: ScrollLock> NavigationShellController<L> {
    /// Create a controller. Until [`initialize`](Self::initialize) runs the
    /// shell reports a wide layout with the panel shown.
    pub fn new(breakpoint: Breakpoint, lock: L) -> Self {
        Self {
            breakpoint,
            state: ShellSnapshot {
                viewport: ViewportClass::Wide,
                shown: true,
            },
            lock,
            locked: false,
        }
    }

    /// Measure the viewport and derive the initial state.
    ///
    /// Hosts call this synchronously before first paint.
    pub fn initialize(&mut self, probe: &impl ViewportProbe) -> Transition {
        let before = self.state;
        let viewport = self.breakpoint.classify(probe.width());
        self.state = ShellSnapshot {
            viewport,
            shown: viewport == ViewportClass::Wide,
        };
        self.commit(before, "initialize")
    }

    /// Recompute the viewport class after a resize.
    ///
    /// Crossing into narrow hides the panel. Any resize that lands on a wide
    /// layout shows it, whatever was toggled before. Narrow to narrow leaves
    /// state untouched.
    pub fn on_resize(&mut self, width: f64) -> Transition {
        let before = self.state;
        let viewport = self.breakpoint.classify(Some(width));

        match viewport {
            ViewportClass::Wide => {
                self.state = ShellSnapshot {
                    viewport,
                    shown: true,
                };
            }
            ViewportClass::Narrow if before.viewport != viewport => {
                self.state = ShellSnapshot {
                    viewport,
                    shown: false,
                };
            }
            ViewportClass::Narrow => {}
        }

        self.commit(before, "resize")
    }

    /// Flip the visibility flag.
    pub fn toggle(&mut self) -> Transition {
        let before = self.state;
        self.state.shown = !self.state.shown;
        self.commit(before, "toggle")
    }

    /// Handle a document click. Outside clicks close the open overlay.
    pub fn on_outside_interaction(&mut self, target: HitRegion) -> Transition {
        let before = self.state;
        if before.overlay_open() && target.is_outside() {
            self.state.shown = false;
        }
        self.commit(before, "outside interaction")
    }

    /// Escape closes the open overlay.
    pub fn on_escape_key(&mut self) -> Transition {
        let before = self.state;
        if before.overlay_open() {
            self.state.shown = false;
        }
        self.commit(before, "escape")
    }

    /// Following a panel link closes it on narrow layouts.
    pub fn on_link_activated(&mut self) -> Transition {
        let before = self.state;
        if before.viewport.is_narrow() {
            self.state.shown = false;
        }
        self.commit(before, "link activated")
    }

    /// Release the scroll lock. Called when the page unmounts; also runs on drop.
    pub fn teardown(&mut self) {
        if self.locked {
            self.lock.set_locked(false);
            self.locked = false;
            debug!("shell teardown released scroll lock");
        }
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        self.state
    }

    pub fn viewport(&self) -> ViewportClass {
        self.state.viewport
    }

    pub fn is_shown(&self) -> bool {
        self.state.shown
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    fn commit(&mut self, before: ShellSnapshot, cause: &str) -> Transition {
        let want_lock = self.state.overlay_open();
        if want_lock != self.locked {
            self.lock.set_locked(want_lock);
            self.locked = want_lock;
        }

        let transition = Transition {
            before,
            after: self.state,
        };

        if transition.changed() {
            debug!(
                cause,
                viewport = ?self.state.viewport,
                shown = self.state.shown,
                locked = self.locked,
                "shell state changed"
            );
        }

        transition
    }
}

impl<L: ScrollLock> Drop for NavigationShellController<L> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow_controller() -> NavigationShellController<bool> {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&800.0);
        c
    }

    #[test]
    fn initializes_wide_as_shown() {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&1280.0);

        assert_eq!(c.viewport(), ViewportClass::Wide);
        assert!(c.is_shown());
        assert!(!c.is_scroll_locked());
    }

    #[test]
    fn initializes_narrow_as_hidden() {
        let c = narrow_controller();

        assert_eq!(c.viewport(), ViewportClass::Narrow);
        assert!(!c.is_shown());
        assert!(!c.snapshot().panel_rendered());
    }

    #[test]
    fn unavailable_viewport_fails_open_to_wide() {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&None::<f64>);

        assert_eq!(c.viewport(), ViewportClass::Wide);
        assert!(c.snapshot().panel_rendered());
    }

    #[test]
    fn resize_within_class_is_noop() {
        let mut c = narrow_controller();
        c.toggle();

        let t = c.on_resize(700.0);

        assert!(!t.changed());
        assert!(c.is_shown());
    }

    #[test]
    fn wide_ignores_toggle_for_rendering() {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&1400.0);

        c.toggle();

        assert!(!c.is_shown());
        assert!(c.snapshot().panel_rendered());
        assert!(!c.is_scroll_locked());
    }

    #[test]
    fn wide_resize_restores_toggled_off_flag() {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&1400.0);
        c.toggle();

        let t = c.on_resize(1500.0);

        assert!(t.changed());
        assert!(c.is_shown());
    }

    #[test]
    fn outside_click_inside_panel_keeps_it_open() {
        let mut c = narrow_controller();
        c.toggle();

        c.on_outside_interaction(HitRegion::Panel);
        assert!(c.is_shown());

        c.on_outside_interaction(HitRegion::ToggleButton);
        assert!(c.is_shown());

        c.on_outside_interaction(HitRegion::Backdrop);
        assert!(!c.is_shown());
    }

    #[test]
    fn outside_click_on_wide_does_nothing() {
        let mut c = NavigationShellController::new(Breakpoint::PANEL, false);
        c.initialize(&1280.0);

        let t = c.on_outside_interaction(HitRegion::Elsewhere);

        assert!(!t.changed());
        assert!(c.is_shown());
    }

    #[test]
    fn link_activation_closes_only_on_narrow() {
        let mut c = narrow_controller();
        c.toggle();
        c.on_link_activated();
        assert!(!c.is_shown());

        let mut wide = NavigationShellController::new(Breakpoint::PANEL, false);
        wide.initialize(&1280.0);
        wide.on_link_activated();
        assert!(wide.is_shown());
    }

    #[test]
    fn transitions_report_listener_arming() {
        let mut c = narrow_controller();

        let opened = c.toggle();
        assert!(opened.arms_dismissal());
        assert!(!opened.disarms_dismissal());

        let closed = c.on_escape_key();
        assert!(closed.disarms_dismissal());
    }

    #[test]
    fn drop_releases_lock() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct SharedLock(Rc<Cell<bool>>);
        impl ScrollLock for SharedLock {
            fn set_locked(&mut self, locked: bool) {
                self.0.set(locked);
            }
        }

        let flag = Rc::new(Cell::new(false));
        {
            let mut c = NavigationShellController::new(Breakpoint::PANEL, SharedLock(flag.clone()));
            c.initialize(&600.0);
            c.toggle();
            assert!(flag.get());
        }

        assert!(!flag.get());
    }
}
