//! End-to-end shell behavior across resize, dismissal and navigation.

use std::cell::Cell;
use std::rc::Rc;

use moonui_shell::{
    Breakpoint, HitRegion, MemorySessionStore, NavigationShellController, PanelScrollTracker,
    ScrollLock, ScrollOffset, ScrollPositionStore, ScrollSurface, ViewportClass,
};
use pretty_assertions::assert_eq;

#[derive(Clone, Default)]
struct BodyLock(Rc<Cell<bool>>);

impl ScrollLock for BodyLock {
    fn set_locked(&mut self, locked: bool) {
        self.0.set(locked);
    }
}

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

#[test]
fn resize_toggle_escape_resize() {
    let body = BodyLock::default();
    let mut shell = NavigationShellController::new(Breakpoint::PANEL, body.clone());

    shell.initialize(&1280.0);
    assert!(shell.is_shown());

    shell.on_resize(800.0);
    assert_eq!(shell.viewport(), ViewportClass::Narrow);
    assert!(!shell.is_shown());

    shell.toggle();
    assert!(shell.is_shown());
    assert!(body.0.get(), "body should be scroll locked");

    shell.on_escape_key();
    assert!(!shell.is_shown());
    assert!(!body.0.get(), "scroll lock should be released");

    shell.toggle();
    shell.on_resize(1280.0);
    assert!(shell.is_shown());
    assert!(!body.0.get());
}

#[test]
fn wide_always_shows_after_resize_regardless_of_toggle() {
    for width in [1024.0, 1100.0, 1920.0, 3840.0] {
        for toggles in 0..3 {
            let mut shell = NavigationShellController::new(Breakpoint::PANEL, false);
            shell.initialize(&500.0);
            for _ in 0..toggles {
                shell.toggle();
            }

            shell.on_resize(width);

            assert!(shell.is_shown(), "width {width} after {toggles} toggles");
        }
    }
}

#[test]
fn narrowing_hides_even_if_shown() {
    for width in [320.0, 768.0, 1023.0] {
        let mut shell = NavigationShellController::new(Breakpoint::PANEL, false);
        shell.initialize(&1440.0);
        assert!(shell.is_shown());

        shell.on_resize(width);

        assert!(!shell.is_shown(), "width {width}");
    }
}

#[test]
fn toggle_round_trip_on_narrow() {
    let mut shell = NavigationShellController::new(Breakpoint::PANEL, false);
    shell.initialize(&600.0);
    let original = shell.snapshot();

    shell.toggle();
    shell.toggle();

    assert_eq!(shell.snapshot(), original);
}

#[test]
fn outside_clicks_and_listener_scoping() {
    let mut shell = NavigationShellController::new(Breakpoint::PANEL, false);
    shell.initialize(&600.0);

    let opened = shell.toggle();
    assert!(opened.arms_dismissal());

    let inside = shell.on_outside_interaction(HitRegion::Panel);
    assert!(!inside.changed());

    let outside = shell.on_outside_interaction(HitRegion::Elsewhere);
    assert!(outside.disarms_dismissal());
    assert!(!shell.is_shown());
    assert!(!*shell.lock());
}

#[test]
fn scroll_position_survives_link_navigation() {
    let mut store = ScrollPositionStore::new(MemorySessionStore::new());

    // First page: panel scrolled, user follows a link.
    let mut first = PanelScrollTracker::new();
    first.mount("/components/buttons/primary", &store);
    let panel = Panel { top: 300.0 };
    first.save_before_navigation(&panel, &mut store);
    first.unmount();

    // Next page mounts a fresh panel.
    let mut next = PanelScrollTracker::new();
    let mut panel = Panel::default();
    let pending = next
        .mount("/components/cards/product", &store)
        .expect("offset carried over");

    assert_eq!(pending.offset, ScrollOffset::new(300.0).unwrap());
    assert!(next.apply(pending, &mut panel));
    assert_eq!(panel.top, 300.0);
}
