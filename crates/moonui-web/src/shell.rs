//! Mounting the navigation shell onto a rendered page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use moonui_shell::markup::{
    BACKDROP_ID, CONFIG_ID, LAYOUT_ID, MENU_CLOSE_ID, MENU_ID, MENU_OPEN_ID, PANEL_ID,
    PANEL_TOGGLE_ID, SHOWN_ATTR,
};
use moonui_shell::{
    HitRegion, NavigationShellController, PanelScrollTracker, PendingRestore, ScrollPositionStore,
    ShellConfig, TopBarMenu, Transition, ViewportProbe,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Node, Window};

use crate::copy;
use crate::dom::{warn, BodyScrollLock, ElementScroll, SessionStorage, WindowViewport};
use crate::error::MountError;
use crate::listener::EventListener;
use crate::view::{bool_attr, MenuView, ShellView};

type SharedShell = Rc<RefCell<Shell>>;
type WeakShell = Weak<RefCell<Shell>>;

/// Elements the shell reads and writes.
struct Elements {
    window: Window,
    document: Document,
    panel: Element,
    layout: Option<Element>,
    toggle: Option<Element>,
    backdrop: Option<Element>,
    menu: Option<Element>,
    menu_open: Option<Element>,
}

impl Elements {
    fn find(window: Window) -> Result<Self, MountError> {
        let document = window.document().ok_or(MountError::NoDocument)?;
        let panel = document
            .get_element_by_id(PANEL_ID)
            .ok_or(MountError::MissingElement(PANEL_ID))?;

        Ok(Self {
            layout: document.get_element_by_id(LAYOUT_ID),
            toggle: document.get_element_by_id(PANEL_TOGGLE_ID),
            backdrop: document.get_element_by_id(BACKDROP_ID),
            menu: document.get_element_by_id(MENU_ID),
            menu_open: document.get_element_by_id(MENU_OPEN_ID),
            panel,
            document,
            window,
        })
    }

    /// Classify where a document click landed.
    fn hit_region(&self, target: Option<EventTarget>) -> HitRegion {
        let Some(node) = target.and_then(|t| t.dyn_into::<Node>().ok()) else {
            return HitRegion::Elsewhere;
        };
        let inside = |element: &Option<Element>| {
            element
                .as_ref()
                .is_some_and(|e| e.contains(Some(&node)))
        };

        if self.panel.contains(Some(&node)) {
            HitRegion::Panel
        } else if inside(&self.toggle) {
            HitRegion::ToggleButton
        } else if inside(&self.backdrop) {
            HitRegion::Backdrop
        } else {
            HitRegion::Elsewhere
        }
    }

    fn route(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }
}

/// Live shell state for one page.
struct Shell {
    elements: Elements,
    config: ShellConfig,
    controller: NavigationShellController<BodyScrollLock>,
    menu: TopBarMenu,
    tracker: PanelScrollTracker,
    positions: ScrollPositionStore<SessionStorage>,
    /// Attached for the life of the page
    listeners: Vec<EventListener>,
    /// Outside-click and escape listeners, attached only while the overlay is open
    dismissal: Vec<EventListener>,
    /// Detached listeners whose callbacks may still be on the stack
    retired: Vec<EventListener>,
}

impl Shell {
    /// Apply a controller transition to the DOM and listener set.
    fn apply(&mut self, transition: Transition, weak: &WeakShell) {
        if transition.changed() {
            self.render();
        }
        if transition.arms_dismissal() {
            if let Err(e) = self.arm_dismissal(weak) {
                warn(&format!("moonui: {}", e));
            }
        }
        if transition.disarms_dismissal() {
            self.disarm_dismissal();
        }
    }

    fn render(&self) {
        let view = ShellView::from(self.controller.snapshot());
        let set = |element: &Element, name: &str, value: &str| {
            if let Err(e) = element.set_attribute(name, value) {
                warn(&format!("moonui: could not set {}: {:?}", name, e));
            }
        };

        set(&self.elements.panel, SHOWN_ATTR, bool_attr(view.panel_shown));

        if let Some(backdrop) = &self.elements.backdrop {
            set(backdrop, SHOWN_ATTR, bool_attr(view.backdrop_shown));
        }

        if let Some(toggle) = &self.elements.toggle {
            set(toggle, SHOWN_ATTR, bool_attr(view.toggle_expanded));
            set(toggle, "aria-expanded", bool_attr(view.toggle_expanded));
            set(toggle, "aria-label", view.toggle_label);
            let _ = toggle.toggle_attribute_with_force("hidden", view.toggle_hidden);
        }

        if let Some(layout) = &self.elements.layout {
            let classes = layout.class_list();
            let _ = classes.remove_2("layout-narrow", "layout-wide");
            let _ = classes.add_1(view.layout_class);
        }
    }

    fn render_menu(&self) {
        let view = MenuView::from(&self.menu);
        if let Some(menu) = &self.elements.menu {
            let _ = menu.toggle_attribute_with_force("hidden", view.hidden);
        }
        if let Some(trigger) = &self.elements.menu_open {
            let _ = trigger.set_attribute("aria-expanded", bool_attr(view.expanded));
        }
    }

    fn arm_dismissal(&mut self, weak: &WeakShell) -> Result<(), MountError> {
        self.retired.clear();
        let document: EventTarget = self.elements.document.clone().into();

        let click = EventListener::new(&document, "click", {
            let weak = weak.clone();
            move |event: Event| {
                with_shell(&weak, |shell, weak| {
                    let region = shell.elements.hit_region(event.target());
                    let transition = shell.controller.on_outside_interaction(region);
                    shell.apply(transition, weak);
                });
            }
        })?;

        let keydown = EventListener::new(&document, "keydown", {
            let weak = weak.clone();
            move |event: Event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|e| e.key() == "Escape");
                if !is_escape {
                    return;
                }
                with_shell(&weak, |shell, weak| {
                    let transition = shell.controller.on_escape_key();
                    shell.apply(transition, weak);
                });
            }
        })?;

        self.dismissal = vec![click, keydown];
        Ok(())
    }

    fn disarm_dismissal(&mut self) {
        for mut listener in self.dismissal.drain(..) {
            listener.detach();
            self.retired.push(listener);
        }
    }

    fn save_scroll(&mut self) {
        let surface = ElementScroll::new(&self.elements.panel);
        self.tracker.save_before_navigation(&surface, &mut self.positions);
    }

    fn schedule_restore(&self, pending: PendingRestore, weak: &WeakShell) {
        let weak = weak.clone();
        let callback = Closure::once_into_js(move || {
            with_shell(&weak, |shell, _| {
                let mut surface = ElementScroll::new(&shell.elements.panel);
                shell.tracker.apply(pending, &mut surface);
            });
        });

        if let Err(e) = self
            .elements
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                self.config.restore_delay_ms as i32,
            )
        {
            warn(&format!("moonui: could not schedule scroll restore: {:?}", e));
        }
    }

    fn teardown(&mut self) {
        self.save_scroll();
        self.tracker.unmount();
        self.controller.teardown();
        self.dismissal.clear();
        self.retired.clear();
        self.listeners.clear();
    }
}

/// Run `f` against the shell if it is still mounted and not already busy.
fn with_shell(weak: &WeakShell, f: impl FnOnce(&mut Shell, &WeakShell)) {
    let Some(shell) = weak.upgrade() else { return };
    let Ok(mut shell) = shell.try_borrow_mut() else {
        return;
    };
    f(&mut shell, weak);
}

/// Closest `<a>` at or above the event target.
fn link_target(event: &Event) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest("a")
        .ok()
        .flatten()
}

fn read_config(document: &Document) -> Result<ShellConfig, MountError> {
    match document
        .get_element_by_id(CONFIG_ID)
        .and_then(|e| e.text_content())
    {
        Some(json) => Ok(ShellConfig::from_json(&json)?),
        None => {
            warn("moonui: no shell config on page, using defaults");
            Ok(ShellConfig::default())
        }
    }
}

/// Handle returned to JavaScript by [`mount`].
#[wasm_bindgen]
pub struct ShellHandle {
    shell: Option<SharedShell>,
}

#[wasm_bindgen]
impl ShellHandle {
    /// Detach every listener and release the scroll lock.
    pub fn unmount(&mut self) {
        if let Some(shell) = self.shell.take() {
            shell.borrow_mut().teardown();
        }
    }

    /// Whether the side panel is currently shown.
    #[wasm_bindgen(getter, js_name = isShown)]
    pub fn is_shown(&self) -> bool {
        self.shell
            .as_ref()
            .is_some_and(|s| s.borrow().controller.snapshot().panel_rendered())
    }

    /// Whether the outside-click and escape listeners are attached.
    #[wasm_bindgen(getter, js_name = dismissalArmed)]
    pub fn dismissal_armed(&self) -> bool {
        self.shell
            .as_ref()
            .is_some_and(|s| !s.borrow().dismissal.is_empty())
    }

    /// Open or close the side panel, as the toggle button does.
    pub fn toggle(&self) {
        if let Some(shell) = &self.shell {
            with_shell(&Rc::downgrade(shell), |shell, weak| {
                let transition = shell.controller.toggle();
                shell.apply(transition, weak);
            });
        }
    }
}

/// Mount the shell onto the current page.
#[wasm_bindgen]
pub fn mount() -> Result<ShellHandle, JsValue> {
    let shell = mount_shell().map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(ShellHandle { shell: Some(shell) })
}

fn mount_shell() -> Result<SharedShell, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let elements = Elements::find(window)?;
    let config = read_config(&elements.document)?;

    let lock = BodyScrollLock::new(elements.document.body());
    let positions = ScrollPositionStore::with_key(
        SessionStorage::new(&elements.window),
        config.scroll_key.clone(),
    );

    let shell = Rc::new(RefCell::new(Shell {
        controller: NavigationShellController::new(config.panel_breakpoint(), lock),
        menu: TopBarMenu::new(),
        tracker: PanelScrollTracker::new(),
        positions,
        listeners: Vec::new(),
        dismissal: Vec::new(),
        retired: Vec::new(),
        elements,
        config,
    }));
    let weak = Rc::downgrade(&shell);

    {
        let mut guard = shell.borrow_mut();
        let s = &mut *guard;

        let viewport = WindowViewport::new(s.elements.window.clone());
        let transition = s.controller.initialize(&viewport);
        s.render();
        s.render_menu();
        s.apply(transition, &weak);

        let route = s.elements.route();
        if let Some(pending) = s.tracker.mount(&route, &s.positions) {
            s.schedule_restore(pending, &weak);
        }

        s.listeners = permanent_listeners(s, &weak)?;
        s.listeners.extend(copy::attach(&s.elements.document)?);
    }

    Ok(shell)
}

fn permanent_listeners(shell: &Shell, weak: &WeakShell) -> Result<Vec<EventListener>, MountError> {
    let window: EventTarget = shell.elements.window.clone().into();
    let mut listeners = Vec::new();

    listeners.push(EventListener::new(&window, "resize", {
        let weak = weak.clone();
        move |_| {
            with_shell(&weak, |shell, weak| {
                let viewport = WindowViewport::new(shell.elements.window.clone());
                let Some(width) = viewport.width() else { return };
                let transition = shell.controller.on_resize(width);
                shell.apply(transition, weak);
            });
        }
    })?);

    listeners.push(EventListener::new(&window, "pagehide", {
        let weak = weak.clone();
        move |_| with_shell(&weak, |shell, _| shell.save_scroll())
    })?);

    listeners.push(EventListener::new(&window, "popstate", {
        let weak = weak.clone();
        move |_| {
            with_shell(&weak, |shell, weak| {
                let route = shell.elements.route();
                let surface = ElementScroll::new(&shell.elements.panel);
                if let Some(pending) =
                    shell
                        .tracker
                        .on_route_change(&route, &surface, &mut shell.positions)
                {
                    shell.schedule_restore(pending, weak);
                }
            });
        }
    })?);

    let panel: EventTarget = shell.elements.panel.clone().into();
    listeners.push(EventListener::new(&panel, "click", {
        let weak = weak.clone();
        move |event: Event| {
            if link_target(&event).is_none() {
                return;
            }
            with_shell(&weak, |shell, weak| {
                shell.save_scroll();
                let transition = shell.controller.on_link_activated();
                shell.apply(transition, weak);
            });
        }
    })?);

    if let Some(toggle) = &shell.elements.toggle {
        listeners.push(EventListener::new(toggle.as_ref(), "click", {
            let weak = weak.clone();
            move |_| {
                with_shell(&weak, |shell, weak| {
                    let transition = shell.controller.toggle();
                    shell.apply(transition, weak);
                });
            }
        })?);
    }

    if let Some(trigger) = &shell.elements.menu_open {
        listeners.push(EventListener::new(trigger.as_ref(), "click", {
            let weak = weak.clone();
            move |_| {
                with_shell(&weak, |shell, _| {
                    shell.menu.toggle();
                    shell.render_menu();
                });
            }
        })?);
    }

    if let Some(close) = shell.elements.document.get_element_by_id(MENU_CLOSE_ID) {
        listeners.push(EventListener::new(close.as_ref(), "click", {
            let weak = weak.clone();
            move |_| {
                with_shell(&weak, |shell, _| {
                    shell.menu.close();
                    shell.render_menu();
                });
            }
        })?);
    }

    if let Some(menu) = &shell.elements.menu {
        listeners.push(EventListener::new(menu.as_ref(), "click", {
            let weak = weak.clone();
            move |event: Event| {
                if link_target(&event).is_none() {
                    return;
                }
                with_shell(&weak, |shell, _| {
                    shell.menu.on_link_activated();
                    shell.render_menu();
                });
            }
        })?);
    }

    Ok(listeners)
}
