//! Host trait implementations backed by the browser.

use moonui_shell::{ScrollLock, ScrollSurface, SessionStore, StoreError, ViewportProbe};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement, Storage, Window};

use crate::error::MountError;

pub(crate) fn js_error(err: JsValue) -> MountError {
    MountError::Dom(format!("{:?}", err))
}

pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// `window.innerWidth`.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ViewportProbe for WindowViewport {
    fn width(&self) -> Option<f64> {
        self.window.inner_width().ok()?.as_f64()
    }
}

/// `window.sessionStorage`. Private browsing modes may deny access.
pub struct SessionStorage {
    storage: Option<Storage>,
}

impl SessionStorage {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.session_storage().ok().flatten(),
        }
    }
}

impl SessionStore for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

/// Locks page scrolling through `overflow: hidden` on `<body>`.
pub struct BodyScrollLock {
    body: Option<HtmlElement>,
}

impl BodyScrollLock {
    pub fn new(body: Option<HtmlElement>) -> Self {
        Self { body }
    }
}

impl ScrollLock for BodyScrollLock {
    fn set_locked(&mut self, locked: bool) {
        let Some(body) = &self.body else { return };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            warn(&format!("moonui: could not update body overflow: {:?}", e));
        }
    }
}

/// Vertical scroll offset of an element.
pub struct ElementScroll<'a> {
    element: &'a Element,
}

impl<'a> ElementScroll<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }
}

impl ScrollSurface for ElementScroll<'_> {
    fn scroll_top(&self) -> f64 {
        self.element.scroll_top() as f64
    }

    fn set_scroll_top(&mut self, px: f64) {
        self.element.set_scroll_top(px as i32);
    }
}
