//! Event listeners that detach when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::dom::js_error;
use crate::error::MountError;

/// An `addEventListener` registration owning its callback.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, MountError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
            attached: true,
        })
    }

    /// Stop receiving events but keep the callback alive.
    ///
    /// A listener may be detached from inside its own callback; dropping it
    /// there would free the closure while it runs.
    pub fn detach(&mut self) {
        if self.attached {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
            self.attached = false;
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.detach();
    }
}
