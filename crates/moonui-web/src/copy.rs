//! Copy buttons on snippets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use moonui_shell::feedback::FEEDBACK_DURATION;
use moonui_shell::markup::COPY_ATTR;
use moonui_shell::{CopyFeedback, CopyState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Window};

use crate::dom::{js_error, warn};
use crate::error::MountError;
use crate::listener::EventListener;

/// Attach a click handler to every element carrying the copy attribute.
pub fn attach(document: &Document) -> Result<Vec<EventListener>, MountError> {
    let buttons = document
        .query_selector_all(&format!("[{}]", COPY_ATTR))
        .map_err(js_error)?;

    let mut listeners = Vec::with_capacity(buttons.length() as usize);
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let feedback = Rc::new(RefCell::new(CopyFeedback::new()));
        let target = button.clone();
        listeners.push(EventListener::new(button.as_ref(), "click", move |_| {
            on_click(target.clone(), feedback.clone());
        })?);
    }

    Ok(listeners)
}

fn on_click(button: Element, feedback: Rc<RefCell<CopyFeedback>>) {
    let Some(window) = web_sys::window() else { return };
    let text = button.get_attribute(COPY_ATTR).unwrap_or_default();

    wasm_bindgen_futures::spawn_local(async move {
        let succeeded = match write_clipboard(&window, &text) {
            Ok(promise) => JsFuture::from(promise).await.is_ok(),
            Err(_) => false,
        };

        feedback.borrow_mut().record(succeeded, js_sys::Date::now());
        render(&button, &feedback.borrow());
        schedule_revert(&window, button, feedback);
    });
}

fn schedule_revert(window: &Window, button: Element, feedback: Rc<RefCell<CopyFeedback>>) {
    let callback = Closure::once_into_js(move || {
        if feedback.borrow_mut().tick(js_sys::Date::now()) {
            render(&button, &feedback.borrow());
        }
    });

    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        FEEDBACK_DURATION.as_millis() as i32,
    ) {
        warn(&format!("moonui: could not schedule copy feedback reset: {:?}", e));
    }
}

fn render(button: &Element, feedback: &CopyFeedback) {
    button.set_text_content(Some(feedback.label()));
    let _ = button
        .class_list()
        .toggle_with_force("copied", feedback.state() == CopyState::Copied);
}

/// `navigator.clipboard.writeText(text)`.
fn write_clipboard(window: &Window, text: &str) -> Result<Promise, JsValue> {
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()
}
