use log::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Event, EventTarget, HtmlButtonElement, HtmlElement, KeyboardEvent};

use crate::error::{Error, Result};
use crate::session::Hud;

/// Looks up `#id` and casts it to `T`.
pub fn element<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| Error::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// Start button and status line.
pub struct DomHud {
    pub button: HtmlButtonElement,
    pub status: HtmlElement,
}

impl Hud for DomHud {
    fn set_start_enabled(&mut self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }

    fn set_start_label(&mut self, label: &str) {
        self.button.set_text_content(Some(label));
    }

    fn set_status(&mut self, status: Option<(&str, &str)>) {
        let (text, color) = status.unwrap_or(("", ""));
        self.status.set_text_content(Some(text));
        let style = self.status.style();
        let result = if color.is_empty() {
            style.remove_property("color").map(|_| ())
        } else {
            style.set_property("color", color)
        };
        if let Err(err) = result {
            warn!("failed to set status color: {err:?}");
        }
    }
}

/// Registers a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Keyboard handler: returns `true` if the key was consumed by the game.
pub fn on_key(mut handle: impl FnMut(&str) -> bool + 'static) -> impl FnMut(Event) {
    move |event: Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if handle(&key_event.key()) {
            // Keep arrows and space from scrolling the page.
            event.prevent_default();
        }
    }
}
