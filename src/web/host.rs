use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::camera::{NavigationHost, POINTER_LOCK_UNAVAILABLE};
use crate::error::NoclipError;

/// Class toggled on the hint element while input is being ignored.
const HINT_CLASS: &str = "highlight";

/// [`NavigationHost`] backed by the DOM pointer-lock API.
pub struct BrowserHost {
    document: Document,
    surface: Element,
    hint: Option<Element>,
    errors: Option<Element>,
}

impl BrowserHost {
    /// Host capturing the pointer on `surface`. The hint (`.help-noclip`)
    /// and error list (`#errors`) elements are optional.
    #[must_use]
    pub fn new(document: Document, surface: Element) -> Self {
        let hint = document.query_selector(".help-noclip").ok().flatten();
        let errors = document.get_element_by_id("errors");
        Self {
            document,
            surface,
            hint,
            errors,
        }
    }

    /// Element that captures the pointer.
    #[must_use]
    pub fn surface(&self) -> &Element {
        &self.surface
    }

    /// Whether the document currently has the pointer locked to the
    /// navigation surface.
    #[must_use]
    pub fn is_surface_locked(&self) -> bool {
        self.document
            .pointer_lock_element()
            .is_some_and(|el| js_sys::Object::is(el.as_ref(), self.surface.as_ref()))
    }

    fn supports_pointer_lock(&self) -> bool {
        js_sys::Reflect::has(
            self.surface.as_ref(),
            &JsValue::from_str("requestPointerLock"),
        )
        .unwrap_or(false)
    }

    fn show_error(&self, list: &Element, message: &str) -> Result<(), JsValue> {
        list.class_list().remove_1("hide")?;
        let item = self.document.create_element("li")?;
        item.set_text_content(Some(message));
        let _ = list.append_child(&item)?;
        Ok(())
    }
}

impl NavigationHost for BrowserHost {
    fn request_lock(&mut self) -> Result<(), NoclipError> {
        if !self.supports_pointer_lock() {
            return Err(NoclipError::UnsupportedCapability(
                POINTER_LOCK_UNAVAILABLE.to_owned(),
            ));
        }
        self.surface.request_pointer_lock();
        Ok(())
    }

    fn release_lock(&mut self) {
        self.document.exit_pointer_lock();
    }

    fn set_move_hint(&mut self, visible: bool) {
        let Some(hint) = &self.hint else {
            return;
        };
        let classes = hint.class_list();
        let result = if visible {
            classes.add_1(HINT_CLASS)
        } else {
            classes.remove_1(HINT_CLASS)
        };
        if let Err(e) = result {
            log::warn!("could not toggle move hint: {e:?}");
        }
    }

    fn add_error(&mut self, message: &str) {
        log::error!("{message}");
        let Some(list) = &self.errors else {
            return;
        };
        if let Err(e) = self.show_error(list, message) {
            log::warn!("could not display error: {e:?}");
        }
    }
}
