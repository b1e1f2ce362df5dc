use web_sys::Window;

use crate::error::NoclipError;
use crate::sync::LocationHistory;

/// [`LocationHistory`] over `window.location` and `history.replaceState`.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    /// History of `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl LocationHistory for BrowserHistory {
    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn query(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn replace(&mut self, url: &str) -> Result<(), NoclipError> {
        let history = self
            .window
            .history()
            .map_err(|e| NoclipError::UnsupportedCapability(format!("{e:?}")))?;
        history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
            .map_err(|e| NoclipError::Host(format!("replaceState failed: {e:?}")))
    }
}
