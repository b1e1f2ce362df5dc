use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::NavAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Maps physical key strings to navigation actions.
///
/// Key strings use the DOM `KeyboardEvent.code` format: `"KeyW"`,
/// `"ShiftLeft"`, `"Space"`. Several keys may share an action.
pub struct KeyBindings {
    /// Key string → action.
    pub bindings: HashMap<String, NavAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyW".into(), NavAction::Forward),
            ("KeyS".into(), NavAction::Back),
            ("KeyD".into(), NavAction::Right),
            ("KeyA".into(), NavAction::Left),
            ("ShiftLeft".into(), NavAction::Fast),
            ("ShiftRight".into(), NavAction::Fast),
            ("Space".into(), NavAction::Slow),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<NavAction> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, action: NavAction) {
        let _ = self.bindings.insert(key.into(), action);
    }
}
