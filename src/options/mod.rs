//! Centralized viewer options with TOML preset support.
//!
//! Navigation tuning, key bindings, projection and service hosts are
//! consolidated here. Options serialize to/from TOML so a deployment can
//! ship presets next to the viewer.

mod camera;
mod host;
mod keybindings;
mod navigation;

use std::path::Path;

pub use camera::CameraOptions;
pub use host::HostOptions;
pub use keybindings::KeyBindings;
pub use navigation::NavigationOptions;
use serde::{Deserialize, Serialize};

use crate::error::NoclipError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Look and movement tuning.
    pub navigation: NavigationOptions,
    /// Keyboard binding options.
    pub keybindings: KeyBindings,
    /// Projection parameters.
    pub camera: CameraOptions,
    /// Service origins.
    pub hosts: HostOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`NoclipError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, NoclipError> {
        toml::from_str(content)
            .map_err(|e| NoclipError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failure reading `path`, or malformed TOML.
    pub fn load(path: &Path) -> Result<Self, NoclipError> {
        let content = std::fs::read_to_string(path).map_err(NoclipError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), NoclipError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NoclipError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NoclipError::Io)?;
        }
        std::fs::write(path, content).map_err(NoclipError::Io)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(std::ffi::OsStr::to_str)
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SpeedMode;
    use crate::input::NavAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[navigation]
fast_multiplier = 8.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.navigation.fast_multiplier, 8.0);
        // Everything else should be default
        assert_eq!(opts.navigation.slow_multiplier, 0.2);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(NavAction::Forward));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("Space"), Some(NavAction::Slow));
        assert_eq!(opts.keybindings.lookup("ShiftRight"), Some(NavAction::Fast));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);

        let mut bindings = KeyBindings::default();
        bindings.bind("ArrowUp", NavAction::Forward);
        bindings.bind("Space", NavAction::Fast);
        assert_eq!(bindings.lookup("ArrowUp"), Some(NavAction::Forward));
        assert_eq!(bindings.lookup("Space"), Some(NavAction::Fast));
    }

    #[test]
    fn custom_bindings_parse_from_toml() {
        let toml_str = r#"
[keybindings.bindings]
ArrowUp = "forward"
ArrowDown = "back"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("ArrowUp"), Some(NavAction::Forward));
        assert_eq!(opts.keybindings.lookup("KeyW"), None);
    }

    #[test]
    fn speed_multipliers_match_modes() {
        let nav = NavigationOptions::default();
        assert_eq!(nav.multiplier(SpeedMode::Normal), 1.0);
        assert_eq!(nav.multiplier(SpeedMode::Slow), 0.2);
        assert_eq!(nav.multiplier(SpeedMode::Fast), 5.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[navigation\n").unwrap_err();
        assert!(matches!(err, NoclipError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir().join(format!(
            "noclip-options-{}",
            std::process::id()
        ));
        let path = dir.join("fast.toml");
        let mut opts = Options::default();
        opts.navigation.fast_multiplier = 12.0;
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["fast".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
