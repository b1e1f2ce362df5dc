use crate::error::NoclipError;

/// Message reported when pointer capture cannot be obtained.
pub const POINTER_LOCK_UNAVAILABLE: &str =
    "The Pointer Lock API is required to activate noclip, but couldn't be accessed.";

/// Capabilities the navigation controller needs from its environment.
///
/// Lock requests are asynchronous: a granted request is reported back
/// later as [`InputEvent::LockChanged`](crate::input::InputEvent::LockChanged).
pub trait NavigationHost {
    /// Ask for exclusive pointer capture.
    ///
    /// # Errors
    ///
    /// [`NoclipError::UnsupportedCapability`] when the host cannot capture
    /// the pointer at all.
    fn request_lock(&mut self) -> Result<(), NoclipError>;

    /// Release pointer capture. No-op when not captured.
    fn release_lock(&mut self);

    /// Show or hide the "hold the button to move" hint.
    fn set_move_hint(&mut self, visible: bool);

    /// Display an error message to the user.
    fn add_error(&mut self, message: &str);
}

/// In-process host with no display. Lock requests are recorded and can be
/// drained with [`HeadlessHost::take_lock_change`] to feed back into the
/// controller.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    /// Whether lock requests succeed.
    pub supports_lock: bool,
    /// Current hint visibility.
    pub hint_visible: bool,
    /// Errors reported through [`NavigationHost::add_error`].
    pub errors: Vec<String>,
    pending: Option<bool>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            supports_lock: true,
            hint_visible: false,
            errors: Vec::new(),
            pending: None,
        }
    }
}

impl HeadlessHost {
    /// Host whose lock requests always fail.
    #[must_use]
    pub fn without_lock() -> Self {
        Self {
            supports_lock: false,
            ..Self::default()
        }
    }

    /// Lock state the host would report next, if a request or release is
    /// outstanding.
    pub fn take_lock_change(&mut self) -> Option<bool> {
        self.pending.take()
    }
}

impl NavigationHost for HeadlessHost {
    fn request_lock(&mut self) -> Result<(), NoclipError> {
        if !self.supports_lock {
            return Err(NoclipError::UnsupportedCapability(
                POINTER_LOCK_UNAVAILABLE.to_owned(),
            ));
        }
        self.pending = Some(true);
        Ok(())
    }

    fn release_lock(&mut self) {
        self.pending = Some(false);
    }

    fn set_move_hint(&mut self, visible: bool) {
        self.hint_visible = visible;
    }

    fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}
