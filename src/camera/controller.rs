use glam::DVec3;

use super::core::Pose;
use super::events::{EventBus, EventKind, NavEvent, SubscriptionId};
use super::host::{NavigationHost, POINTER_LOCK_UNAVAILABLE};
use super::intent::{LockState, MotionIntent};
use crate::input::{InputEvent, MouseButton, NavAction};
use crate::options::{KeyBindings, NavigationOptions, Options};

/// Free-look ("noclip") camera controller.
///
/// Owns the live [`Pose`] and [`MotionIntent`], consumes input, integrates
/// motion once per frame and publishes [`NavEvent`]s. No operation fails:
/// out-of-range angles are clamped or wrapped and non-finite input is
/// dropped.
///
/// All mutation happens on the thread that delivers input and frames;
/// listeners run synchronously inside the call that emitted the event.
pub struct NavigationController<H: NavigationHost> {
    host: H,
    pose: Pose,
    intent: MotionIntent,
    lock: LockState,
    settings: NavigationOptions,
    bindings: KeyBindings,
    events: EventBus,
}

impl<H: NavigationHost> NavigationController<H> {
    /// Controller at the origin looking down `-Z`.
    #[must_use]
    pub fn new(host: H, options: &Options) -> Self {
        Self {
            host,
            pose: Pose::default(),
            intent: MotionIntent::default(),
            lock: LockState::Unlocked,
            settings: options.navigation.clone(),
            bindings: options.keybindings.clone(),
            events: EventBus::new(),
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Current motion intent.
    #[must_use]
    pub fn intent(&self) -> MotionIntent {
        self.intent
    }

    /// Current lock state.
    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    /// The injected host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the injected host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Listen for one kind of navigation event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&NavEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, callback)
    }

    /// Listen for every navigation event.
    pub fn subscribe_all(
        &mut self,
        callback: impl FnMut(&NavEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe_all(callback)
    }

    /// Stop a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Seed both angles, typically from a decoded location on bootstrap.
    /// Values are normalized, which leaves already valid input untouched.
    pub fn set_pitch_yaw(&mut self, pitch: f64, yaw: f64) {
        self.pose.set_pitch_yaw(pitch, yaw);
    }

    /// Seed the position. Non-finite components are ignored.
    pub fn set_position(&mut self, position: DVec3) {
        if position.is_finite() {
            self.pose.position = position;
        }
    }

    /// Replace the whole pose (normalized).
    pub fn set_pose(&mut self, pose: Pose) {
        self.set_position(pose.position);
        self.set_pitch_yaw(pose.pitch, pose.yaw);
    }

    /// Dispatch a raw input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { dx, dy } => self.on_pointer_delta(dx, dy),
            InputEvent::MouseButton { button, pressed } => {
                self.on_pointer_button(button, pressed);
            }
            InputEvent::Key { code, pressed } => self.on_key_intent(&code, pressed),
            InputEvent::LockChanged { locked } => self.on_lock_change(locked),
            InputEvent::LockError => self.on_lock_error(),
        }
    }

    /// Request pointer capture and hide the move hint. No-op when locked.
    pub fn engage(&mut self) {
        if self.lock.is_locked() {
            return;
        }
        if let Err(e) = self.host.request_lock() {
            log::warn!("pointer lock request failed: {e}");
            self.host.add_error(&e.to_string());
        }
        self.host.set_move_hint(false);
    }

    /// Release pointer capture, zero the intent and emit `Settled`.
    pub fn disengage(&mut self) {
        self.host.release_lock();
        self.lose_lock();
    }

    /// Host reports a lock transition. Losing the lock, voluntarily or not,
    /// behaves exactly like [`disengage`](Self::disengage).
    pub fn on_lock_change(&mut self, locked: bool) {
        match (self.lock, locked) {
            (LockState::Unlocked, true) => {
                self.lock = LockState::Locked;
                log::debug!("pointer locked");
                self.events.emit(&NavEvent::LockChanged(LockState::Locked));
            }
            (LockState::Locked, false) => self.lose_lock(),
            _ => {}
        }
    }

    /// Host could not capture the pointer.
    pub fn on_lock_error(&mut self) {
        log::warn!("pointer lock error reported by host");
        self.host.add_error(POINTER_LOCK_UNAVAILABLE);
    }

    fn lose_lock(&mut self) {
        if self.lock.is_locked() {
            self.lock = LockState::Unlocked;
            log::debug!("pointer unlocked");
            self.events.emit(&NavEvent::LockChanged(LockState::Unlocked));
        }
        self.intent.reset();
        self.settle();
    }

    fn settle(&mut self) {
        log::debug!("settled at {:?}", self.pose);
        self.events.emit(&NavEvent::Settled(self.pose));
    }

    /// Primary button press engages, release disengages.
    pub fn on_pointer_button(&mut self, button: MouseButton, pressed: bool) {
        if button != MouseButton::Left {
            return;
        }
        if pressed {
            self.engage();
        } else {
            self.disengage();
        }
    }

    /// Rotate by a pointer delta in pixels. Ignored unless locked.
    ///
    /// Yaw decreases with rightward motion and pitch with downward motion.
    pub fn on_pointer_delta(&mut self, dx: f64, dy: f64) {
        if !self.lock.is_locked() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let sensitivity = self.settings.look_sensitivity;
        let yaw = self.pose.yaw - dx * sensitivity;
        let pitch = self.pose.pitch - dy * sensitivity;
        self.pose.set_pitch_yaw(pitch, yaw);
        self.events.emit(&NavEvent::Change(self.pose));
    }

    /// Apply a key transition by key code. Unbound keys are ignored.
    pub fn on_key_intent(&mut self, code: &str, pressed: bool) {
        if let Some(action) = self.bindings.lookup(code) {
            self.on_action(action, pressed);
        }
    }

    /// Apply a key transition by action.
    ///
    /// While unlocked a press never moves the camera; a movement press shows
    /// the move hint instead. Releases always apply. `Settled` is emitted
    /// when a release brings the intent back to neutral.
    pub fn on_action(&mut self, action: NavAction, pressed: bool) {
        if pressed {
            if self.lock.is_locked() {
                self.intent.apply(action, true);
            } else if action.is_movement() {
                self.host.set_move_hint(true);
            }
            return;
        }

        let was_neutral = self.intent.is_neutral();
        self.intent.apply(action, false);
        if !was_neutral && self.intent.is_neutral() {
            self.settle();
        }
    }

    /// Advance motion by `dt` seconds. Returns whether the position moved.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn integrate(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let step = self.settings.multiplier(self.intent.speed_mode())
            * dt
            * self.settings.base_speed;
        let forward = f64::from(self.intent.forward_axis) * step;
        let lateral = f64::from(self.intent.right_axis) * step;
        if forward == 0.0 && lateral == 0.0 {
            return false;
        }
        let displacement =
            self.pose.direction() * forward + self.pose.right() * lateral;
        if !displacement.is_finite() {
            return false;
        }
        self.pose.position += displacement;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::camera::HeadlessHost;

    fn controller() -> NavigationController<HeadlessHost> {
        NavigationController::new(HeadlessHost::default(), &Options::default())
    }

    fn locked() -> NavigationController<HeadlessHost> {
        let mut c = controller();
        c.engage();
        let granted = c.host_mut().take_lock_change();
        assert_eq!(granted, Some(true));
        c.on_lock_change(true);
        c
    }

    fn record(
        c: &mut NavigationController<HeadlessHost>,
        kind: EventKind,
    ) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let _ = c.subscribe(kind, move |_| *sink.borrow_mut() += 1);
        count
    }

    fn distance_after(slow: bool, fast: bool) -> f64 {
        let mut c = locked();
        c.on_action(NavAction::Forward, true);
        if slow {
            c.on_action(NavAction::Slow, true);
        }
        if fast {
            c.on_action(NavAction::Fast, true);
        }
        assert!(c.integrate(1.0));
        c.pose().position.length()
    }

    #[test]
    fn pointer_delta_ignored_while_unlocked() {
        let mut c = controller();
        let changes = record(&mut c, EventKind::Change);
        c.on_pointer_delta(100.0, 100.0);
        assert_eq!(c.pose(), Pose::default());
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn pointer_delta_rotates_and_emits_change() {
        let mut c = locked();
        let changes = record(&mut c, EventKind::Change);
        c.on_pointer_delta(100.0, -200.0);
        let pose = c.pose();
        assert!((pose.yaw - (TAU - 0.1)).abs() < 1e-12);
        assert!((pose.pitch - 0.2).abs() < 1e-12);
        assert_eq!(*changes.borrow(), 1);
    }

    #[test]
    fn pitch_clamps_at_vertical() {
        let mut c = locked();
        c.on_pointer_delta(0.0, -1.0e6);
        assert_eq!(c.pose().pitch, FRAC_PI_2);
        c.on_pointer_delta(0.0, 1.0e6);
        assert_eq!(c.pose().pitch, -FRAC_PI_2);
    }

    #[test]
    fn non_finite_delta_is_dropped() {
        let mut c = locked();
        c.on_pointer_delta(f64::NAN, 1.0);
        c.on_pointer_delta(1.0, f64::INFINITY);
        assert_eq!(c.pose(), Pose::default());
    }

    #[test]
    fn slow_wins_when_both_modifiers_held() {
        let both = distance_after(true, true);
        let slow = distance_after(true, false);
        assert!((both - slow).abs() < 1e-12);
        assert!((slow - 2.0).abs() < 1e-12);
        assert!((distance_after(false, true) - 50.0).abs() < 1e-12);
        assert!((distance_after(false, false) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn neutral_intent_never_moves() {
        let mut c = locked();
        for dt in [0.0, 0.016, 1.0, 1.0e6, -1.0, f64::NAN] {
            assert!(!c.integrate(dt));
        }
        assert_eq!(c.pose().position, DVec3::ZERO);
    }

    #[test]
    fn forward_follows_look_direction() {
        let mut c = locked();
        c.set_pitch_yaw(0.0, PI / 2.0);
        c.on_action(NavAction::Forward, true);
        assert!(c.integrate(0.1));
        let p = c.pose().position;
        assert!((p - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn strafe_follows_right_vector() {
        let mut c = locked();
        c.on_action(NavAction::Left, true);
        assert!(c.integrate(0.1));
        assert!((c.pose().position - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn key_cycle_settles_once() {
        let mut c = locked();
        let settled = record(&mut c, EventKind::Settled);
        c.on_key_intent("KeyW", true);
        c.on_key_intent("KeyD", true);
        c.on_key_intent("ShiftLeft", true);
        c.on_key_intent("KeyW", false);
        c.on_key_intent("KeyD", false);
        assert_eq!(*settled.borrow(), 0);
        c.on_key_intent("ShiftLeft", false);
        assert_eq!(*settled.borrow(), 1);
        // stray releases after settling do not re-settle
        c.on_key_intent("KeyW", false);
        c.on_key_intent("KeyQ", false);
        assert_eq!(*settled.borrow(), 1);
    }

    #[test]
    fn movement_press_while_unlocked_shows_hint() {
        let mut c = controller();
        c.on_key_intent("KeyW", true);
        assert!(c.intent().is_neutral());
        assert!(c.host().hint_visible);

        c.engage();
        assert!(!c.host().hint_visible);
    }

    #[test]
    fn modifier_press_while_unlocked_does_nothing() {
        let mut c = controller();
        c.on_key_intent("Space", true);
        assert!(c.intent().is_neutral());
        assert!(!c.host().hint_visible);
    }

    #[test]
    fn lock_loss_zeroes_intent_and_settles() {
        let mut c = locked();
        let settled = record(&mut c, EventKind::Settled);
        let locks = record(&mut c, EventKind::LockChanged);
        c.on_key_intent("KeyW", true);
        c.on_key_intent("Space", true);

        c.on_lock_change(false);
        assert!(c.intent().is_neutral());
        assert_eq!(c.lock_state(), LockState::Unlocked);
        assert_eq!(*settled.borrow(), 1);
        assert_eq!(*locks.borrow(), 1);

        // the released keys arrive later and must not settle again
        c.on_key_intent("KeyW", false);
        c.on_key_intent("Space", false);
        assert_eq!(*settled.borrow(), 1);
    }

    #[test]
    fn disengage_settles_and_releases() {
        let mut c = locked();
        let settled = record(&mut c, EventKind::Settled);
        c.on_pointer_button(MouseButton::Left, false);
        assert_eq!(c.host_mut().take_lock_change(), Some(false));
        assert_eq!(c.lock_state(), LockState::Unlocked);
        assert_eq!(*settled.borrow(), 1);

        // host confirming the release is not a second settle
        c.on_lock_change(false);
        assert_eq!(*settled.borrow(), 1);
    }

    #[test]
    fn engage_is_noop_when_locked() {
        let mut c = locked();
        c.engage();
        assert_eq!(c.host_mut().take_lock_change(), None);
    }

    #[test]
    fn unsupported_lock_reports_error() {
        let mut c = NavigationController::new(
            HeadlessHost::without_lock(),
            &Options::default(),
        );
        c.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(c.lock_state(), LockState::Unlocked);
        assert_eq!(c.host().errors, vec![POINTER_LOCK_UNAVAILABLE.to_owned()]);

        c.handle_event(InputEvent::LockError);
        assert_eq!(c.host().errors.len(), 2);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut c = controller();
        c.on_pointer_button(MouseButton::Right, true);
        assert_eq!(c.host_mut().take_lock_change(), None);
    }

    #[test]
    fn set_pose_normalizes() {
        let mut c = controller();
        c.set_pose(Pose {
            position: DVec3::new(1.0, 2.0, 3.0),
            pitch: 4.0,
            yaw: -FRAC_PI_2,
        });
        let pose = c.pose();
        assert_eq!(pose.pitch, FRAC_PI_2);
        assert!((pose.yaw - 3.0 * FRAC_PI_2).abs() < 1e-12);
        c.set_position(DVec3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(c.pose().position, DVec3::new(1.0, 2.0, 3.0));
    }

    proptest! {
        #[test]
        fn angles_stay_in_range(
            deltas in prop::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 1..64)
        ) {
            let mut c = locked();
            for (dx, dy) in deltas {
                c.on_pointer_delta(dx, dy);
                let pose = c.pose();
                prop_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pose.pitch));
                prop_assert!((0.0..TAU).contains(&pose.yaw));
            }
        }
    }
}
