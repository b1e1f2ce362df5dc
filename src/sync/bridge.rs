use std::cell::RefCell;
use std::rc::Rc;

use super::history::LocationHistory;
use crate::camera::{EventKind, NavEvent, NavigationController, NavigationHost, Pose};
use crate::error::NoclipError;
use crate::location::{decode, encode, LocationState, WebType};

/// Result of one synchronisation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The visible location already described the pose.
    Unchanged,
    /// The visible location was replaced with this URL.
    Published(String),
}

/// Keeps the visible location in step with the settled camera pose.
///
/// Only writes when the pose, at path precision, differs from what the
/// location already says, so repeated settles at rest never touch history.
#[derive(Debug)]
pub struct StateSyncBridge<L: LocationHistory> {
    history: L,
    web_type: WebType,
    org_id: String,
    asset_id: String,
}

impl<L: LocationHistory> StateSyncBridge<L> {
    /// Bridge for the given asset.
    #[must_use]
    pub fn new(history: L, web_type: WebType, org_id: &str, asset_id: &str) -> Self {
        Self {
            history,
            web_type,
            org_id: org_id.to_owned(),
            asset_id: asset_id.to_owned(),
        }
    }

    /// Bridge for the asset named by a decoded location.
    #[must_use]
    pub fn for_location(history: L, location: &LocationState) -> Self {
        Self::new(
            history,
            location.web_type,
            &location.org_id,
            &location.asset_id,
        )
    }

    /// The wrapped history.
    #[must_use]
    pub fn history(&self) -> &L {
        &self.history
    }

    /// Compare `pose` with the visible location and replace it if they
    /// differ. The query string is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Propagates a failed history write.
    pub fn sync(&mut self, pose: &Pose) -> Result<SyncOutcome, NoclipError> {
        let candidate = LocationState::from_pose(
            self.web_type,
            &self.org_id,
            &self.asset_id,
            pose,
        );
        let current = self.history.path();
        let baseline = decode(&current)
            .inspect_err(|e| log::warn!("visible location not decodable, overwriting: {e}"))
            .ok();

        if baseline.as_ref() == Some(&candidate) {
            return Ok(SyncOutcome::Unchanged);
        }

        let merged = baseline
            .as_ref()
            .map_or_else(|| candidate.clone(), |b| candidate.merge_over(b));
        let url = format!("{}{}", encode(&merged), self.history.query());
        self.history.replace(&url)?;
        log::debug!("published location {url}");
        Ok(SyncOutcome::Published(url))
    }

    /// React to a navigation event; only `Settled` triggers a sync. Write
    /// failures are logged, never raised.
    pub fn handle(&mut self, event: &NavEvent) -> Option<SyncOutcome> {
        let NavEvent::Settled(pose) = event else {
            return None;
        };
        self.sync(pose)
            .inspect_err(|e| log::warn!("location sync failed: {e}"))
            .ok()
    }
}

/// Subscribe `bridge` to `controller`'s settle notifications. The returned
/// handle shares the bridge with the subscription.
pub fn connect<H, L>(
    controller: &mut NavigationController<H>,
    bridge: StateSyncBridge<L>,
) -> Rc<RefCell<StateSyncBridge<L>>>
where
    H: NavigationHost,
    L: LocationHistory + 'static,
{
    let shared = Rc::new(RefCell::new(bridge));
    let listener = Rc::clone(&shared);
    let _ = controller.subscribe(EventKind::Settled, move |event| {
        let _ = listener.borrow_mut().handle(event);
    });
    shared
}
