use rand::Rng;

use super::manifest::{MapManifest, Spawn};
use crate::camera::Pose;
use crate::error::NoclipError;
use crate::location::{decode, LocationState, WebType};
use crate::options::HostOptions;

/// Asset advertised on the intro page.
pub const FEATURED_ASSET: (&str, &str) = ("facepunch", "construct");

/// What the page should show for a given path.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Fly through the addressed asset.
    Noclip(LocationState),
    /// No usable location; show the intro with a featured link.
    Intro,
}

/// Decide the route for the page path. Any path that does not decode falls
/// back to the intro.
#[must_use]
pub fn route_for_path(path: &str) -> Route {
    match decode(path) {
        Ok(state) if !state.org_id.is_empty() && !state.asset_id.is_empty() => {
            match state.web_type {
                WebType::Noclip => Route::Noclip(state),
            }
        }
        Ok(_) => Route::Intro,
        Err(e) => {
            log::debug!("no session for path: {e}");
            Route::Intro
        }
    }
}

/// Starting pose: the location's own placement when it has one, otherwise
/// a random spawn from the manifest.
///
/// # Errors
///
/// [`NoclipError::NoSpawn`] when neither is available.
pub fn initial_pose<R: Rng + ?Sized>(
    location: &LocationState,
    manifest: &MapManifest,
    rng: &mut R,
) -> Result<Pose, NoclipError> {
    if let Some(pose) = location.pose() {
        return Ok(pose);
    }
    manifest
        .choose_spawn(rng)
        .map(Spawn::pose)
        .ok_or(NoclipError::NoSpawn)
}

/// Directory model files of an asset are served from (trailing slash).
#[must_use]
pub fn asset_base_url(hosts: &HostOptions, org_id: &str, asset_id: &str) -> String {
    format!("{}/{org_id}/{asset_id}/", hosts.media_host)
}

/// Manifest endpoint for an asset.
#[must_use]
pub fn manifest_url(hosts: &HostOptions, org_id: &str, asset_id: &str) -> String {
    format!("{}/getMap?id={org_id}.{asset_id}", hosts.api_host)
}

/// Path of the featured asset linked from the intro.
#[must_use]
pub fn intro_path() -> String {
    let (org_id, asset_id) = FEATURED_ASSET;
    format!("/{}/{org_id}.{asset_id}", WebType::Noclip)
}

/// Absolute share link for the featured asset.
#[must_use]
pub fn intro_link(hosts: &HostOptions) -> String {
    format!("{}{}", hosts.self_host, intro_path())
}
