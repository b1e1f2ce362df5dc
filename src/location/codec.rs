use std::sync::OnceLock;

use regex::Regex;

use super::state::{
    floor_millis, heading_degrees, round_degrees, LocationState, Orientation, Position, WebType,
};
use crate::error::NoclipError;

/// Canonical location grammar, matched case-insensitively and anchored at
/// the start only. Text after the last recognised group is ignored, which
/// keeps links that carried a third (roll) angle decodable.
const LOCATION_PATTERN: &str = r"(?ix)
    ^
    /?
    (noclip)/
    ([a-z]+)\.([a-z0-9_-]+)                                   # orgId.assetId
    (?:
        @(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?)
        (?:
            ,(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?)  # ,pitch,yaw in degrees
        )?
    )?
";

fn location_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(LOCATION_PATTERN)
                .inspect_err(|e| log::error!("location pattern failed to compile: {e}"))
                .ok()
        })
        .as_ref()
}

/// Parse a location path.
///
/// Angles in the path are degrees and come back as radians.
///
/// # Errors
///
/// [`NoclipError::InvalidLocationFormat`] when the path does not start with
/// `/{webType}/{orgId}.{assetId}`.
///
/// ```
/// use noclip::location::decode;
///
/// let state = decode("/noclip/acme.map1@1.5,2,-3").unwrap();
/// assert_eq!(state.asset_id, "map1");
/// assert_eq!(state.position.unwrap().z, -3.0);
/// assert!(state.orientation.is_none());
/// ```
pub fn decode(path: &str) -> Result<LocationState, NoclipError> {
    let invalid = || NoclipError::InvalidLocationFormat(path.to_owned());
    let caps = location_regex()
        .and_then(|re| re.captures(path))
        .ok_or_else(invalid)?;

    let group = |i: usize| caps.get(i).map(|m| m.as_str());
    let number = |i: usize| -> Result<Option<f64>, NoclipError> {
        group(i)
            .map(|s| s.parse::<f64>().map_err(|_| invalid()))
            .transpose()
    };

    let web_type: WebType = group(1).ok_or_else(invalid)?.parse()?;
    let org_id = group(2).ok_or_else(invalid)?.to_owned();
    let asset_id = group(3).ok_or_else(invalid)?.to_owned();

    let position = match (number(4)?, number(5)?, number(6)?) {
        (Some(x), Some(y), Some(z)) => Some(Position { x, y, z }),
        _ => None,
    };
    let orientation = match (position, number(7)?, number(8)?) {
        (Some(_), Some(pitch), Some(yaw)) => Some(Orientation {
            pitch: pitch.to_radians(),
            yaw: yaw.to_radians(),
        }),
        _ => None,
    };

    Ok(LocationState {
        web_type,
        org_id,
        asset_id,
        position,
        orientation,
    })
}

fn push_millis(out: &mut String, value: f64) {
    let millis = floor_millis(value);
    let sign = if millis < 0 { "-" } else { "" };
    let abs = millis.unsigned_abs();
    out.push_str(&format!("{sign}{}.{:03}", abs / 1000, abs % 1000));
}

/// Render the canonical path for `state`.
///
/// Position components are floored to three decimals and always written
/// with three; angles are rounded to whole degrees, yaw wrapped into
/// `[0, 360)`. The angle group is only written after a position group.
///
/// ```
/// use noclip::location::{encode, LocationState, Position};
///
/// let mut state = LocationState::new("acme", "map1");
/// state.position = Some(Position { x: 1.2349, y: 5.0, z: -2.5 });
/// assert_eq!(encode(&state), "/noclip/acme.map1@1.234,5.000,-2.500");
/// ```
#[must_use]
pub fn encode(state: &LocationState) -> String {
    let mut out = format!(
        "/{}/{}.{}",
        state.web_type, state.org_id, state.asset_id
    );
    if let Some(position) = state.position {
        out.push('@');
        push_millis(&mut out, position.x);
        out.push(',');
        push_millis(&mut out, position.y);
        out.push(',');
        push_millis(&mut out, position.z);

        if let Some(orientation) = state.orientation {
            out.push_str(&format!(
                ",{},{}",
                round_degrees(orientation.pitch),
                heading_degrees(orientation.yaw)
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use proptest::prelude::*;

    use super::*;

    const FULL: &str = "/noclip/acme.map1@1.234,5.000,-2.500,90,180";

    #[test]
    fn decodes_full_location() {
        let state = decode(FULL).unwrap();
        assert_eq!(state.web_type, WebType::Noclip);
        assert_eq!(state.org_id, "acme");
        assert_eq!(state.asset_id, "map1");
        assert_eq!(
            state.position,
            Some(Position { x: 1.234, y: 5.0, z: -2.5 })
        );
        let orientation = state.orientation.unwrap();
        assert!((orientation.pitch - FRAC_PI_2).abs() < 1e-12);
        assert!((orientation.yaw - PI).abs() < 1e-12);
    }

    #[test]
    fn full_location_encodes_back_verbatim() {
        assert_eq!(encode(&decode(FULL).unwrap()), FULL);
    }

    #[test]
    fn bare_asset_has_no_camera() {
        let state = decode("/noclip/acme.map1").unwrap();
        assert_eq!(state, LocationState::new("acme", "map1"));
        assert_eq!(encode(&state), "/noclip/acme.map1");
    }

    #[test]
    fn position_without_angles() {
        let state = decode("/noclip/acme.map1@1,2,3").unwrap();
        assert_eq!(state.position, Some(Position { x: 1.0, y: 2.0, z: 3.0 }));
        assert!(state.orientation.is_none());
        assert_eq!(encode(&state), "/noclip/acme.map1@1.000,2.000,3.000");
    }

    #[test]
    fn rejects_missing_prefix() {
        for path in ["/bogus", "", "/noclip/", "/noclip/acme", "/noclip/ac1.map", "/orbit/acme.map1"] {
            let err = decode(path).unwrap_err();
            assert!(
                matches!(err, NoclipError::InvalidLocationFormat(ref p) if p == path),
                "{path:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn prefix_is_case_insensitive_and_slash_optional() {
        let state = decode("NOCLIP/Acme.Map_1-b").unwrap();
        assert_eq!(state.web_type, WebType::Noclip);
        assert_eq!(state.org_id, "Acme");
        assert_eq!(state.asset_id, "Map_1-b");
        assert_eq!(encode(&state), "/noclip/Acme.Map_1-b");
    }

    #[test]
    fn incomplete_position_is_ignored() {
        let state = decode("/noclip/acme.map1@1,2").unwrap();
        assert!(state.position.is_none());
    }

    #[test]
    fn legacy_roll_angle_is_ignored() {
        let state = decode("/noclip/acme.map1@1,2,3,10,20,30").unwrap();
        assert_eq!(encode(&state), "/noclip/acme.map1@1.000,2.000,3.000,10,20");
    }

    #[test]
    fn single_angle_drops_orientation() {
        let state = decode("/noclip/acme.map1@1,2,3,45").unwrap();
        assert!(state.position.is_some());
        assert!(state.orientation.is_none());
    }

    #[test]
    fn orphan_orientation_is_not_encoded() {
        let mut state = LocationState::new("acme", "map1");
        state.orientation = Some(Orientation { pitch: 1.0, yaw: 1.0 });
        assert_eq!(encode(&state), "/noclip/acme.map1");
    }

    #[test]
    fn encode_floors_and_rounds() {
        let mut state = LocationState::new("acme", "map1");
        state.position = Some(Position { x: -0.0004, y: 10.9999, z: 0.0 });
        state.orientation = Some(Orientation {
            pitch: (-45.6_f64).to_radians(),
            yaw: 359.4_f64.to_radians(),
        });
        assert_eq!(encode(&state), "/noclip/acme.map1@-0.001,10.999,0.000,-46,359");
    }

    #[test]
    fn out_of_turn_yaw_encodes_canonically() {
        let state = decode("/noclip/acme.map1@1,2,3,10,-90").unwrap();
        assert_eq!(encode(&state), "/noclip/acme.map1@1.000,2.000,3.000,10,270");
        let state = decode("/noclip/acme.map1@1,2,3,0,360").unwrap();
        assert_eq!(encode(&state), "/noclip/acme.map1@1.000,2.000,3.000,0,0");
    }

    fn arb_state() -> impl Strategy<Value = LocationState> {
        (
            "[a-z]{1,8}",
            "[a-z0-9_-]{1,12}",
            prop::option::of((
                (-1_000_000_000i64..1_000_000_000, -1_000_000_000i64..1_000_000_000, -1_000_000_000i64..1_000_000_000),
                prop::option::of((-90i64..=90, 0i64..360)),
            )),
        )
            .prop_map(|(org_id, asset_id, camera)| {
                let mut state = LocationState::new(org_id, asset_id);
                if let Some(((x, y, z), angles)) = camera {
                    state.position = Some(Position {
                        x: x as f64 / 1000.0,
                        y: y as f64 / 1000.0,
                        z: z as f64 / 1000.0,
                    });
                    state.orientation = angles.map(|(pitch, yaw)| Orientation {
                        pitch: (pitch as f64).to_radians(),
                        yaw: (yaw as f64).to_radians(),
                    });
                }
                state
            })
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(state in arb_state()) {
            let path = encode(&state);
            prop_assert_eq!(decode(&path).unwrap(), state);
        }

        #[test]
        fn encode_is_idempotent_through_decode(state in arb_state()) {
            let path = encode(&state);
            prop_assert_eq!(encode(&decode(&path).unwrap()), path);
        }

        #[test]
        fn garbage_never_panics(path in "\\PC{0,40}") {
            let _ = decode(&path);
        }
    }
}
