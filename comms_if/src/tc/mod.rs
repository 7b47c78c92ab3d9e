//! # Telecommand module
//!
//! This module provides the telecommands which deliver references, tracking requests and
//! configuration updates to the reference manager.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// Internal
use crate::msg::{Curve, Path, PoseStamped};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the exec by a reference source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Tc {
    /// Replace the curve reference and begin tracking it
    Curve(Curve),

    /// Replace the discrete path reference and begin tracking it
    Path(Path),

    /// Replace the single pose reference and begin tracking it
    Pose(PoseStamped),

    /// Request a change of the tracked reference type
    SetTracking(TrackingType),

    /// Update the reference manager parameters
    Params(ParamsUpdate),
}

/// Telecommand types.
///
/// The type is given as the `"type"` string in the JSON representation of a TC.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum TcType {
    Curve,
    Path,
    Pose,
    SetTracking,
    Params,
}

/// The reference types which may be requested with a [`Tc::SetTracking`].
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum TrackingType {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "CURVE")]
    Curve,
    #[serde(rename = "PATH")]
    Path,
    #[serde(rename = "POSE")]
    Pose,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0:?} is expected to have a payload but it doesn't")]
    MissingPayload(TcType),

    #[error("TC of type {0:?} has an invalid payload: {1}")]
    InvalidPayload(TcType, serde_json::Error),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A partial update of the reference manager parameters.
///
/// Only those fields which are present are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParamsUpdate {
    pub waypoint_radius_m: Option<f64>,
    pub waypoint_yaw_accuracy_rad: Option<f64>,
    pub waypoint_hold_duration_s: Option<f64>,
    pub fallback_to_pose: Option<bool>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e)),
        };

        // Get the type of the TC
        let type_str = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(TcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };
        let tc_type = match TcType::from_str(type_str) {
            Some(t) => t,
            None => {
                return Err(TcParseError::InvalidType(format!(
                    "{} is not a recognised TC type",
                    type_str
                )))
            }
        };

        // All TCs carry a payload
        let payload = &val["payload"];
        if payload.is_null() {
            return Err(TcParseError::MissingPayload(tc_type));
        }

        let payload = payload.clone();
        let tc = match tc_type {
            TcType::Curve => serde_json::from_value(payload).map(Tc::Curve),
            TcType::Path => serde_json::from_value(payload).map(Tc::Path),
            TcType::Pose => serde_json::from_value(payload).map(Tc::Pose),
            TcType::SetTracking => serde_json::from_value(payload).map(Tc::SetTracking),
            TcType::Params => serde_json::from_value(payload).map(Tc::Params),
        };

        tc.map_err(|e| TcParseError::InvalidPayload(tc_type, e))
    }

    /// Get the type of this TC
    pub fn tc_type(&self) -> TcType {
        match self {
            Tc::Curve(_) => TcType::Curve,
            Tc::Path(_) => TcType::Path,
            Tc::Pose(_) => TcType::Pose,
            Tc::SetTracking(_) => TcType::SetTracking,
            Tc::Params(_) => TcType::Params,
        }
    }
}

impl TcType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "CURVE" => Some(TcType::Curve),
            "PATH" => Some(TcType::Path),
            "POSE" => Some(TcType::Pose),
            "SET_TRACKING" => Some(TcType::SetTracking),
            "PARAMS" => Some(TcType::Params),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_path_tc() {
        let tc = Tc::from_json(
            r#"{
                "type": "PATH",
                "payload": {
                    "header": { "stamp_s": 1.5, "frame_id": "map" },
                    "poses": [
                        { "pose": { "position": { "x": 1.0, "y": 0.0, "z": 2.0 } } },
                        { "pose": {
                            "position": { "x": 2.0, "y": 0.0, "z": 2.0 },
                            "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                        } }
                    ]
                }
            }"#,
        )
        .unwrap();

        match tc {
            Tc::Path(p) => {
                assert_eq!(p.header.frame_id, "map");
                assert_eq!(p.poses.len(), 2);
                assert_eq!(p.poses[0].pose.orientation.w, 1.0);
                assert!(!p.poses[0].header.is_stamped());
            }
            t => panic!("Expected a path TC, got {:?}", t.tc_type()),
        }
    }

    #[test]
    fn test_parse_set_tracking_tc() {
        let tc = Tc::from_json(r#"{"type": "SET_TRACKING", "payload": "POSE"}"#).unwrap();
        assert_eq!(tc.tc_type(), TcType::SetTracking);

        match tc {
            Tc::SetTracking(t) => assert_eq!(t, TrackingType::Pose),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_partial_params_tc() {
        let tc = Tc::from_json(r#"{"type": "PARAMS", "payload": {"fallback_to_pose": true}}"#)
            .unwrap();

        match tc {
            Tc::Params(u) => {
                assert_eq!(u.fallback_to_pose, Some(true));
                assert_eq!(u.waypoint_radius_m, None);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Tc::from_json("not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "JUMP", "payload": {}}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "POSE"}"#),
            Err(TcParseError::MissingPayload(TcType::Pose))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "SET_TRACKING", "payload": "SIDEWAYS"}"#),
            Err(TcParseError::InvalidPayload(TcType::SetTracking, _))
        ));
    }
}
