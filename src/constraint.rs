//! The user adjustable edge constraints.
//!
//! Hosts keep an [`EdgeConstraints`] current from their toolbar widgets and read back the
//! unlocked fields after each preview, which mirror the live geometry.
use crate::*;

/// Largest edge length the numeric input accepts.
pub const MAX_PRESET_DISTANCE: f64 = 9999.999;
/// Angle inputs are bounded to one full turn either way.
pub const MAX_PRESET_ANGLE: f64 = 360.0;

#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EdgeConstraints {
    /// Desired edge length in map units. `0` means follow the pointer.
    pub preset_distance: f64,
    /// Desired edge direction, in degrees.
    pub preset_angle: f64,
    pub distance_locked: bool,
    pub angle_locked: bool,
    /// Measure `preset_angle` from the previous edge instead of the +X axis.
    pub angle_is_relative: bool,
}

impl Default for EdgeConstraints {
    fn default() -> Self {
        Self {
            preset_distance: 10.0,
            preset_angle: 0.0,
            distance_locked: false,
            angle_locked: false,
            angle_is_relative: false,
        }
    }
}

impl EdgeConstraints {
    /// Constraints which pin nothing.
    pub fn free() -> Self {
        Self::default()
    }

    /// Lock the edge length to `distance`.
    pub fn lock_distance(mut self, distance: f64) -> Self {
        self.set_distance(distance);
        self.distance_locked = true;
        self
    }

    /// Lock the edge direction to `degrees`, measured from the +X axis.
    pub fn lock_angle(mut self, degrees: f64) -> Self {
        self.set_angle(degrees);
        self.angle_locked = true;
        self.angle_is_relative = false;
        self
    }

    /// Lock the edge direction to `degrees`, measured from the previous edge.
    pub fn lock_relative_angle(mut self, degrees: f64) -> Self {
        self.set_angle(degrees);
        self.angle_locked = true;
        self.angle_is_relative = true;
        self
    }

    /// Set the preset distance, clamped to `[0, MAX_PRESET_DISTANCE]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_distance(&mut self, distance: f64) {
        if distance.is_finite() {
            self.preset_distance = distance.clamp(0.0, MAX_PRESET_DISTANCE);
        }
    }

    /// Set the preset angle in degrees, clamped to `[-360, 360]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_angle(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.preset_angle = degrees.clamp(-MAX_PRESET_ANGLE, MAX_PRESET_ANGLE);
        }
    }

    /// The distance is locked to a usable length. A locked `0` follows the pointer.
    pub fn distance_pinned(&self) -> bool {
        self.distance_locked && self.preset_distance > 0.0
    }

    /// Either value pins the next vertex.
    pub fn any_locked(&self) -> bool {
        self.distance_pinned() || self.angle_locked
    }

    /// Mirror a resolution back into the fields the user has **not** locked.
    ///
    /// Locked fields are never touched. The mirrored distance is written as is, which may be
    /// negative when the pointer is behind the anchor of a locked angle.
    pub fn mirror(&mut self, resolution: &Resolution) {
        if !self.distance_locked {
            self.preset_distance = resolution.distance;
        }
        if !self.angle_locked {
            self.preset_angle = resolution.relative_degrees();
        }
    }
}
