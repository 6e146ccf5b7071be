//! Constraint resolution for the next vertex.
//!
//! The calculation is done with plain planar trigonometry, so it is not accurate for
//! unprojected (geographic) coordinate systems.
use crate::*;

/// The outcome of resolving a vertex against the edge constraints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The resolved vertex, in map coordinates.
    pub point: Point2,
    /// Edge length from the anchor. Signed when projected onto a locked angle.
    pub distance: f64,
    /// Absolute edge direction in radians.
    pub angle: f64,
    /// Direction of the previous edge in radians, `0` for absolute angles.
    pub base_angle: f64,
}

impl Resolution {
    /// The edge direction in degrees, relative to the base angle.
    pub fn relative_degrees(&self) -> f64 {
        self.angle.to_degrees() - self.base_angle.to_degrees()
    }
}

/// Resolve the next vertex from a snapped pointer position.
///
/// `anchor` is the last committed vertex and `pre_anchor` the one before it, which is only
/// consulted for relative angles. Precedence:
///
/// 1. The pointer is expected to be snapped already; snapping feeds the calculation but locked
///    values override where it lands.
/// 2. A locked angle is taken from the constraints, otherwise from the pointer.
/// 3. A locked distance is taken from the constraints. A locked distance of `0` pins nothing
///    and the pointer is followed instead. With only the angle pinned, the distance is the
///    signed projection of the pointer onto the locked direction, so a pointer behind the
///    anchor lands on the opposite ray. Otherwise it is the pointer distance.
/// 4. With nothing pinned the snapped pointer is returned untouched.
pub fn resolve_vertex(
    snapped: Point2,
    anchor: Point2,
    pre_anchor: Option<Point2>,
    constraints: &EdgeConstraints,
) -> Resolution {
    let base_angle = match (constraints.angle_is_relative, pre_anchor) {
        (true, Some(b)) => heading(b, anchor),
        _ => 0.0,
    };

    let offset = snapped.sub(anchor);

    let angle = if constraints.angle_locked {
        base_angle + constraints.preset_angle.to_radians()
    } else {
        heading(anchor, snapped)
    };

    let distance = if constraints.distance_pinned() {
        constraints.preset_distance
    } else if constraints.angle_locked {
        dot_prod(offset, direction(angle))
    } else {
        offset.mag()
    };

    let point = if constraints.any_locked() {
        polar(anchor, distance, angle)
    } else {
        snapped
    };

    Resolution {
        point,
        distance,
        angle,
        base_angle,
    }
}
