//! Constrained vertex capture for digitizing polygon and line features.
//!
//! A [`CaptureController`] receives pointer events from the host and drives a
//! [`VertexCaptureSession`], which places each new vertex from the snapped pointer position
//! and the user's [`EdgeConstraints`] (a locked edge length and/or direction).
//!
//! All geometry is planar. Distances and angles are not meaningful for unprojected
//! (geographic) coordinate systems.
use rustc_hash::FxHashMap as HashMap;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod constraint;
mod controller;
mod geometry;
mod host;
#[cfg(feature = "io")]
pub mod io;
#[cfg(test)]
mod mock;
mod point;
pub mod polygon;
mod polyline;
mod resolve;
mod session;

pub use constraint::*;
pub use controller::*;
pub use geometry::*;
pub use host::*;
pub use point::*;
pub use polygon::*;
pub use polyline::*;
pub use resolve::*;
pub use session::*;

/// Finite coordinates for property tests, on a 1/8 unit lattice.
#[cfg(test)]
#[derive(Copy, Clone, Debug)]
struct CoordGen(i16, i16);

#[cfg(test)]
impl CoordGen {
    fn pt(self) -> Point2 {
        [f64::from(self.0) / 8.0, f64::from(self.1) / 8.0]
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for CoordGen {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(
            <i16 as quickcheck::Arbitrary>::arbitrary(g),
            <i16 as quickcheck::Arbitrary>::arbitrary(g),
        )
    }
}
