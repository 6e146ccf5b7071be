use std::ops;

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter()
            .zip(self)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            .sqrt()
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self
    where
        Self: Sized + Copy,
        Rhs: Point,
    {
        self.add(rhs.scale(-1.0))
    }
}

/// 2D Point (X,Y) in map units.
pub type Point2 = [f64; 2];

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Sub::sub)
    }
}
impl Point for Point2 {
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay] = self;
        let [bx, by] = b;
        [f(ax, bx), f(ay, by)]
    }
}

pub trait ToPoint2 {
    fn to_p2(self) -> Point2;
}

impl ToPoint2 for Point2 {
    fn to_p2(self) -> Point2 {
        self
    }
}
impl ToPoint2 for &Point2 {
    fn to_p2(self) -> Point2 {
        *self
    }
}

pub fn dot_prod(a: Point2, b: Point2) -> f64 {
    a.into_iter().zip(b).map(|(a, b)| a * b).sum()
}

/// The unit vector pointing along `angle` (radians, counter-clockwise from +X).
pub fn direction(angle: f64) -> Point2 {
    [angle.cos(), angle.sin()]
}

/// The heading of the vector `from -> to`, in radians in `[-π, π]`.
///
/// A zero length vector has a heading of `0`.
pub fn heading(from: Point2, to: Point2) -> f64 {
    let [dx, dy] = to.sub(from);
    dy.atan2(dx)
}

/// The point `distance` away from `origin` along `angle` (radians).
///
/// Plain planar trigonometry; not meaningful for geographic coordinates.
pub fn polar(origin: Point2, distance: f64, angle: f64) -> Point2 {
    let [x, y] = origin;
    [x + angle.cos() * distance, y + angle.sin() * distance]
}

/// Both coordinates are within `1e-7` of each other.
pub fn coincident(a: impl ToPoint2, b: impl ToPoint2) -> bool {
    let [x, y] = a.to_p2().sub(b.to_p2());
    x.abs() < 1e-7 && y.abs() < 1e-7
}

/// Helper function which effectively transforms to [`Point::xfm`].
#[inline(always)]
pub fn xfm<P: Point, F: Fn(f64, f64) -> f64>(a: P, b: P, f: F) -> P {
    P::xfm(a, b, f)
}
