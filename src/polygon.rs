use crate::*;

/// A simple polygon, stored as an open ring (the closing vertex is implied).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon2(Vec<Point2>);

impl Polygon2 {
    pub fn new<I, P>(points: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = P>,
        P: ToPoint2,
    {
        let points = points.into_iter().map(ToPoint2::to_p2).collect::<Vec<_>>();
        if points.len() < GeometryKind::Polygon.min_vertices() {
            Err("polygon requires 3 or more points to be valid")
        } else {
            Ok(Polygon2(points))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pts(&self) -> &[Point2] {
        &self.0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        self.0.iter().copied()
    }

    /// Iterate the ring with the first vertex repeated at the end.
    pub fn closed_ring(&self) -> impl Iterator<Item = Point2> + '_ {
        self.iter().chain(self.0.first().copied())
    }
}
