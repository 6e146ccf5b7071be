//! Finished feature geometries and the layer shapes they are built for.
use crate::*;

/// The kind of feature being captured. Fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GeometryKind {
    Polygon,
    Line,
}

impl GeometryKind {
    /// Minimum number of vertices a finished feature of this kind needs.
    pub fn min_vertices(self) -> usize {
        match self {
            GeometryKind::Polygon => 3,
            GeometryKind::Line => 2,
        }
    }

    /// Lower case noun used in user messages.
    pub fn noun(self) -> &'static str {
        match self {
            GeometryKind::Polygon => "polygon",
            GeometryKind::Line => "line",
        }
    }
}

/// The geometry type a layer reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerGeometryType {
    Point,
    Line,
    Polygon,
    NoGeometry,
}

impl LayerGeometryType {
    /// The capturable kind, if any. Point layers are never eligible.
    pub fn capture_kind(self) -> Option<GeometryKind> {
        match self {
            LayerGeometryType::Polygon => Some(GeometryKind::Polygon),
            LayerGeometryType::Line => Some(GeometryKind::Line),
            LayerGeometryType::Point | LayerGeometryType::NoGeometry => None,
        }
    }
}

/// What a target layer stores: the kind plus whether it is a multi-part layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerShape {
    pub kind: GeometryKind,
    pub multipart: bool,
}

impl LayerShape {
    pub fn single(kind: GeometryKind) -> Self {
        Self {
            kind,
            multipart: false,
        }
    }

    pub fn multi(kind: GeometryKind) -> Self {
        Self {
            kind,
            multipart: true,
        }
    }

    /// Check a geometry can be stored in a layer of this shape.
    ///
    /// A multi-part layer accepts single parts; a single-part layer only accepts geometries
    /// with one part.
    pub fn accepts(&self, geometry: &Geometry) -> bool {
        geometry.kind() == self.kind && (self.multipart || !geometry.is_multipart())
    }
}

/// A finished feature geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Geometry {
    Polygon(Polygon2),
    MultiPolygon(Vec<Polygon2>),
    LineString(Polyline2),
    MultiLineString(Vec<Polyline2>),
}

impl Geometry {
    /// Build a geometry from captured vertices for a layer of the given shape.
    ///
    /// Multi-part layers receive a multi geometry holding a single part.
    pub fn from_vertices(shape: LayerShape, points: &[Point2]) -> Result<Self, &'static str> {
        let points = points.iter().copied();
        Ok(match (shape.kind, shape.multipart) {
            (GeometryKind::Polygon, false) => Geometry::Polygon(Polygon2::new(points)?),
            (GeometryKind::Polygon, true) => Geometry::MultiPolygon(vec![Polygon2::new(points)?]),
            (GeometryKind::Line, false) => Geometry::LineString(Polyline2::new(points)?),
            (GeometryKind::Line, true) => Geometry::MultiLineString(vec![Polyline2::new(points)?]),
        })
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => GeometryKind::Polygon,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => GeometryKind::Line,
        }
    }

    /// Number of parts.
    pub fn part_count(&self) -> usize {
        match self {
            Geometry::Polygon(_) | Geometry::LineString(_) => 1,
            Geometry::MultiPolygon(x) => x.len(),
            Geometry::MultiLineString(x) => x.len(),
        }
    }

    /// Holds more than one part.
    ///
    /// Note that a multi geometry with a single part is _not_ multipart.
    pub fn is_multipart(&self) -> bool {
        self.part_count() > 1
    }

    /// Total vertex count over all parts (polygon rings are not closed).
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Polygon(p) => p.len(),
            Geometry::MultiPolygon(x) => x.iter().map(Polygon2::len).sum(),
            Geometry::LineString(l) => l.len(),
            Geometry::MultiLineString(x) => x.iter().map(Polyline2::len).sum(),
        }
    }

    /// Iterate every vertex of every part.
    pub fn vertices(&self) -> Box<dyn Iterator<Item = Point2> + '_> {
        match self {
            Geometry::Polygon(p) => Box::new(p.iter()),
            Geometry::MultiPolygon(x) => Box::new(x.iter().flat_map(Polygon2::iter)),
            Geometry::LineString(l) => Box::new(l.iter()),
            Geometry::MultiLineString(x) => Box::new(x.iter().flat_map(Polyline2::iter)),
        }
    }
}
