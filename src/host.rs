//! The contracts the capture core needs from its host application.
//!
//! Everything is called synchronously on the host's event thread.
use crate::*;

/// Attribute values of a new feature, keyed by field name.
pub type Attributes = HashMap<String, String>;

/// Snaps a map position to nearby background geometry.
///
/// Must be free of side effects; `None` means nothing was in snapping tolerance.
pub trait Snapper {
    fn snap(&self, point: Point2) -> Option<Point2>;
}

impl<F> Snapper for F
where
    F: Fn(Point2) -> Option<Point2>,
{
    fn snap(&self, point: Point2) -> Option<Point2> {
        self(point)
    }
}

/// A snapper which never snaps.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSnap;

impl Snapper for NoSnap {
    fn snap(&self, _: Point2) -> Option<Point2> {
        None
    }
}

/// Snap a point against the background layers, falling back to the point itself.
pub fn snap_to_background_layers<S: Snapper + ?Sized>(snapper: &S, point: Point2) -> Point2 {
    match snapper.snap(point) {
        Some(snapped) => {
            log::trace!("snapped {:?} -> {:?}", point, snapped);
            snapped
        }
        None => point,
    }
}

/// The live preview: the rubber band outline and its vertex markers.
///
/// Markers are a projection of the committed vertices plus the floating pointer vertex, so the
/// whole state is handed over on each redraw.
pub trait RubberBand {
    fn redraw(&mut self, committed: &[Point2], floating: Option<Point2>);
    fn clear(&mut self);
}

/// The map canvas: snapping and preview drawing.
pub trait Canvas: Snapper + RubberBand {}

impl<T: Snapper + RubberBand> Canvas for T {}

/// Transforms between map coordinates and a layer's native CRS.
///
/// Capture only converts towards the layer. The inverse is for hosts drawing stored layer
/// geometry back onto the map, and the two must round trip within floating point precision.
pub trait CrsTransform {
    fn to_layer_coordinates(&self, point: Point2) -> Point2;
    fn to_map_coordinates(&self, point: Point2) -> Point2;
}

/// Layer and map share a CRS.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl CrsTransform for Identity {
    fn to_layer_coordinates(&self, point: Point2) -> Point2 {
        point
    }
    fn to_map_coordinates(&self, point: Point2) -> Point2 {
        point
    }
}

/// Project policy for new polygons overlapping existing ones.
pub trait IntersectionPolicy {
    /// New polygons on this layer have existing features cut out of them.
    fn avoids_intersections(&self) -> bool {
        false
    }

    /// Remove the parts of `geometry` overlapping existing features.
    ///
    /// May change the part count in either direction.
    fn remove_intersections(&self, geometry: Geometry) -> Geometry {
        geometry
    }
}

/// Persists finished features.
pub trait FeatureSink {
    /// Default attribute values for a new feature.
    fn default_attributes(&self) -> Attributes {
        Attributes::default()
    }

    /// Add the vertices of `geometry` to neighbouring features for topological editing.
    fn add_topological_points(&mut self, _geometry: &Geometry) {}

    /// Store a new feature, returning whether it was actually added.
    fn insert_feature(&mut self, geometry: Geometry, attributes: Attributes) -> bool;
}

/// Static description of a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerInfo {
    pub id: String,
    pub is_vector: bool,
    pub editable: bool,
    pub geometry_type: LayerGeometryType,
    pub multipart: bool,
}

impl LayerInfo {
    /// The shape to capture for, if the layer is eligible for capturing.
    ///
    /// Eligible layers are editable vector layers of polygon or line type.
    pub fn capture_shape(&self) -> Option<LayerShape> {
        if !self.is_vector || !self.editable {
            return None;
        }
        self.geometry_type.capture_kind().map(|kind| LayerShape {
            kind,
            multipart: self.multipart,
        })
    }
}

/// A layer features are captured into.
pub trait TargetLayer: CrsTransform + IntersectionPolicy + FeatureSink {
    fn info(&self) -> LayerInfo;
}

/// Edits the attributes of a feature before it is stored.
pub trait AttributeForm {
    /// Returns `false` if the user rejected the feature.
    fn open(&mut self, layer: &LayerInfo, geometry: &Geometry, attributes: &mut Attributes) -> bool;
}

/// User facing notifications and dialogs.
pub trait Interface {
    /// Non-blocking error notification.
    fn prompt_error(&mut self, title: &str, message: &str);

    /// The attribute form, if the host has one. Without a form features are always accepted.
    fn attribute_form(&mut self) -> Option<&mut dyn AttributeForm> {
        None
    }
}
