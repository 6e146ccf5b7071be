//! Recording collaborators for unit tests.
use crate::*;

/// Snaps to the nearest target within tolerance and records what was drawn.
#[derive(Default, Debug)]
pub struct MockCanvas {
    pub targets: Vec<Point2>,
    pub tolerance: f64,
    pub committed: Vec<Point2>,
    pub floating: Option<Point2>,
    pub redraws: usize,
    pub cleared: usize,
}

impl MockCanvas {
    pub fn snapping_to(targets: Vec<Point2>, tolerance: f64) -> Self {
        Self {
            targets,
            tolerance,
            ..Default::default()
        }
    }
}

impl Snapper for MockCanvas {
    fn snap(&self, point: Point2) -> Option<Point2> {
        self.targets
            .iter()
            .map(|t| (t.sub(point).mag(), *t))
            .filter(|(d, _)| *d <= self.tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, t)| t)
    }
}

impl RubberBand for MockCanvas {
    fn redraw(&mut self, committed: &[Point2], floating: Option<Point2>) {
        self.committed = committed.to_vec();
        self.floating = floating;
        self.redraws += 1;
    }

    fn clear(&mut self) {
        self.committed.clear();
        self.floating = None;
        self.cleared += 1;
    }
}

/// Layer coordinates are map coordinates shifted by a constant.
pub struct Offset(pub Point2);

impl CrsTransform for Offset {
    fn to_layer_coordinates(&self, point: Point2) -> Point2 {
        point.add(self.0)
    }
    fn to_map_coordinates(&self, point: Point2) -> Point2 {
        point.sub(self.0)
    }
}

#[derive(Debug)]
pub struct MockLayer {
    pub info: LayerInfo,
    /// Intersection removal splits every polygon in two.
    pub splits: bool,
    pub accept_inserts: bool,
    pub inserted: Vec<(Geometry, Attributes)>,
    pub topological: usize,
}

impl MockLayer {
    pub fn new(geometry_type: LayerGeometryType, multipart: bool) -> Self {
        Self {
            info: LayerInfo {
                id: format!("{:?}", geometry_type).to_lowercase(),
                is_vector: true,
                editable: true,
                geometry_type,
                multipart,
            },
            splits: false,
            accept_inserts: true,
            inserted: Vec::new(),
            topological: 0,
        }
    }

    pub fn polygon() -> Self {
        Self::new(LayerGeometryType::Polygon, false)
    }

    pub fn line() -> Self {
        Self::new(LayerGeometryType::Line, false)
    }

    pub fn splitting(mut self) -> Self {
        self.splits = true;
        self
    }
}

impl CrsTransform for MockLayer {
    fn to_layer_coordinates(&self, point: Point2) -> Point2 {
        point
    }
    fn to_map_coordinates(&self, point: Point2) -> Point2 {
        point
    }
}

impl IntersectionPolicy for MockLayer {
    fn avoids_intersections(&self) -> bool {
        self.splits
    }

    fn remove_intersections(&self, geometry: Geometry) -> Geometry {
        match geometry {
            Geometry::Polygon(p) => Geometry::MultiPolygon(vec![p.clone(), p]),
            Geometry::MultiPolygon(mut x) => {
                let extra = x.clone();
                x.extend(extra);
                Geometry::MultiPolygon(x)
            }
            g => g,
        }
    }
}

impl FeatureSink for MockLayer {
    fn default_attributes(&self) -> Attributes {
        let mut a = Attributes::default();
        a.insert("name".to_string(), String::new());
        a
    }

    fn add_topological_points(&mut self, _: &Geometry) {
        self.topological += 1;
    }

    fn insert_feature(&mut self, geometry: Geometry, attributes: Attributes) -> bool {
        if self.accept_inserts {
            self.inserted.push((geometry, attributes));
        }
        self.accept_inserts
    }
}

impl TargetLayer for MockLayer {
    fn info(&self) -> LayerInfo {
        self.info.clone()
    }
}

/// Records notifications; optionally carries an attribute form.
#[derive(Default)]
pub struct MockInterface {
    pub errors: Vec<(String, String)>,
    pub form: Option<MockForm>,
}

impl Interface for MockInterface {
    fn prompt_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }

    fn attribute_form(&mut self) -> Option<&mut dyn AttributeForm> {
        self.form.as_mut().map(|f| f as &mut dyn AttributeForm)
    }
}

pub struct MockForm {
    pub accept: bool,
    pub opened: usize,
}

impl AttributeForm for MockForm {
    fn open(&mut self, _: &LayerInfo, _: &Geometry, attributes: &mut Attributes) -> bool {
        self.opened += 1;
        attributes.insert("name".to_string(), "digitized".to_string());
        self.accept
    }
}
