//! The in-progress vertex chain of one captured feature.
use crate::*;

/// Why a captured feature was discarded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cannot close a {} feature until it has at least {} vertices.", .kind.noun(), number_word(.required))]
    TooFewVertices {
        kind: GeometryKind,
        required: usize,
        found: usize,
    },
    #[error("The feature could not be added because removing the polygon intersections would change the geometry type")]
    TypeMismatchAfterIntersectionRemoval,
}

impl ValidationError {
    /// Title of the notification shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::TooFewVertices { .. } => "Not enough vertices",
            ValidationError::TypeMismatchAfterIntersectionRemoval => "Error",
        }
    }
}

fn number_word(n: &usize) -> String {
    match n {
        2 => "two".to_string(),
        3 => "three".to_string(),
        n => n.to_string(),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// No vertex committed.
    Idle,
    /// At least one vertex committed, the pointer vertex is floating.
    Capturing,
}

/// Captures the vertices of a single polygon or line feature.
///
/// The session only holds data; the canvas and the target layer are passed into each call.
#[derive(Clone, Debug)]
pub struct VertexCaptureSession {
    shape: LayerShape,
    constraints: EdgeConstraints,
    /// Committed vertices, map coordinates.
    vertices: Vec<Point2>,
    /// Committed vertices, layer coordinates.
    capture_list: Vec<Point2>,
    floating: Option<Point2>,
}

impl VertexCaptureSession {
    pub fn new(shape: LayerShape, constraints: EdgeConstraints) -> Self {
        Self {
            shape,
            constraints,
            vertices: Vec::new(),
            capture_list: Vec::new(),
            floating: None,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.shape.kind
    }

    pub fn shape(&self) -> LayerShape {
        self.shape
    }

    pub fn state(&self) -> CaptureState {
        if self.vertices.is_empty() {
            CaptureState::Idle
        } else {
            CaptureState::Capturing
        }
    }

    pub fn len(&self) -> usize {
        self.capture_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Committed vertices in map coordinates.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Committed vertices in the target layer's coordinates.
    pub fn capture_list(&self) -> &[Point2] {
        &self.capture_list
    }

    /// The uncommitted pointer vertex of the last preview.
    pub fn floating(&self) -> Option<Point2> {
        self.floating
    }

    pub fn constraints(&self) -> &EdgeConstraints {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut EdgeConstraints {
        &mut self.constraints
    }

    pub fn into_constraints(self) -> EdgeConstraints {
        self.constraints
    }

    /// Where the first vertex would go: the snapped pointer, or the raw pointer.
    pub fn snap_candidate<S: Snapper + ?Sized>(&self, snapper: &S, pointer: Point2) -> Point2 {
        snap_to_background_layers(snapper, pointer)
    }

    /// Resolve where a vertex at `pointer` would be placed, without committing it.
    ///
    /// Returns `None` when no vertex is committed yet. Otherwise the floating vertex is
    /// moved to the resolved point and the unlocked constraint values mirror the new edge.
    pub fn preview_vertex<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        pointer: Point2,
    ) -> Option<Point2> {
        let resolution = self.resolve(&*canvas, pointer)?;
        self.constraints.mirror(&resolution);
        self.floating = Some(resolution.point);
        canvas.redraw(&self.vertices, self.floating);
        Some(resolution.point)
    }

    /// Commit a vertex at `pointer`, returning its map position.
    ///
    /// The first vertex is only snapped; following vertices are resolved exactly as
    /// [`Self::preview_vertex`] resolves them.
    pub fn commit_vertex<C, T>(&mut self, canvas: &mut C, crs: &T, pointer: Point2) -> Point2
    where
        C: Canvas + ?Sized,
        T: CrsTransform + ?Sized,
    {
        let point = match self.resolve(&*canvas, pointer) {
            Some(resolution) => {
                self.constraints.mirror(&resolution);
                resolution.point
            }
            None => snap_to_background_layers(&*canvas, pointer),
        };

        self.vertices.push(point);
        self.capture_list.push(crs.to_layer_coordinates(point));
        self.floating = None;
        canvas.redraw(&self.vertices, None);

        log::debug!(
            "committed vertex {} of {:?} at {:?}",
            self.vertices.len(),
            self.shape.kind,
            point
        );

        point
    }

    /// Commit the terminal vertex and build the finished geometry.
    ///
    /// A terminal vertex landing on the last committed vertex is not added twice, though its
    /// resolution is still mirrored into the constraints. The session is cleared whatever the
    /// outcome.
    pub fn finish<C, L>(
        &mut self,
        canvas: &mut C,
        layer: &L,
        pointer: Point2,
    ) -> Result<Geometry, ValidationError>
    where
        C: Canvas + ?Sized,
        L: CrsTransform + IntersectionPolicy + ?Sized,
    {
        let last = self.vertices.last().copied();
        match (self.resolve(&*canvas, pointer), last) {
            (Some(resolution), Some(last)) if coincident(last, resolution.point) => {
                self.constraints.mirror(&resolution);
                log::trace!("terminal vertex {:?} repeats the last vertex", last);
            }
            _ => {
                self.commit_vertex(canvas, layer, pointer);
            }
        }

        let result = self.build(layer);
        self.cancel(canvas);

        match &result {
            Ok(geometry) => log::debug!(
                "finished {:?} with {} vertices",
                geometry.kind(),
                geometry.vertex_count()
            ),
            Err(e) => log::warn!("capture discarded: {}", e),
        }

        result
    }

    /// Discard all committed vertices and clear the preview.
    pub fn cancel<R: RubberBand + ?Sized>(&mut self, canvas: &mut R) {
        self.vertices.clear();
        self.capture_list.clear();
        self.floating = None;
        canvas.clear();
    }

    fn build<L>(&self, layer: &L) -> Result<Geometry, ValidationError>
    where
        L: IntersectionPolicy + ?Sized,
    {
        let kind = self.shape.kind;
        let too_few = || ValidationError::TooFewVertices {
            kind,
            required: kind.min_vertices(),
            found: self.capture_list.len(),
        };

        let geometry =
            Geometry::from_vertices(self.shape, &self.capture_list).map_err(|_| too_few())?;

        if kind != GeometryKind::Polygon || !layer.avoids_intersections() {
            return Ok(geometry);
        }

        let geometry = layer.remove_intersections(geometry);
        if self.shape.accepts(&geometry) {
            Ok(geometry)
        } else {
            Err(ValidationError::TypeMismatchAfterIntersectionRemoval)
        }
    }

    /// `None` while there is no anchor to resolve against.
    fn resolve<S: Snapper + ?Sized>(&self, snapper: &S, pointer: Point2) -> Option<Resolution> {
        let (anchor, rest) = self.vertices.split_last()?;
        let pre_anchor = rest.last().copied();
        let snapped = snap_to_background_layers(snapper, pointer);
        Some(resolve_vertex(
            snapped,
            *anchor,
            pre_anchor,
            &self.constraints,
        ))
    }
}
