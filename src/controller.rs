//! Drives capture sessions from host events.
use crate::*;

/// State of the host's capture button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Affordance {
    kind: Option<GeometryKind>,
}

impl Affordance {
    pub fn enabled(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<GeometryKind> {
        self.kind
    }

    /// Tooltip for the capture button.
    pub fn label(&self) -> &'static str {
        match self.kind {
            Some(GeometryKind::Line) => "Capture Line with preset Edge Lengths",
            _ => "Capture Polygon with preset Edge Lengths",
        }
    }
}

/// What a click did.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// No session is active.
    Inactive,
    /// A vertex was committed at the map position.
    Committed(Point2),
    /// The finished feature was stored.
    Inserted,
    /// The finished feature was rejected by the attribute form or the layer.
    Discarded,
    /// The capture was invalid and has been cleared.
    Rejected(ValidationError),
}

/// Owns the target layer, canvas and user interface, and at most one live session.
pub struct CaptureController<L, C, I> {
    layer: Option<L>,
    canvas: C,
    interface: I,
    constraints: EdgeConstraints,
    affordance: Affordance,
    session: Option<VertexCaptureSession>,
}

impl<L, C, I> CaptureController<L, C, I>
where
    L: TargetLayer,
    C: Canvas,
    I: Interface,
{
    pub fn new(canvas: C, interface: I) -> Self {
        Self::with_constraints(canvas, interface, EdgeConstraints::default())
    }

    pub fn with_constraints(canvas: C, interface: I, constraints: EdgeConstraints) -> Self {
        Self {
            layer: None,
            canvas,
            interface,
            constraints,
            affordance: Affordance::default(),
            session: None,
        }
    }

    pub fn layer(&self) -> Option<&L> {
        self.layer.as_ref()
    }

    pub fn layer_mut(&mut self) -> Option<&mut L> {
        self.layer.as_mut()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn interface(&self) -> &I {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance
    }

    pub fn session(&self) -> Option<&VertexCaptureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The constraint state the toolbar mirrors; the live session's if there is one.
    pub fn constraints(&self) -> &EdgeConstraints {
        match &self.session {
            Some(s) => s.constraints(),
            None => &self.constraints,
        }
    }

    pub fn constraints_mut(&mut self) -> &mut EdgeConstraints {
        match &mut self.session {
            Some(s) => s.constraints_mut(),
            None => &mut self.constraints,
        }
    }

    /// The current layer changed. Any live session is torn down.
    pub fn on_layer_changed(&mut self, layer: Option<L>) -> Affordance {
        self.on_deactivate();
        self.layer = layer;
        self.evaluate()
    }

    /// The current layer's editing state toggled.
    ///
    /// A live session survives only while the layer stays eligible for the same shape.
    pub fn on_editing_toggled(&mut self) -> Affordance {
        let shape = self
            .layer
            .as_ref()
            .and_then(|l| l.info().capture_shape());
        let keep = match (&self.session, shape) {
            (Some(s), Some(shape)) => s.shape() == shape,
            _ => false,
        };
        if !keep {
            self.on_deactivate();
        }
        self.evaluate()
    }

    /// Start a session for the current layer.
    ///
    /// Returns `false` if there is no eligible layer. Activating an active tool is a no-op.
    pub fn on_activate(&mut self) -> bool {
        if self.session.is_some() {
            return true;
        }
        let Some(shape) = self.layer.as_ref().and_then(|l| l.info().capture_shape()) else {
            log::debug!("capture not available for the current layer");
            return false;
        };
        log::debug!("starting {:?} capture", shape);
        self.session = Some(VertexCaptureSession::new(shape, self.constraints));
        true
    }

    /// Move the floating vertex with the pointer.
    pub fn on_pointer_move(&mut self, pos: Point2) -> Option<Point2> {
        let session = self.session.as_mut()?;
        session.preview_vertex(&mut self.canvas, pos)
    }

    /// Commit a vertex, or finish the feature on the finish gesture.
    pub fn on_click(&mut self, pos: Point2, is_finish_gesture: bool) -> ClickOutcome {
        let (Some(session), Some(layer)) = (self.session.as_mut(), self.layer.as_mut()) else {
            return ClickOutcome::Inactive;
        };

        if !is_finish_gesture {
            return ClickOutcome::Committed(session.commit_vertex(&mut self.canvas, &*layer, pos));
        }

        let geometry = match session.finish(&mut self.canvas, &*layer, pos) {
            Ok(g) => g,
            Err(e) => {
                self.interface.prompt_error(e.title(), &e.to_string());
                return ClickOutcome::Rejected(e);
            }
        };

        let info = layer.info();
        let mut attributes = layer.default_attributes();
        let accepted = match self.interface.attribute_form() {
            Some(form) => form.open(&info, &geometry, &mut attributes),
            None => true,
        };
        if !accepted {
            log::debug!("feature rejected in the attribute form");
            return ClickOutcome::Discarded;
        }

        layer.add_topological_points(&geometry);
        if layer.insert_feature(geometry, attributes) {
            log::debug!("feature added to layer {}", info.id);
            ClickOutcome::Inserted
        } else {
            ClickOutcome::Discarded
        }
    }

    /// Cancel and tear down the live session, keeping its constraint values.
    pub fn on_deactivate(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel(&mut self.canvas);
            self.constraints = session.into_constraints();
        }
    }

    fn evaluate(&mut self) -> Affordance {
        let kind = self
            .layer
            .as_ref()
            .and_then(|l| l.info().capture_shape())
            .map(|s| s.kind);
        self.affordance = Affordance { kind };
        self.affordance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::*;

    type Controller = CaptureController<MockLayer, MockCanvas, MockInterface>;

    fn controller(layer: MockLayer) -> Controller {
        let mut c = Controller::new(MockCanvas::default(), MockInterface::default());
        c.on_layer_changed(Some(layer));
        c
    }

    #[test]
    fn affordance_follows_layer() {
        let mut c = Controller::new(MockCanvas::default(), MockInterface::default());
        assert!(!c.affordance().enabled());

        let a = c.on_layer_changed(Some(MockLayer::line()));
        assert!(a.enabled());
        assert_eq!(a.label(), "Capture Line with preset Edge Lengths");

        let a = c.on_layer_changed(Some(MockLayer::polygon()));
        assert_eq!(a.kind(), Some(GeometryKind::Polygon));
        assert_eq!(a.label(), "Capture Polygon with preset Edge Lengths");

        let a = c.on_layer_changed(Some(MockLayer::new(LayerGeometryType::Point, false)));
        assert!(!a.enabled());

        let a = c.on_layer_changed(None);
        assert!(!a.enabled());
        assert!(!c.on_activate());
    }

    #[test]
    fn activation_is_single_session() {
        let mut c = controller(MockLayer::line());
        assert!(c.on_activate());
        c.on_click([0.0, 0.0], false);
        assert!(c.on_activate());
        assert_eq!(c.session().map(|s| s.len()), Some(1));
    }

    #[test]
    fn clicks_without_session_are_ignored() {
        let mut c = controller(MockLayer::line());
        assert_eq!(c.on_click([0.0, 0.0], false), ClickOutcome::Inactive);
        assert_eq!(c.on_pointer_move([1.0, 0.0]), None);
    }

    #[test]
    fn line_capture_inserts_feature() {
        let mut c = controller(MockLayer::line());
        c.on_activate();
        assert_eq!(c.on_click([0.0, 0.0], false), ClickOutcome::Committed([0.0, 0.0]));
        assert_eq!(c.on_pointer_move([5.0, 0.0]), Some([5.0, 0.0]));
        assert_eq!(c.on_click([10.0, 0.0], false), ClickOutcome::Committed([10.0, 0.0]));
        assert_eq!(c.on_click([10.0, 0.0], true), ClickOutcome::Inserted);

        let layer = c.layer().unwrap();
        assert_eq!(layer.inserted.len(), 1);
        assert_eq!(layer.topological, 1);
        let (g, attributes) = &layer.inserted[0];
        assert_eq!(
            g,
            &Geometry::LineString(Polyline2::new([[0.0, 0.0], [10.0, 0.0]]).unwrap())
        );
        assert_eq!(attributes.get("name").map(String::as_str), Some(""));

        // the tool stays active for the next feature
        assert!(c.is_active());
        assert_eq!(c.session().map(|s| s.len()), Some(0));
    }

    #[test]
    fn invalid_finish_notifies_and_stays_active() {
        let mut c = controller(MockLayer::polygon());
        c.on_activate();
        c.on_click([0.0, 0.0], false);
        c.on_click([1.0, 0.0], false);
        let outcome = c.on_click([1.0, 0.0], true);
        assert!(matches!(
            outcome,
            ClickOutcome::Rejected(ValidationError::TooFewVertices { found: 2, .. })
        ));

        assert!(c.layer().unwrap().inserted.is_empty());
        assert_eq!(c.interface().errors.len(), 1);
        assert_eq!(c.interface().errors[0].0, "Not enough vertices");
        assert!(c.is_active());
        assert_eq!(c.session().map(|s| s.len()), Some(0));
        assert!(c.canvas().committed.is_empty());
    }

    #[test]
    fn attribute_form_can_reject() {
        let mut c = controller(MockLayer::line());
        c.interface_mut().form = Some(MockForm {
            accept: false,
            opened: 0,
        });
        c.on_activate();
        c.on_click([0.0, 0.0], false);
        assert_eq!(c.on_click([3.0, 3.0], true), ClickOutcome::Discarded);
        assert_eq!(c.interface().form.as_ref().map(|f| f.opened), Some(1));
        assert!(c.layer().unwrap().inserted.is_empty());
        assert_eq!(c.layer().unwrap().topological, 0);
        // cleared regardless
        assert_eq!(c.session().map(|s| s.len()), Some(0));
        assert!(c.canvas().committed.is_empty());
    }

    #[test]
    fn attribute_form_edits_attributes() {
        let mut c = controller(MockLayer::line());
        c.interface_mut().form = Some(MockForm {
            accept: true,
            opened: 0,
        });
        c.on_activate();
        c.on_click([0.0, 0.0], false);
        assert_eq!(c.on_click([3.0, 3.0], true), ClickOutcome::Inserted);
        let (_, attributes) = &c.layer().unwrap().inserted[0];
        assert_eq!(attributes.get("name").map(String::as_str), Some("digitized"));
    }

    #[test]
    fn layer_refusing_insert_is_discarded() {
        let mut layer = MockLayer::line();
        layer.accept_inserts = false;
        let mut c = controller(layer);
        c.on_activate();
        c.on_click([0.0, 0.0], false);
        assert_eq!(c.on_click([3.0, 3.0], true), ClickOutcome::Discarded);
    }

    #[test]
    fn deactivate_cancels_and_keeps_constraints() {
        let mut c = controller(MockLayer::polygon());
        c.on_activate();
        c.constraints_mut().distance_locked = true;
        c.constraints_mut().preset_distance = 4.0;
        c.on_click([0.0, 0.0], false);
        c.on_click([9.0, 0.0], false);
        assert_eq!(c.session().map(|s| s.vertices()[1]), Some([4.0, 0.0]));

        c.on_deactivate();
        assert!(!c.is_active());
        assert!(c.canvas().committed.is_empty());
        assert!(c.canvas().cleared > 0);
        assert!(c.constraints().distance_locked);
        assert_eq!(c.constraints().preset_distance, 4.0);

        // the next session inherits them
        c.on_activate();
        assert!(c.session().unwrap().constraints().distance_locked);
    }

    #[test]
    fn editing_stopped_cancels_session() {
        let mut c = controller(MockLayer::polygon());
        c.on_activate();
        c.on_click([0.0, 0.0], false);

        // still eligible: nothing happens
        let a = c.on_editing_toggled();
        assert!(a.enabled());
        assert!(c.is_active());
        assert_eq!(c.session().map(|s| s.len()), Some(1));

        c.layer_mut().unwrap().info.editable = false;
        let a = c.on_editing_toggled();
        assert!(!a.enabled());
        assert!(!c.is_active());
        assert!(!c.on_activate());

        c.layer_mut().unwrap().info.editable = true;
        assert!(c.on_editing_toggled().enabled());
        assert!(c.on_activate());
    }

    #[test]
    fn layer_change_tears_down_session() {
        let mut c = controller(MockLayer::polygon());
        c.on_activate();
        c.on_click([0.0, 0.0], false);
        c.on_layer_changed(Some(MockLayer::line()));
        assert!(!c.is_active());
        assert!(c.canvas().committed.is_empty());
        assert!(c.on_activate());
        assert_eq!(c.session().map(|s| s.kind()), Some(GeometryKind::Line));
    }
}
