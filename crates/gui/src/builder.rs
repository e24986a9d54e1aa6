//! The fitting builder: shapes, snapping, dragging and the carved body in one
//! place.
//!
//! Hosts (the egui app, the test harness) call the pointer methods with
//! ground-plane picks and drain the deferred queue once per frame.

use std::time::{Duration, Instant};

use glam::DVec3;
use shared::{BoxParams, CylinderParams, ShapeId, ShapeParams, SnapMode, SphereParams, TextParams};

use crate::build::{Body, BodyCompositor, ComposeError, FontGlyphs, GlyphOutliner};
use crate::helpers::DEFAULT_SNAP_THRESHOLD;
use crate::interaction::{CameraInput, DragController, DragError};
use crate::snap::{landmarks, SnapGuides};
use crate::state::catalog::{CatalogError, Shape, ShapeCatalog};
use crate::state::settings::FitSettings;
use crate::viewport::picking::pick_shape;

/// Tessellation used for shapes whose constructor takes none
const DEFAULT_TESSELLATION: u32 = crate::build::primitives::DEFAULT_TESSELLATION;

pub struct FitBuilder {
    catalog: ShapeCatalog,
    compositor: BodyCompositor,
    drag: DragController,
    camera: CameraInput,
    snap_mode: SnapMode,
    snap_threshold: f64,
    session_timeout: Duration,
    /// Stock dimensions of the last `draw_body` call
    stock: Option<[f64; 3]>,
    glyphs: Box<dyn GlyphOutliner>,
}

impl Default for FitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FitBuilder {
    pub fn new() -> Self {
        Self {
            catalog: ShapeCatalog::new(),
            compositor: BodyCompositor::new(),
            drag: DragController::new(),
            camera: CameraInput::default(),
            snap_mode: SnapMode::None,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            session_timeout: Duration::from_secs(10),
            stock: None,
            glyphs: Box::new(FontGlyphs::default()),
        }
    }

    /// Builder configured from the snap and drag settings
    pub fn from_settings(settings: &FitSettings) -> Self {
        let mut builder = Self::new();
        builder.snap_mode = settings.snap.mode;
        builder.snap_threshold = settings.snap.threshold;
        builder.session_timeout = settings.session_timeout();
        builder
    }

    /// Replace the glyph source for every text shape, placed ones included
    pub fn with_glyphs(mut self, glyphs: impl GlyphOutliner + 'static) -> Self {
        self.set_glyphs(Box::new(glyphs));
        self
    }

    /// Swap the glyph source, re-outline placed text and rebuild the body
    pub fn set_glyphs(&mut self, glyphs: Box<dyn GlyphOutliner>) {
        self.glyphs = glyphs;
        if self.catalog.refresh_text_outlines(self.glyphs.as_ref()) > 0 {
            self.rebuild_if_drawn();
        }
    }

    // ── Shapes ────────────────────────────────────────────────

    pub fn add_box_shape(&mut self, width: f64, height: f64, depth: f64) -> Result<ShapeId, CatalogError> {
        self.add_shape(
            ShapeParams::Box(BoxParams { width, height, depth }),
            DEFAULT_TESSELLATION,
        )
    }

    pub fn add_cylinder_shape(
        &mut self,
        height: f64,
        diameter_top: f64,
        diameter_bottom: f64,
        tessellation: u32,
        is_horizontal: bool,
    ) -> Result<ShapeId, CatalogError> {
        self.add_shape(
            ShapeParams::Cylinder(CylinderParams {
                height,
                diameter_top,
                diameter_bottom,
                is_horizontal,
            }),
            tessellation,
        )
    }

    pub fn add_sphere_shape(
        &mut self,
        diameter_x: f64,
        diameter_y: f64,
        diameter_z: f64,
        tessellation: u32,
    ) -> Result<ShapeId, CatalogError> {
        self.add_shape(
            ShapeParams::Sphere(SphereParams {
                diameter_x,
                diameter_y,
                diameter_z,
            }),
            tessellation,
        )
    }

    pub fn add_text_shape(&mut self, text: &str, size: f64, depth: f64) -> Result<ShapeId, CatalogError> {
        self.add_shape(
            ShapeParams::Text(TextParams {
                text: text.to_string(),
                size,
                depth,
            }),
            DEFAULT_TESSELLATION,
        )
    }

    /// Add any shape. Once a body has been drawn it is rebuilt immediately.
    pub fn add_shape(&mut self, params: ShapeParams, tessellation: u32) -> Result<ShapeId, CatalogError> {
        let id = self.catalog.add_shape(params, tessellation, self.glyphs.as_ref())?;
        self.rebuild_if_drawn();
        Ok(id)
    }

    // ── Body ──────────────────────────────────────────────────

    /// Set the stock size and carve every placed shape out of it
    ///
    /// The stock size is only kept when the rebuild succeeds, so a rejected
    /// size never poisons later rebuilds.
    pub fn draw_body(&mut self, width: f64, height: f64, depth: f64) -> Result<&Body, ComposeError> {
        let result = self.compositor.rebuild(
            width,
            height,
            depth,
            self.catalog.all_shapes(),
            self.glyphs.as_ref(),
        );
        if result.is_ok() {
            self.stock = Some([width, height, depth]);
        }
        result
    }

    /// Rebuild with the current stock; no-op before the first `draw_body`
    pub fn rebuild_body(&mut self) -> Option<Result<&Body, ComposeError>> {
        let [width, height, depth] = self.stock?;
        Some(self.compositor.rebuild(
            width,
            height,
            depth,
            self.catalog.all_shapes(),
            self.glyphs.as_ref(),
        ))
    }

    fn rebuild_if_drawn(&mut self) {
        // Failures are kept as last_error and logged by the compositor
        let _ = self.rebuild_body();
    }

    // ── Snap mode ─────────────────────────────────────────────

    pub fn set_snap_mode(&mut self, mode: SnapMode) {
        if mode != self.snap_mode {
            tracing::debug!("snap mode {:?} -> {:?}", self.snap_mode, mode);
        }
        self.snap_mode = mode;
        self.drag.retain_guides(mode);
    }

    pub fn snap_mode(&self) -> SnapMode {
        self.snap_mode
    }

    pub fn set_snap_to_vertex_enabled(&mut self, enabled: bool) {
        if enabled {
            self.set_snap_mode(SnapMode::Vertex);
        } else if self.snap_mode == SnapMode::Vertex {
            self.set_snap_mode(SnapMode::None);
        }
    }

    pub fn is_snap_to_vertex_enabled(&self) -> bool {
        self.snap_mode == SnapMode::Vertex
    }

    pub fn set_snap_to_line_enabled(&mut self, enabled: bool) {
        if enabled {
            self.set_snap_mode(SnapMode::Line);
        } else if self.snap_mode == SnapMode::Line {
            self.set_snap_mode(SnapMode::None);
        }
    }

    pub fn is_snap_to_line_enabled(&self) -> bool {
        self.snap_mode == SnapMode::Line
    }

    pub fn set_snap_threshold(&mut self, threshold: f64) {
        self.snap_threshold = threshold;
    }

    pub fn snap_threshold(&self) -> f64 {
        self.snap_threshold
    }

    pub fn set_session_timeout(&mut self, timeout: Duration) {
        self.session_timeout = timeout;
    }

    // ── Pointer plumbing ──────────────────────────────────────

    pub fn pick_down(&mut self, shape_id: &str, pointer_ground: Option<DVec3>, now: Instant) -> Result<(), DragError> {
        self.drag.pick_down(shape_id, pointer_ground, &self.catalog, now)
    }

    /// Start dragging the topmost shape under the pointer, if any
    pub fn pick_at(&mut self, pointer_ground: DVec3, now: Instant) -> Option<Result<ShapeId, DragError>> {
        let id = pick_shape(pointer_ground, self.catalog.all_shapes())?.id.clone();
        Some(self.pick_down(&id, Some(pointer_ground), now).map(|_| id))
    }

    pub fn pointer_move(&mut self, pointer_ground: Option<DVec3>, now: Instant) -> Option<DVec3> {
        self.drag.pointer_move(
            pointer_ground,
            &mut self.catalog,
            self.snap_mode,
            self.snap_threshold,
            now,
        )
    }

    /// End the drag and rebuild the body. Returns the moved shape.
    pub fn pick_up(&mut self) -> Option<ShapeId> {
        let id = self.drag.pick_up(&mut self.camera)?;
        self.rebuild_if_drawn();
        Some(id)
    }

    pub fn capture_lost(&mut self) -> Option<ShapeId> {
        let id = self.drag.capture_lost(&mut self.camera)?;
        self.rebuild_if_drawn();
        Some(id)
    }

    /// Per-frame check for a stale drag session
    pub fn tick(&mut self, now: Instant) -> Option<ShapeId> {
        let id = self.drag.expire_stale(now, self.session_timeout, &mut self.camera)?;
        tracing::warn!("drag of {} timed out", id);
        self.rebuild_if_drawn();
        Some(id)
    }

    /// Run deferred tasks; call at the start of each frame
    pub fn drain_deferred(&mut self) -> usize {
        self.drag.drain_deferred(&mut self.camera)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn shapes(&self) -> &[Shape] {
        self.catalog.all_shapes()
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.catalog.get(id)
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn body(&self) -> Option<&Body> {
        self.compositor.body()
    }

    pub fn stock(&self) -> Option<[f64; 3]> {
        self.stock
    }

    pub fn guides(&self) -> &SnapGuides {
        self.drag.guides()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.drag.highlighted()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn last_error(&self) -> Option<&ComposeError> {
        self.compositor.last_error()
    }

    pub fn camera_input(&self) -> CameraInput {
        self.camera
    }

    pub fn landmarks_of(&self, id: &str) -> Option<Vec<DVec3>> {
        self.catalog.get(id).map(landmarks)
    }
}
