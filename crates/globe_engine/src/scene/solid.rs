//! Geographically anchored solid renderables
//!
//! [`GeoSolid`] owns an object's identity (position, size, pick id, shape
//! table) and the per-frame cache of its queued draw record. The scene
//! driver visits it once per pass; both passes of a frame reuse one
//! [`OrderedSolid`] record, so pick geometry and visual geometry are
//! pixel-identical.

use crate::foundation::math::{Mat4, Point3};
use crate::geo::Position;
use crate::pick::PickId;
use crate::render::{AttribFlags, RenderError, StateScope};
use crate::scene::context::{DrawContext, PassMode};
use crate::scene::frustum::Sphere;
use crate::scene::ordered::OrderedRenderable;
use crate::scene::shape::{ShapeError, ShapeTable};
use std::rc::Rc;

/// Immutable identity of a solid, shared with its queued records
#[derive(Debug)]
struct SolidCore {
    position: Position,
    size: f64,
    pick_id: PickId,
    shape: ShapeTable,
}

/// A solid shape anchored at a geographic position
///
/// Holds the explicit `(frame stamp, record)` cache: the expensive steps of
/// a visit (geodesic conversion, eye distance, bounding extent) run once per
/// frame no matter how many passes visit the object. On a continuous 2D
/// globe the cache is bypassed and every visit recomputes.
pub struct GeoSolid {
    core: Rc<SolidCore>,
    frame_stamp: Option<u64>,
    cached: Option<Rc<OrderedSolid>>,
}

impl GeoSolid {
    /// Create a solid from a position, size in meters, pick identity, and
    /// shape table
    ///
    /// # Errors
    /// Returns [`ShapeError::InvalidSize`] unless `size` is positive and
    /// finite.
    pub fn new(
        position: Position,
        size: f64,
        pick_id: PickId,
        shape: ShapeTable,
    ) -> Result<Self, ShapeError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ShapeError::InvalidSize(size));
        }
        Ok(Self {
            core: Rc::new(SolidCore {
                position,
                size,
                pick_id,
                shape,
            }),
            frame_stamp: None,
            cached: None,
        })
    }

    /// Create a cube with the given edge length in meters
    ///
    /// # Errors
    /// Returns [`ShapeError::InvalidSize`] unless `size` is positive and
    /// finite.
    pub fn cube(position: Position, size: f64, pick_id: PickId) -> Result<Self, ShapeError> {
        Self::new(position, size, pick_id, ShapeTable::unit_cube())
    }

    /// Geographic anchor
    pub fn position(&self) -> &Position {
        &self.core.position
    }

    /// Extent in world meters
    pub fn size(&self) -> f64 {
        self.core.size
    }

    /// Pick identity
    pub fn pick_id(&self) -> PickId {
        self.core.pick_id
    }

    /// Visit entry point, called once per pass
    ///
    /// Obtains or reuses the frame's record, culls it against the active
    /// frustum set and the minimum screen size, and defers the surviving
    /// record to the ordered queue. Never draws immediately: correct
    /// translucency depends on the queue's global back-to-front order, not
    /// per-object order.
    pub fn render(&mut self, ctx: &mut DrawContext<'_>) {
        let record = self.ordered_record(ctx);

        if let Some(extent) = record.extent() {
            if !ctx.extent_visible(&extent) {
                log::trace!("solid {:?} culled by frustum", self.core.pick_id);
                return;
            }
            if ctx.is_small(&extent) {
                log::trace!("solid {:?} culled by screen size", self.core.pick_id);
                return;
            }
        }

        ctx.enqueue(record);
    }

    /// Obtain the frame's queued draw record, computing it if needed
    ///
    /// The cached record is reused iff it was computed for this context's
    /// frame stamp and the globe is not continuous 2D. Otherwise the record
    /// is recomputed: the anchor's Cartesian place point (flat globes ignore
    /// altitude), the eye distance to it, and a bounding sphere with radius
    /// `sqrt(3) / 2 * size`, the smallest sphere enclosing a cube of that
    /// edge. Eye distance and extent always derive from the same place
    /// point.
    pub fn ordered_record(&mut self, ctx: &DrawContext<'_>) -> Rc<OrderedSolid> {
        let reusable = self.frame_stamp == Some(ctx.frame_stamp()) && !ctx.is_continuous_globe();
        if let (true, Some(record)) = (reusable, &self.cached) {
            return Rc::clone(record);
        }

        log::trace!(
            "solid {:?}: computing record for frame {}",
            self.core.pick_id,
            ctx.frame_stamp()
        );

        let position = &self.core.position;
        let place_point = if ctx.is_flat_globe() {
            ctx.globe()
                .point_at_elevation(position.latitude(), position.longitude(), 0.0)
        } else {
            ctx.globe().point_from_position(position)
        };

        let eye_distance = nalgebra::distance(ctx.eye_point(), &place_point);
        let radius = 3.0_f64.sqrt() * self.core.size / 2.0;
        let extent = Some(Sphere::new(place_point, radius));

        let record = Rc::new(OrderedSolid {
            core: Rc::clone(&self.core),
            place_point,
            eye_distance,
            extent,
        });
        self.frame_stamp = Some(ctx.frame_stamp());
        self.cached = Some(Rc::clone(&record));
        record
    }
}

/// The queued draw record of a [`GeoSolid`] for one frame
///
/// Created by its owning solid, consumed by the ordered queue within the
/// same frame, never persisted beyond it.
pub struct OrderedSolid {
    core: Rc<SolidCore>,
    place_point: Point3,
    eye_distance: f64,
    extent: Option<Sphere>,
}

impl OrderedSolid {
    /// Cartesian placement of the solid's anchor
    pub fn place_point(&self) -> &Point3 {
        &self.place_point
    }

    /// Bounding extent, if one was computed
    ///
    /// `None` means culling is skipped and the record is always considered
    /// visible.
    pub fn extent(&self) -> Option<Sphere> {
        self.extent
    }
}

impl OrderedRenderable for OrderedSolid {
    fn eye_distance(&self) -> f64 {
        self.eye_distance
    }

    /// Draw the solid, shared by pick and render passes
    ///
    /// The state touched here (color, blend, lighting, transform) is pushed
    /// through a [`StateScope`], so it is restored on every exit path: the
    /// early return when pick colors run out, a failure during emission, and
    /// normal completion.
    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let mask = AttribFlags::CURRENT
            | AttribFlags::COLOR_BUFFER
            | AttribFlags::LIGHTING
            | AttribFlags::TRANSFORM;
        let mut scope = StateScope::new(&mut *ctx.device, mask);

        if ctx.pass == PassMode::Picking {
            let Some(color) = ctx.pick_support.allocate_unique_color() else {
                log::warn!(
                    "pick color space exhausted; skipping {:?} this pass",
                    self.core.pick_id
                );
                return Ok(());
            };
            ctx.pick_support
                .register(color, self.core.pick_id, self.core.position);
            scope.device().set_color(color.to_rgba());
        } else {
            let device = scope.device();
            device.set_lighting(true);
            device.set_blend(true);
            // A scale transform follows; lighting needs unit normals.
            device.set_normalize(true);
        }

        // Local frame at the anchor: X east, Y north, Z along the surface
        // normal, composed with the camera and a uniform scale so the unit
        // shape appears at world size.
        let orientation = ctx.globe.surface_orientation_at(&self.core.position);
        let modelview = ctx.view.modelview * orientation * Mat4::new_scaling(self.core.size);
        scope.device().set_modelview(modelview);

        self.core.shape.emit(scope.device())?;

        if ctx.pass == PassMode::Normal {
            scope.device().set_lighting(false);
        }
        Ok(())
    }
}
