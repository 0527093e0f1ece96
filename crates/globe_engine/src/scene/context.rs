//! The draw context: per-pass scene state handed to every renderable

use crate::config::SceneConfig;
use crate::foundation::math::Point3;
use crate::geo::Globe;
use crate::pick::PickSupport;
use crate::render::RenderDevice;
use crate::scene::frustum::{Frustum, Sphere};
use crate::scene::ordered::{OrderedQueue, OrderedRenderable};
use crate::scene::view::View;
use std::rc::Rc;

/// Which pass the scene is currently drawing
///
/// A frame typically runs two passes: a pick pass (objects draw in unique
/// identifying colors) followed by a render pass. The mode selects only the
/// color-setting branch of a draw; geometry is identical in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Visual rendering with lighting and blending
    Normal,
    /// Color-coded pick rendering
    Picking,
}

/// Per-pass scene context
///
/// Everything a renderable consumes from the scene driver: the frame
/// identifier, camera state, the active frustum set, globe-mode flags,
/// culling configuration, the collaborators (globe, device, pick support),
/// and the ordered queue deferred draws go into.
///
/// The frame stamp is supplied here, per pass, never read from ambient
/// global state; the contract stays testable without a live scene driver.
pub struct DrawContext<'a> {
    pub(crate) frame_stamp: u64,
    pub(crate) pass: PassMode,
    pub(crate) view: View,
    pub(crate) pick_frustums: Vec<Frustum>,
    pub(crate) flat_globe: bool,
    pub(crate) continuous_globe: bool,
    pub(crate) config: SceneConfig,
    pub(crate) globe: &'a dyn Globe,
    pub(crate) device: &'a mut dyn RenderDevice,
    pub(crate) pick_support: &'a mut PickSupport,
    ordered: OrderedQueue,
}

impl<'a> DrawContext<'a> {
    /// Create a context for one pass
    ///
    /// The pick frustum set defaults to the view frustum; drivers that pick
    /// through sub-frustums override it with
    /// [`with_pick_frustums`](Self::with_pick_frustums).
    pub fn new(
        frame_stamp: u64,
        pass: PassMode,
        view: View,
        globe: &'a dyn Globe,
        device: &'a mut dyn RenderDevice,
        pick_support: &'a mut PickSupport,
    ) -> Self {
        let pick_frustums = vec![view.frustum.clone()];
        Self {
            frame_stamp,
            pass,
            view,
            pick_frustums,
            flat_globe: false,
            continuous_globe: false,
            config: SceneConfig::default(),
            globe,
            device,
            pick_support,
            ordered: OrderedQueue::new(),
        }
    }

    /// Replace the pick frustum set (picking tests intersects-any)
    #[must_use]
    pub fn with_pick_frustums(mut self, frustums: Vec<Frustum>) -> Self {
        self.pick_frustums = frustums;
        self
    }

    /// Mark the globe as flat (2D): anchors project at zero elevation
    #[must_use]
    pub fn with_flat_globe(mut self, flat: bool) -> Self {
        self.flat_globe = flat;
        self
    }

    /// Mark the globe as continuous/wrapping 2D
    ///
    /// Such globes can place one logical object at several screen locations
    /// within a frame, so per-frame record caching is bypassed entirely.
    /// A continuous globe is a 2D projection, so this also sets the flat
    /// flag; anchors project at zero elevation.
    #[must_use]
    pub fn with_continuous_globe(mut self, continuous: bool) -> Self {
        self.continuous_globe = continuous;
        if continuous {
            self.flat_globe = true;
        }
        self
    }

    /// Replace the culling configuration
    #[must_use]
    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Frame identifier this context belongs to
    pub fn frame_stamp(&self) -> u64 {
        self.frame_stamp
    }

    /// The active pass mode
    pub fn pass(&self) -> PassMode {
        self.pass
    }

    /// Whether this is a pick pass
    pub fn is_picking(&self) -> bool {
        self.pass == PassMode::Picking
    }

    /// Whether the active globe is flat (2D)
    pub fn is_flat_globe(&self) -> bool {
        self.flat_globe
    }

    /// Whether the active globe is continuous/wrapping 2D
    pub fn is_continuous_globe(&self) -> bool {
        self.continuous_globe
    }

    /// Camera snapshot for this pass
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Eye point shortcut
    pub fn eye_point(&self) -> &Point3 {
        &self.view.eye_point
    }

    /// The globe collaborator
    pub fn globe(&self) -> &dyn Globe {
        self.globe
    }

    /// Culling configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Pick support, for registration and post-pass resolution
    pub fn pick_support(&mut self) -> &mut PickSupport {
        self.pick_support
    }

    /// The ordered queue of deferred draws for this pass
    pub fn ordered(&self) -> &OrderedQueue {
        &self.ordered
    }

    /// Test an extent against the active frustum set
    ///
    /// Normal mode tests the single view frustum; pick mode accepts an
    /// extent that intersects any of the pick frustums. With frustum culling
    /// disabled everything is visible.
    pub fn extent_visible(&self, extent: &Sphere) -> bool {
        if !self.config.enable_frustum_culling {
            return true;
        }
        if self.is_picking() {
            self.pick_frustums.iter().any(|f| f.intersects_sphere(extent))
        } else {
            self.view.frustum.intersects_sphere(extent)
        }
    }

    /// Whether an extent's screen footprint falls below the minimum size
    pub fn is_small(&self, extent: &Sphere) -> bool {
        self.view.extent_pixels(extent) < self.config.min_pixel_size
    }

    /// Defer a record for sorted drawing at the end of the pass
    pub fn enqueue(&mut self, renderable: Rc<dyn OrderedRenderable>) {
        self.ordered.enqueue(renderable);
    }

    /// Drain the queue back-to-front and invoke each record's draw
    ///
    /// A record whose draw fails is logged at `warn` and omitted; the frame
    /// simply goes on without it.
    pub fn draw_ordered(&mut self) {
        let entries = self.ordered.take_sorted();
        log::debug!(
            "drawing {} ordered renderable(s), pass {:?}, frame {}",
            entries.len(),
            self.pass,
            self.frame_stamp
        );
        for renderable in entries {
            if let Err(e) = renderable.draw(self) {
                log::warn!(
                    "ordered renderable at eye distance {:.1} failed to draw: {e}",
                    renderable.eye_distance()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Point3};
    use crate::geo::Position;
    use crate::render::{RenderError, TraceDevice};
    use std::cell::RefCell;

    struct FixedGlobe;

    impl Globe for FixedGlobe {
        fn point_from_position(&self, _position: &Position) -> Point3 {
            Point3::origin()
        }

        fn point_at_elevation(&self, _lat: f64, _lon: f64, _elev: f64) -> Point3 {
            Point3::origin()
        }

        fn surface_orientation_at(&self, _position: &Position) -> Mat4 {
            Mat4::identity()
        }
    }

    struct Scripted {
        distance: f64,
        fail: bool,
        invoked: Rc<RefCell<Vec<f64>>>,
    }

    impl OrderedRenderable for Scripted {
        fn eye_distance(&self) -> f64 {
            self.distance
        }

        fn draw(&self, _ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
            self.invoked.borrow_mut().push(self.distance);
            if self.fail {
                return Err(RenderError::Emit("scripted failure".into()));
            }
            Ok(())
        }
    }

    fn test_view() -> View {
        View::new(
            Point3::origin(),
            Mat4::identity(),
            Frustum::infinite(),
            1000,
            std::f64::consts::FRAC_PI_2,
        )
    }

    #[test]
    fn test_draw_ordered_invokes_back_to_front() {
        let globe = FixedGlobe;
        let mut device = TraceDevice::new();
        let mut picks = crate::pick::PickSupport::new();
        let mut ctx = DrawContext::new(
            1,
            PassMode::Normal,
            test_view(),
            &globe,
            &mut device,
            &mut picks,
        );

        let invoked = Rc::new(RefCell::new(Vec::new()));
        for distance in [10.0, 50.0, 25.0] {
            ctx.enqueue(Rc::new(Scripted {
                distance,
                fail: false,
                invoked: Rc::clone(&invoked),
            }));
        }
        ctx.draw_ordered();

        assert_eq!(*invoked.borrow(), vec![50.0, 25.0, 10.0]);
        assert!(ctx.ordered().is_empty());
    }

    #[test]
    fn test_failed_record_is_omitted_not_fatal() {
        let globe = FixedGlobe;
        let mut device = TraceDevice::new();
        let mut picks = crate::pick::PickSupport::new();
        let mut ctx = DrawContext::new(
            1,
            PassMode::Normal,
            test_view(),
            &globe,
            &mut device,
            &mut picks,
        );

        let invoked = Rc::new(RefCell::new(Vec::new()));
        ctx.enqueue(Rc::new(Scripted {
            distance: 30.0,
            fail: true,
            invoked: Rc::clone(&invoked),
        }));
        ctx.enqueue(Rc::new(Scripted {
            distance: 20.0,
            fail: false,
            invoked: Rc::clone(&invoked),
        }));

        // The failing record does not stop the rest of the queue.
        ctx.draw_ordered();
        assert_eq!(*invoked.borrow(), vec![30.0, 20.0]);
    }

    /// Renderable restricted to the public accessor surface, the way an
    /// implementor outside this crate sees the context.
    struct AccessorPicker;

    impl OrderedRenderable for AccessorPicker {
        fn eye_distance(&self) -> f64 {
            1.0
        }

        fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
            assert_eq!(ctx.pass(), PassMode::Picking);
            assert_eq!(ctx.view().viewport_height, 1000);
            assert!(ctx.config().enable_frustum_culling);

            let position = Position::from_degrees(0.0, 0.0, 0.0)
                .map_err(|e| RenderError::InvalidState(e.to_string()))?;
            let Some(color) = ctx.pick_support().allocate_unique_color() else {
                return Ok(());
            };
            ctx.pick_support()
                .register(color, crate::pick::PickId(7), position);
            Ok(())
        }
    }

    #[test]
    fn test_accessors_support_external_renderables() {
        let globe = FixedGlobe;
        let mut device = TraceDevice::new();
        let mut picks = crate::pick::PickSupport::new();
        let mut ctx = DrawContext::new(
            1,
            PassMode::Picking,
            test_view(),
            &globe,
            &mut device,
            &mut picks,
        );

        ctx.enqueue(Rc::new(AccessorPicker));
        ctx.draw_ordered();
        drop(ctx);

        let registered = picks.resolve(1).expect("color registered through accessor");
        assert_eq!(registered.id, crate::pick::PickId(7));
    }
}
