//! # Globe Engine
//!
//! Ordered geographic renderables for a globe scene renderer.
//!
//! The crate implements the per-object contract a renderable must follow to
//! cooperate with a back-to-front compositor and a color-coded picking
//! subsystem:
//!
//! - **Frame-coherent caching**: placement, eye distance, and bounding
//!   extent are computed once per frame and shared by the pick and render
//!   passes.
//! - **Culling**: bounding-sphere tests against the active frustum set and
//!   a minimum projected screen size.
//! - **Deferred drawing**: visible objects are queued, globally sorted by
//!   descending eye distance, and only then drawn.
//! - **Draw/pick parity**: a single draw path serves both passes; only the
//!   color-setting step differs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use globe_engine::prelude::*;
//!
//! # struct MyGlobe;
//! # impl Globe for MyGlobe {
//! #     fn point_from_position(&self, p: &Position) -> Point3 { Point3::origin() }
//! #     fn point_at_elevation(&self, _: f64, _: f64, _: f64) -> Point3 { Point3::origin() }
//! #     fn surface_orientation_at(&self, _: &Position) -> Mat4 { Mat4::identity() }
//! # }
//! # fn device() -> TraceDevice { TraceDevice::new() }
//! let position = Position::from_degrees(40.0, 116.0, 3000.0)?;
//! let mut cube = GeoSolid::cube(position, 1000.0, PickId(1))?;
//!
//! let globe = MyGlobe;
//! let mut device = device();
//! let mut picks = PickSupport::new();
//! let view = View::new(Point3::new(0.0, 0.0, 1.0e7), Mat4::identity(), Frustum::infinite(), 1080, 45f64.to_radians());
//!
//! // One frame, render pass.
//! let mut ctx = DrawContext::new(1, PassMode::Normal, view, &globe, &mut device, &mut picks);
//! cube.render(&mut ctx);
//! ctx.draw_ordered();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod geo;
pub mod pick;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, SceneConfig},
        foundation::math::{Mat4, Point3, Vec3},
        geo::{Globe, Position, PositionError},
        pick::{PickColor, PickId, PickSupport},
        render::{AttribFlags, GraphicsState, RenderDevice, RenderError, StateScope, TraceDevice, TraceOp},
        scene::{
            DrawContext, Frustum, GeoSolid, OrderedQueue, OrderedRenderable, PassMode, Plane,
            RenderableLayer, ShapeError, ShapeTable, Sphere, View,
        },
    };
}
