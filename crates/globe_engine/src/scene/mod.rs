//! Scene system: the ordered-renderable lifecycle
//!
//! One frame of this scene is a cooperative, single-threaded protocol:
//!
//! ```text
//! scene driver
//!      ↓  visit (once per pass; pick pass, then render pass)
//! GeoSolid ──── cache-or-compute ──→ OrderedSolid (one per frame)
//!      ↓  frustum + screen-size culling
//! OrderedQueue
//!      ↓  sort by descending eye distance, invoke callbacks
//! OrderedSolid::draw ──→ RenderDevice (state scoped, pick or visual color)
//! ```
//!
//! The types here cover the renderable and its record ([`GeoSolid`],
//! [`OrderedSolid`]), the queue ([`OrderedQueue`]), culling volumes
//! ([`Frustum`], [`Sphere`]), the camera snapshot ([`View`]), shape tables
//! ([`ShapeTable`]), the per-pass context ([`DrawContext`]), and a flat
//! renderable collection ([`RenderableLayer`]).

mod context;
mod frustum;
mod layer;
mod ordered;
mod shape;
mod solid;
mod view;

pub use context::{DrawContext, PassMode};
pub use frustum::{Frustum, Plane, Sphere};
pub use layer::RenderableLayer;
pub use ordered::{OrderedQueue, OrderedRenderable};
pub use shape::{Face, ShapeError, ShapeTable};
pub use solid::{GeoSolid, OrderedSolid};
pub use view::View;
