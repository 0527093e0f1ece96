//! Rendering abstraction layer
//!
//! The core never talks to a concrete graphics API. Drawing goes through the
//! [`RenderDevice`] trait, which models the small immediate-mode surface an
//! ordered renderable needs: current color, blend/lighting/normalize enables,
//! the modelview transform, attribute save/restore, and quad emission.
//!
//! [`StateScope`] enforces the save/restore discipline: state pushed for a
//! draw is popped on every exit path, including early returns and failures
//! partway through geometry emission.

mod device;
mod state_scope;
mod trace;

pub use device::{AttribFlags, RenderDevice, RenderError};
pub use state_scope::StateScope;
pub use trace::{GraphicsState, TraceDevice, TraceOp};
