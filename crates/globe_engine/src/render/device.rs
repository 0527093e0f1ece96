//! Graphics device trait and shared state definitions

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Errors produced while submitting draw commands to a device
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Geometry emission failed partway through a draw
    #[error("geometry emission failed: {0}")]
    Emit(String),

    /// The device rejected a state change
    #[error("invalid device state: {0}")]
    InvalidState(String),
}

bitflags::bitflags! {
    /// Graphics-state groups a draw may modify
    ///
    /// A renderable pushes exactly the groups it will touch before drawing
    /// and the device restores them when the matching pop arrives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttribFlags: u32 {
        /// Current drawing color
        const CURRENT = 0b0001;
        /// Blend enable and blend function
        const COLOR_BUFFER = 0b0010;
        /// Lighting and normal renormalization enables
        const LIGHTING = 0b0100;
        /// Modelview transform
        const TRANSFORM = 0b1000;
    }
}

/// Immediate-mode graphics device
///
/// The shared mutable resource of the frame: every renderable mutates this
/// state while drawing, so each draw must bracket its changes with
/// [`push_attrib`](Self::push_attrib) / [`pop_attrib`](Self::pop_attrib)
/// (normally via [`StateScope`](crate::render::StateScope)) so the next
/// object in the queue observes untouched state.
pub trait RenderDevice {
    /// Save the state groups named by `mask` onto the device's stack
    fn push_attrib(&mut self, mask: AttribFlags);

    /// Restore the most recently pushed state groups
    fn pop_attrib(&mut self);

    /// Set the current drawing color (RGBA, components in [0, 1])
    fn set_color(&mut self, color: [f32; 4]);

    /// Enable or disable blending with the standard translucency function
    fn set_blend(&mut self, enabled: bool);

    /// Engage or disengage standard lighting
    fn set_lighting(&mut self, enabled: bool);

    /// Enable or disable normal-vector renormalization
    ///
    /// Required when a scale transform is active, otherwise lighting sees
    /// distorted normal lengths.
    fn set_normalize(&mut self, enabled: bool);

    /// Install the active modelview transform
    fn set_modelview(&mut self, modelview: Mat4);

    /// Emit one quad face with its face normal and an ordered vertex ring
    ///
    /// # Errors
    /// Returns [`RenderError`] if the device cannot accept the geometry.
    fn draw_quad(&mut self, normal: Vec3, vertices: [Point3; 4]) -> Result<(), RenderError>;
}
