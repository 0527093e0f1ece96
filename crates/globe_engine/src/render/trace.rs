//! Recording software device
//!
//! [`TraceDevice`] implements [`RenderDevice`] entirely in memory: it keeps
//! the full graphics state, honors the attribute save/restore stack, and
//! logs every command it receives. It backs the headless demo driver and the
//! test suite, which asserts on the recorded command stream.

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::render::device::{AttribFlags, RenderDevice, RenderError};

/// Snapshot of the mutable graphics state a renderable may touch
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current drawing color (RGBA)
    pub color: [f32; 4],
    /// Blend enable
    pub blend: bool,
    /// Standard lighting enable
    pub lighting: bool,
    /// Normal renormalization enable
    pub normalize: bool,
    /// Active modelview transform
    pub modelview: Mat4,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            blend: false,
            lighting: false,
            normalize: false,
            modelview: Mat4::identity(),
        }
    }
}

/// One recorded device command
#[derive(Debug, Clone, PartialEq)]
pub enum TraceOp {
    /// State groups saved
    PushAttrib(AttribFlags),
    /// State groups restored
    PopAttrib,
    /// Color change
    SetColor([f32; 4]),
    /// Blend enable change
    SetBlend(bool),
    /// Lighting enable change
    SetLighting(bool),
    /// Normalize enable change
    SetNormalize(bool),
    /// Modelview change
    SetModelview(Mat4),
    /// Quad emitted with its face normal and vertex ring
    Quad {
        /// Face normal
        normal: Vec3,
        /// Ordered vertex ring
        vertices: [Point3; 4],
    },
}

/// In-memory [`RenderDevice`] that records every command
#[derive(Debug, Default)]
pub struct TraceDevice {
    state: GraphicsState,
    stack: Vec<(AttribFlags, GraphicsState)>,
    ops: Vec<TraceOp>,
    quads_emitted: usize,
    /// When set, `draw_quad` fails once this many quads have been emitted.
    /// Lets callers script a mid-draw device failure.
    pub fail_after_quads: Option<usize>,
}

impl TraceDevice {
    /// Create a device with default state and an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Current graphics state
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Recorded command log, in submission order
    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    /// Geometry portion of the log: emitted quads only
    pub fn quads(&self) -> Vec<&TraceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, TraceOp::Quad { .. }))
            .collect()
    }

    /// Number of quads emitted so far
    pub fn quads_emitted(&self) -> usize {
        self.quads_emitted
    }

    /// Depth of the attribute save stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Clear the command log (state and stack are left alone)
    pub fn clear_ops(&mut self) {
        self.ops.clear();
        self.quads_emitted = 0;
    }
}

impl RenderDevice for TraceDevice {
    fn push_attrib(&mut self, mask: AttribFlags) {
        self.stack.push((mask, self.state.clone()));
        self.ops.push(TraceOp::PushAttrib(mask));
    }

    fn pop_attrib(&mut self) {
        let Some((mask, saved)) = self.stack.pop() else {
            log::warn!("pop_attrib with empty attribute stack");
            return;
        };
        if mask.contains(AttribFlags::CURRENT) {
            self.state.color = saved.color;
        }
        if mask.contains(AttribFlags::COLOR_BUFFER) {
            self.state.blend = saved.blend;
        }
        if mask.contains(AttribFlags::LIGHTING) {
            self.state.lighting = saved.lighting;
            self.state.normalize = saved.normalize;
        }
        if mask.contains(AttribFlags::TRANSFORM) {
            self.state.modelview = saved.modelview;
        }
        self.ops.push(TraceOp::PopAttrib);
    }

    fn set_color(&mut self, color: [f32; 4]) {
        self.state.color = color;
        self.ops.push(TraceOp::SetColor(color));
    }

    fn set_blend(&mut self, enabled: bool) {
        self.state.blend = enabled;
        self.ops.push(TraceOp::SetBlend(enabled));
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.state.lighting = enabled;
        self.ops.push(TraceOp::SetLighting(enabled));
    }

    fn set_normalize(&mut self, enabled: bool) {
        self.state.normalize = enabled;
        self.ops.push(TraceOp::SetNormalize(enabled));
    }

    fn set_modelview(&mut self, modelview: Mat4) {
        self.state.modelview = modelview;
        self.ops.push(TraceOp::SetModelview(modelview));
    }

    fn draw_quad(&mut self, normal: Vec3, vertices: [Point3; 4]) -> Result<(), RenderError> {
        if let Some(limit) = self.fail_after_quads {
            if self.quads_emitted >= limit {
                return Err(RenderError::Emit(format!(
                    "injected failure after {limit} quads"
                )));
            }
        }
        self.quads_emitted += 1;
        self.ops.push(TraceOp::Quad { normal, vertices });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_restores_masked_state_only() {
        let mut device = TraceDevice::new();
        device.push_attrib(AttribFlags::CURRENT);
        device.set_color([0.0, 0.0, 0.0, 0.0]);
        device.set_blend(true);
        device.pop_attrib();

        // Color was saved; blend was outside the mask and keeps its value.
        assert_eq!(device.state().color, [1.0, 1.0, 1.0, 1.0]);
        assert!(device.state().blend);
    }

    #[test]
    fn test_nested_push_pop() {
        let mut device = TraceDevice::new();
        device.push_attrib(AttribFlags::all());
        device.set_color([0.5, 0.5, 0.5, 1.0]);
        device.push_attrib(AttribFlags::all());
        device.set_color([0.1, 0.1, 0.1, 1.0]);
        device.pop_attrib();
        assert_eq!(device.state().color, [0.5, 0.5, 0.5, 1.0]);
        device.pop_attrib();
        assert_eq!(device.state().color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(device.stack_depth(), 0);
    }

    #[test]
    fn test_injected_quad_failure() {
        let mut device = TraceDevice::new();
        device.fail_after_quads = Some(1);
        let quad = [Point3::origin(); 4];
        assert!(device.draw_quad(Vec3::y(), quad).is_ok());
        assert!(device.draw_quad(Vec3::y(), quad).is_err());
        assert_eq!(device.quads_emitted(), 1);
    }
}
