//! Scoped graphics-state acquisition

use crate::render::device::{AttribFlags, RenderDevice};

/// Guard that pushes device state on creation and pops it on drop
///
/// Restoration runs on every exit path out of the drawing body: normal
/// completion, early return (a skipped pick object), and `?` propagation of
/// a mid-draw failure. State changed inside the scope is never visible to
/// the next object drawn.
pub struct StateScope<'a> {
    device: &'a mut dyn RenderDevice,
}

impl<'a> StateScope<'a> {
    /// Push the state groups in `mask` and enter the scope
    pub fn new(device: &'a mut dyn RenderDevice, mask: AttribFlags) -> Self {
        device.push_attrib(mask);
        Self { device }
    }

    /// Access the device for drawing inside the scope
    pub fn device(&mut self) -> &mut dyn RenderDevice {
        self.device
    }
}

impl Drop for StateScope<'_> {
    fn drop(&mut self) {
        self.device.pop_attrib();
    }
}
