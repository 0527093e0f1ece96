//! Renderable collection driven by the scene

use crate::scene::context::DrawContext;
use crate::scene::solid::GeoSolid;

/// A flat collection of solids the driver visits once per pass
#[derive(Default)]
pub struct RenderableLayer {
    solids: Vec<GeoSolid>,
}

impl RenderableLayer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid to the layer
    pub fn add(&mut self, solid: GeoSolid) {
        self.solids.push(solid);
    }

    /// Number of solids in the layer
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Whether the layer holds no solids
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Visit every solid for the current pass
    pub fn render(&mut self, ctx: &mut DrawContext<'_>) {
        for solid in &mut self.solids {
            solid.render(ctx);
        }
    }
}
