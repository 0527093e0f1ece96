//! Color-coded picking support
//!
//! During a pick pass, each object draws itself in a unique solid color
//! instead of its visual appearance. Reading the framebuffer pixel under the
//! cursor and resolving that color through [`PickSupport`] yields the
//! object's identity. Because pick geometry goes through the same draw path
//! as visual geometry, whatever is visible is exactly what is pickable.

use crate::geo::Position;
use std::collections::HashMap;

/// Opaque identity handle an application assigns to a pickable object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId(pub u64);

/// Unique 24-bit RGB pick color
///
/// The zero color is reserved for the framebuffer clear value and is never
/// allocated, so an unoccupied pixel can never resolve to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickColor(u32);

impl PickColor {
    /// Packed 24-bit RGB value (`0xRRGGBB`)
    pub fn rgb(self) -> u32 {
        self.0
    }

    /// The color as RGBA components in [0, 1], fully opaque
    pub fn to_rgba(self) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b, 1.0]
    }
}

/// An object registered for pick resolution
#[derive(Debug, Clone)]
pub struct PickedObject {
    /// The unique color the object was drawn with
    pub color: PickColor,
    /// Application identity
    pub id: PickId,
    /// Geographic anchor, reported with pick results
    pub position: Position,
}

/// Allocates unique pick colors and resolves them back to identities
///
/// One instance lives for the duration of a pick pass; [`clear`](Self::clear)
/// resets it before the next pass so stale registrations cannot resolve.
#[derive(Debug, Default)]
pub struct PickSupport {
    next_color: u32,
    registered: HashMap<u32, PickedObject>,
}

impl PickSupport {
    /// Create an empty pick support with the full color space available
    pub fn new() -> Self {
        Self {
            next_color: 1,
            registered: HashMap::new(),
        }
    }

    /// Allocate the next collision-free pick color
    ///
    /// Returns `None` once the 24-bit color space is exhausted. That is a
    /// recoverable condition: the caller skips the object for this pick pass
    /// rather than failing the frame.
    pub fn allocate_unique_color(&mut self) -> Option<PickColor> {
        if self.next_color > 0x00FF_FFFF {
            return None;
        }
        let color = PickColor(self.next_color);
        self.next_color += 1;
        Some(color)
    }

    /// Register an object under its pick color
    pub fn register(&mut self, color: PickColor, id: PickId, position: Position) {
        self.registered.insert(color.rgb(), PickedObject { color, id, position });
    }

    /// Resolve a framebuffer color back to the object drawn with it
    pub fn resolve(&self, rgb: u32) -> Option<&PickedObject> {
        self.registered.get(&rgb)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no objects are registered
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Reset allocation and registrations for the next pick pass
    pub fn clear(&mut self) {
        self.next_color = 1;
        self.registered.clear();
    }
}
