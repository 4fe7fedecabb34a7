//! GPU-ready instance types for circle rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Color;

/// One filled circle (balloon or particle)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub pos: [f32; 2],
    pub radius: f32,
    /// Remaining ticks for particles, 0 for balloons
    pub life: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    pub fn new(pos: [f32; 2], radius: f32, life: f32, color: [f32; 4]) -> Self {
        Self {
            pos,
            radius,
            life,
            color,
        }
    }
}

/// Convert an 8-bit RGB color to normalized RGBA
#[inline]
pub fn rgba(color: Color) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

/// Colors for screen elements
pub mod colors {
    use crate::sim::Color;

    pub const BACKGROUND_LIGHT: Color = [235, 235, 235];
    pub const BACKGROUND_DARK: Color = [30, 30, 30];
    pub const TEXT_LIGHT: Color = [235, 235, 235];
    pub const TEXT_DARK: Color = [30, 30, 30];
    pub const LIVES: Color = [235, 0, 0];
    pub const BUTTON: Color = [180, 180, 180];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
        let instances = [CircleInstance::new([1.0, 2.0], 3.0, 4.0, [0.5; 4])];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn rgba_normalizes() {
        assert_eq!(rgba([255, 0, 51]), [1.0, 0.0, 0.2, 1.0]);
    }
}
