//! Channel identifiers and the value type every channel carries.

use serde::{Deserialize, Serialize};

/// Three scalars: a position, Euler XYZ angles in radians, or a linear RGB color.
pub type Vec3 = [f32; 3];

/// Which property of a target a track drives.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Position,
    /// Euler XYZ rotation, radians.
    Rotation,
    /// Linear RGB base color.
    BaseColor,
    /// Linear RGB emissive color.
    Emissive,
}

impl Channel {
    /// True for channels that belong to the object's transform.
    #[inline]
    pub fn is_pose(self) -> bool {
        matches!(self, Channel::Position | Channel::Rotation)
    }
}

/// Convert an sRGB hex color (0xRRGGBB) to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    fn channel(c: u32) -> f32 {
        let s = c as f32 / 255.0;
        if s <= 0.04045 {
            s / 12.92
        } else {
            ((s + 0.055) / 1.055).powf(2.4)
        }
    }
    [
        channel((hex >> 16) & 0xff),
        channel((hex >> 8) & 0xff),
        channel(hex & 0xff),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes() {
        assert_eq!(srgb_hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(srgb_hex_to_linear(0xffffff), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn pose_channels() {
        assert!(Channel::Position.is_pose());
        assert!(Channel::Rotation.is_pose());
        assert!(!Channel::Emissive.is_pose());
    }
}
