use serde::{Deserialize, Serialize};

use super::Interpolate;

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies the color channels component-wise (tinting).
    #[must_use]
    pub fn tint(self, other: Self) -> Self {
        Self::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Composites `self` over an opaque `background` ("source over").
    #[must_use]
    pub fn over(self, background: Self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        Self::new(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
            1.0,
        )
    }

    /// Converts to 8-bit RGB channels, ignoring alpha.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Interpolate for Rgba {
    fn lerp(self, t: f32, other: Self) -> Self {
        Self::new(
            Interpolate::lerp(self.r, t, other.r),
            Interpolate::lerp(self.g, t, other.g),
            Interpolate::lerp(self.b, t, other.b),
            Interpolate::lerp(self.a, t, other.a),
        )
    }
}
