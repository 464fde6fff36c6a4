//! Linear RGBA color on the `[0, 1]` scale.
//!
//! Preset data and sliders speak 8-bit channels; the renderer speaks floats.
//! All conversions clamp rather than reject, so out-of-range input such as
//! an alpha of `300` or `-10` lands on the nearest valid value.

/// RGBA color with every channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Creates a color, clamping each channel to `[0, 1]`
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Creates a color from 8-bit style integer channels
    ///
    /// Each channel is clamped to `[0, 255]` and divided by 255.
    pub fn from_channels(r: i64, g: i64, b: i64, a: i64) -> Self {
        Self::new(
            channel_to_unit(r),
            channel_to_unit(g),
            channel_to_unit(b),
            channel_to_unit(a),
        )
    }

    /// Builds a color from a `[r, g, b, a]` array (as stored on materials)
    pub fn from_array(rgba: [f32; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same RGB, different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_unit(a),
            ..self
        }
    }

    /// Alpha rounded back onto the 8-bit scale
    pub fn alpha_u8(self) -> u8 {
        unit_to_channel(self.a)
    }

    /// Approximate equality, used where floats went through `/255`
    pub fn approx_eq(self, other: Rgba, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.g - other.g).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.a - other.a).abs() <= epsilon
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Clamps an integer channel to `[0, 255]`
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Converts an integer channel to the `[0, 1]` scale
pub fn channel_to_unit(value: i64) -> f32 {
    clamp_channel(value) as f32 / 255.0
}

/// Converts a `[0, 1]` value back to an 8-bit channel
pub fn unit_to_channel(value: f32) -> u8 {
    (clamp_unit(value) * 255.0).round() as u8
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_clamped() {
        assert_eq!(
            Rgba::from_channels(0, 0, 0, 300),
            Rgba::from_channels(0, 0, 0, 255)
        );
        assert_eq!(
            Rgba::from_channels(0, 0, 0, -10),
            Rgba::from_channels(0, 0, 0, 0)
        );
        assert_eq!(Rgba::from_channels(999, -1, 255, 255), Rgba::new(1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_channel_conversion() {
        let color = Rgba::from_channels(200, 30, 30, 128);
        assert!(color.approx_eq(Rgba::new(0.784, 0.118, 0.118, 0.502), 0.001));
        assert_eq!(color.alpha_u8(), 128);
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let color = Rgba::new(0.2, 0.4, 0.6, 1.0).with_alpha(0.5);
        assert_eq!(color, Rgba::new(0.2, 0.4, 0.6, 0.5));
        assert_eq!(Rgba::WHITE.with_alpha(7.0).a, 1.0);
    }

    #[test]
    fn test_nan_is_clamped_to_zero() {
        assert_eq!(Rgba::new(f32::NAN, 0.5, 0.5, 0.5).r, 0.0);
    }
}
