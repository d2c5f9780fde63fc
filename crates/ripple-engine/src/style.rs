use crate::color::Color;
use crate::geometry::{FrameGeometry, Size};
use serde::{Deserialize, Serialize};

/// Construction-time look of a ripple widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RippleStyle {
    pub ripple_color: Color,
    /// Margin reserved on every side for the shadow blur.
    pub shadow_space: f64,
    pub shadow_color: Color,
    pub base_color: Color,
    pub corner_radius: f64,
}

impl Default for RippleStyle {
    fn default() -> Self {
        Self {
            ripple_color: Color::ripple_blue(),
            shadow_space: 15.0,
            shadow_color: Color::gray(),
            base_color: Color::white(),
            corner_radius: 20.0,
        }
    }
}

impl RippleStyle {
    /// Clamps negative lengths to zero.
    pub fn sanitized(mut self) -> Self {
        if self.shadow_space.is_nan() || self.shadow_space < 0.0 {
            log::warn!("shadow_space {} clamped to 0", self.shadow_space);
            self.shadow_space = 0.0;
        }
        if self.corner_radius.is_nan() || self.corner_radius < 0.0 {
            log::warn!("corner_radius {} clamped to 0", self.corner_radius);
            self.corner_radius = 0.0;
        }
        self
    }

    pub fn frame_for(&self, size: Size) -> FrameGeometry {
        FrameGeometry::new(size, self.shadow_space, self.corner_radius)
    }

    pub fn shadow_blur(&self) -> f64 {
        FrameGeometry::shadow_blur(self.shadow_space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_style_keeps_defaults() {
        let style: RippleStyle =
            serde_json::from_str(r##"{"ripple_color": "#FFFF0000", "corner_radius": 8}"##).unwrap();
        assert_eq!(style.ripple_color.to_argb(), 0xFFFF_0000);
        assert_eq!(style.corner_radius, 8.0);
        assert_eq!(style.shadow_space, 15.0);
        assert_eq!(style.base_color, Color::white());
    }

    #[test]
    fn test_sanitized_clamps_negative_lengths() {
        let style = RippleStyle {
            shadow_space: -3.0,
            corner_radius: f64::NAN,
            ..RippleStyle::default()
        }
        .sanitized();
        assert_eq!(style.shadow_space, 0.0);
        assert_eq!(style.corner_radius, 0.0);
    }

    #[test]
    fn test_shadow_blur_is_four_fifths_of_space() {
        assert_eq!(RippleStyle::default().shadow_blur(), 12.0);
    }
}
