use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// The core never paints; colors only travel to legend and tooltip view models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels, e.g. `Color::from_rgb8(0x31, 0x4A, 0x6E)`.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Default series palette, cycled by series registration order.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb(0.192, 0.290, 0.431),
    Color::rgb(0.914, 0.341, 0.341),
    Color::rgb(0.243, 0.612, 0.576),
    Color::rgb(0.988, 0.690, 0.250),
    Color::rgb(0.447, 0.325, 0.643),
    Color::rgb(0.325, 0.588, 0.839),
    Color::rgb(0.800, 0.439, 0.627),
    Color::rgb(0.494, 0.706, 0.247),
    Color::rgb(0.576, 0.400, 0.290),
    Color::rgb(0.420, 0.443, 0.478),
];

#[must_use]
pub fn palette_color(index: usize) -> Color {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}
