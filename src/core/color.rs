//! Color values
//!
//! A 24-bit foreground color as read from an escape sequence. Components are
//! kept signed and unclamped: `ESC[38;2;300;0;0m` is a valid color whose red
//! ratio is above 1.0.

use std::fmt;

/// Maximum conventional component value
pub const COMPONENT_MAX: f64 = 255.0;

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Color {
    /// Create a new color
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// True when every component is non-negative
    pub fn is_valid(&self) -> bool {
        self.r >= 0 && self.g >= 0 && self.b >= 0
    }

    /// Components divided by 255, in r, g, b order
    pub fn ratios(&self) -> [f64; 3] {
        [
            f64::from(self.r) / COMPONENT_MAX,
            f64::from(self.g) / COMPONENT_MAX,
            f64::from(self.b) / COMPONENT_MAX,
        ]
    }

    /// Render as a groff `rgb` argument list: `1.000000f 0.000000f 0.000000f`
    pub fn groff_rgb(&self) -> String {
        let [r, g, b] = self.ratios();
        format!("{:.6}f {:.6}f {:.6}f", r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
