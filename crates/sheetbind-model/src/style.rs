//! Conditional cell styling.
//!
//! A style decision is independent of the cell's logical value. `None` from a
//! style function means "leave default formatting", never "clear formatting".

/// RGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color(pub u32);

/// Per-cell visual formatting decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    pub fill: Option<Color>,
    pub font: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, color: Color) -> Self {
        self.font = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Shared style presets. A constant lookup table, safe to share across calls.
pub mod colors {
    use super::Color;

    /// Light green: value matches the previous state.
    pub const UNCHANGED: Color = Color(0x00C6_EFCE);
    /// Light yellow: value differs from the previous state.
    pub const CHANGED: Color = Color(0x00FF_EB9C);
    /// Orange: needs attention.
    pub const WARNING: Color = Color(0x00FF_C000);
    /// Light blue: informational.
    pub const INFO: Color = Color(0x00BD_D7EE);
    /// Light red: invalid or failing.
    pub const ERROR: Color = Color(0x00FF_C7CE);
    /// Gray: not applicable.
    pub const NEUTRAL: Color = Color(0x00D9_D9D9);
}
