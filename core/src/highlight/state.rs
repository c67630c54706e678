//! Highlight colors and the per-part visual state snapshot.

/// RGBA color with components in `0.0..=1.0`.
///
/// Plain floats keep the core free of any rendering crate; convert with
/// [`Color::to_array`] / [`Color::from_array`] at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgba(1.0, 0.921_568_6, 0.015_686_275, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    /// The saturated "blue" of the xkcd color survey, used for action targets.
    pub const XKCD_BLUE: Self = Self::rgba(0.011_764_706, 0.262_745_1, 0.874_509_8, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CLEAR
    }
}

/// When the host draws a part's highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightKind {
    Disabled,
    #[default]
    OnMouseOver,
    AlwaysOn,
}

/// Snapshot of everything the host shows about a part's highlight.
///
/// Captured once as the "original" appearance before a tracker touches a
/// part, and written back field by field on restore.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighlightState {
    pub color: Color,
    pub kind: HighlightKind,
    /// Whether the highlight extends to the part's children.
    pub recursive: bool,
    pub active: bool,
}
