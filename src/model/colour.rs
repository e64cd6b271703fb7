use serde::{Deserialize, Serialize};

/// Display colour pushed to the output sink's rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    pub const YELLOW: Rgba = Rgba::opaque(255, 255, 0);
    pub const MAGENTA: Rgba = Rgba::opaque(255, 0, 255);
    pub const CYAN: Rgba = Rgba::opaque(0, 255, 255);
    /// No colour bias; the default for channels without an explicit entry.
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Palette lookup by display name. Unknown names resolve to `None` and
    /// callers fall back to [`Rgba::WHITE`].
    pub fn from_name(name: &str) -> Option<Rgba> {
        match name {
            "Red" => Some(Self::RED),
            "Green" => Some(Self::GREEN),
            "Blue" => Some(Self::BLUE),
            "Yellow" => Some(Self::YELLOW),
            "Magenta" => Some(Self::MAGENTA),
            "Cyan" => Some(Self::CYAN),
            "White" => Some(Self::WHITE),
            _ => None,
        }
    }
}
