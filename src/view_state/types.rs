//! Core view-state newtypes

use serde::Deserialize;

/// Width available for laying out a comment's items, in points. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayoutWidth(u32);

/// Error returned when attempting to create a LayoutWidth of zero via the smart constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("LayoutWidth must be >= 1 (got {0})")]
pub struct InvalidLayoutWidth(pub u32);

impl LayoutWidth {
    /// Smart constructor that validates width is >= 1.
    pub fn new(width: u32) -> Result<Self, InvalidLayoutWidth> {
        if width == 0 {
            Err(InvalidLayoutWidth(width))
        } else {
            Ok(Self(width))
        }
    }

    /// Get the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Size of a rendered item, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Section insets around a comment, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insets {
    /// Space above the details row.
    #[serde(default)]
    pub top: u32,
    /// Leading space.
    #[serde(default)]
    pub left: u32,
    /// Space below the reactions row.
    #[serde(default)]
    pub bottom: u32,
    /// Trailing space.
    #[serde(default)]
    pub right: u32,
}

impl Insets {
    /// No inset on any edge.
    pub const ZERO: Self = Self {
        top: 0,
        left: 0,
        bottom: 0,
        right: 0,
    };

    /// Create new insets.
    pub fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Which edge rows of a comment draw a separator border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    /// Border above the details row.
    pub details: bool,
    /// Border below the reactions row.
    pub reactions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod layout_width {
        use super::*;

        #[test]
        fn rejects_zero() {
            assert_eq!(LayoutWidth::new(0), Err(InvalidLayoutWidth(0)));
        }

        #[test]
        fn accepts_positive() {
            let width = LayoutWidth::new(375).expect("positive width");
            assert_eq!(width.get(), 375);
        }
    }

    mod insets {
        use super::*;

        #[test]
        fn zero_is_all_zero() {
            assert_eq!(Insets::ZERO, Insets::new(0, 0, 0, 0));
            assert_eq!(Insets::ZERO, Insets::default());
        }

        #[test]
        fn deserializes_partial_toml() {
            let insets: Insets = toml::from_str("top = 15\nleft = 10").expect("valid toml");
            assert_eq!(insets, Insets::new(15, 10, 0, 0));
        }
    }
}
