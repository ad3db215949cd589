use serde::{Deserialize, Serialize};

use super::rule::StateId;

/// RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Color of the background state.
pub const BACKGROUND_COLOR: Rgb = Rgb::new(20, 20, 20);

/// Colors indexed by state id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Rgb>,
}

impl Palette {
    #[must_use]
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a state. Unknown states map to the background color.
    #[must_use]
    pub fn color_of(&self, state: StateId) -> Rgb {
        self.colors
            .get(state as usize)
            .copied()
            .unwrap_or(BACKGROUND_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_of_out_of_range_is_background() {
        let palette = Palette::new(vec![BACKGROUND_COLOR, Rgb::new(255, 0, 0)]);
        assert_eq!(palette.color_of(1), Rgb::new(255, 0, 0));
        assert_eq!(palette.color_of(9), BACKGROUND_COLOR);
    }
}
