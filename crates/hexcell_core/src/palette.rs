//! Palette generation for state colors.

use hexcell_data::{Palette, Rgb, BACKGROUND_COLOR};
use rand::Rng;

/// Background gets the fixed dark color, every other state a random one.
#[must_use]
pub fn generate_palette_with_rng<R: Rng>(state_count: usize, rng: &mut R) -> Palette {
    let colors = (0..state_count)
        .map(|state| {
            if state == 0 {
                BACKGROUND_COLOR
            } else {
                Rgb::new(rng.gen(), rng.gen(), rng.gen())
            }
        })
        .collect();
    Palette::new(colors)
}
