//! Drawable colors extracted from the target image.

use std::collections::HashSet;

use rand::Rng;

use crate::canvas::{Image, Pixel};
use crate::error::{SketchError, SketchResult};

/// The ordered set of colors candidate lines may use, built from a row-major
/// scan of the target.
///
/// Without deduplication every pixel is appended, repeats included, so a
/// uniform draw is biased toward the image's dominant colors. With
/// deduplication each value appears once, in first-seen order.
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    pub fn from_image(target: &Image, deduplicate: bool) -> SketchResult<Self> {
        if target.is_empty() {
            return Err(SketchError::EmptyPalette);
        }

        let colors = if deduplicate {
            let mut seen = HashSet::new();
            target.pixels().filter(|p| seen.insert(*p)).collect()
        } else {
            target.pixels().collect()
        };

        Ok(Palette { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// One color drawn uniformly at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Pixel {
        self.colors[rng.random_range(0..self.colors.len())]
    }

    #[cfg(test)]
    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }
}
