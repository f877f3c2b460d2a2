//! Strict-dominance pixel classification.
//!
//! Every pixel is attributed to the color channel that strictly exceeds both
//! other channels. Pixels without such a channel — true grays and ties
//! between two channels — count as neutral, so the four categories always
//! partition the input exactly.

use image::{Rgb, RgbImage};
use serde::Serialize;

/// Category assigned to a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    Red,
    Green,
    Blue,
    Neutral,
}

impl Dominance {
    /// All categories, in display order.
    pub const ALL: [Dominance; 4] = [
        Dominance::Red,
        Dominance::Green,
        Dominance::Blue,
        Dominance::Neutral,
    ];
}

/// Aggregated per-category pixel counts for one classification pass.
///
/// Invariant: the four counts sum to the number of pixels classified, since
/// every pixel lands in exactly one category.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    /// Pixels whose red channel strictly exceeds green and blue.
    pub red: u64,

    /// Pixels whose green channel strictly exceeds red and blue.
    pub green: u64,

    /// Pixels whose blue channel strictly exceeds red and green.
    pub blue: u64,

    /// Pixels with no strictly dominant channel (grays and two-way ties).
    pub neutral: u64,
}

/// Classify a single pixel by strict channel dominance.
///
/// A channel wins only by strictly exceeding both other channels, so a
/// partial tie like (100, 100, 50) is `Neutral` rather than red or green.
pub fn classify_pixel(pixel: Rgb<u8>) -> Dominance {
    let Rgb([r, g, b]) = pixel;

    if r > g && r > b {
        Dominance::Red
    } else if g > r && g > b {
        Dominance::Green
    } else if b > r && b > g {
        Dominance::Blue
    } else {
        Dominance::Neutral
    }
}

/// Count dominant channels over an arbitrary pixel sequence.
///
/// Total over any input: an empty sequence yields all-zero counts, and no
/// pixel value can fail to classify.
pub fn classify_pixels<I>(pixels: I) -> ClassificationResult
where
    I: IntoIterator<Item = Rgb<u8>>,
{
    let mut counts = ClassificationResult::default();
    for pixel in pixels {
        counts.record(classify_pixel(pixel));
    }
    counts
}

/// Count dominant channels over every pixel of a decoded image.
pub fn classify_image(image: &RgbImage) -> ClassificationResult {
    classify_pixels(image.pixels().copied())
}

impl ClassificationResult {
    /// Add one pixel's category to the counts.
    pub fn record(&mut self, dominance: Dominance) {
        match dominance {
            Dominance::Red => self.red += 1,
            Dominance::Green => self.green += 1,
            Dominance::Blue => self.blue += 1,
            Dominance::Neutral => self.neutral += 1,
        }
    }

    /// Count for a single category.
    pub fn count(&self, dominance: Dominance) -> u64 {
        match dominance {
            Dominance::Red => self.red,
            Dominance::Green => self.green,
            Dominance::Blue => self.blue,
            Dominance::Neutral => self.neutral,
        }
    }

    /// Total number of pixels classified.
    pub fn total(&self) -> u64 {
        self.red + self.green + self.blue + self.neutral
    }

    /// Share of a category in [0, 1]. Zero when nothing was classified.
    pub fn share(&self, dominance: Dominance) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(dominance) as f64 / total as f64
    }
}
