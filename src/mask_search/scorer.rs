//! Hit/miss scoring of a candidate region against a two-tone mask

use image::RgbaImage;

use super::types::{MaskRole, Origin, Pixel};

/// Per-pixel scoring outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
}

/// True when every RGB channel of `pixel` is strictly closer than `tolerance`
/// to the same channel of `background`. Alpha is ignored.
pub fn is_same_shade(pixel: &Pixel, background: &Pixel, tolerance: i32) -> bool {
    pixel.0[..3]
        .iter()
        .zip(&background.0[..3])
        .all(|(&a, &b)| (i32::from(a) - i32::from(b)).abs() < tolerance)
}

/// How mask roles and same-shade tests combine into hits and misses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitRule {
    /// Black expects the pixel to differ from the background, white expects
    /// it to blend in. Any other mask color is a miss regardless of the image.
    #[default]
    BackgroundContrast,
    /// The background estimate is the mean shade under the black pixels, so
    /// black pixels hit when they share it and every other mask pixel hits
    /// when it does not.
    SubjectShade,
}

impl HitRule {
    pub fn classify(self, role: MaskRole, same_shade: bool) -> Outcome {
        match self {
            HitRule::BackgroundContrast => match (role, same_shade) {
                (MaskRole::Foreground, false) | (MaskRole::Background, true) => Outcome::Hit,
                (MaskRole::Foreground, true) | (MaskRole::Background, false) => Outcome::Miss,
                (MaskRole::Unrecognized, _) => Outcome::Miss,
            },
            HitRule::SubjectShade => match (role, same_shade) {
                (MaskRole::Foreground, true) => Outcome::Hit,
                (MaskRole::Foreground, false) => Outcome::Miss,
                (_, true) => Outcome::Miss,
                (_, false) => Outcome::Hit,
            },
        }
    }
}

/// Hit and miss counts for one region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionTally {
    pub hits: u64,
    pub misses: u64,
}

impl RegionTally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
        }
    }

    /// Net score, `hits - misses`
    pub fn score(&self) -> i64 {
        self.hits as i64 - self.misses as i64
    }
}

/// Classify every mask pixel against the image pixel under it.
///
/// # Panics
/// If the mask-sized region at `origin` extends past the image bounds.
pub fn tally_region(
    image: &RgbaImage,
    mask: &RgbaImage,
    origin: Origin,
    background: &Pixel,
    tolerance: i32,
    rule: HitRule,
) -> RegionTally {
    let mut tally = RegionTally::default();
    for (mask_col, mask_row, mask_pixel) in mask.enumerate_pixels() {
        let pixel = image.get_pixel(origin.col + mask_col, origin.row + mask_row);
        let same_shade = is_same_shade(pixel, background, tolerance);
        tally.record(rule.classify(MaskRole::of(mask_pixel), same_shade));
    }
    tally
}

/// Signed match score of the region at `origin` under the default hit rule:
/// hits minus misses, so it ranges from `-(w * h)` to `w * h`.
pub fn score_region(
    image: &RgbaImage,
    mask: &RgbaImage,
    origin: Origin,
    background: &Pixel,
    tolerance: i32,
) -> i64 {
    tally_region(image, mask, origin, background, tolerance, HitRule::default()).score()
}
