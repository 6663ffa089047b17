//! Mask search data types

use image::Rgba;
use serde::Serialize;

use super::region::MatchRegion;

/// An RGBA color with 8-bit channels
pub type Pixel = Rgba<u8>;

/// Opaque pure black: mask pixels that must differ from the region background
pub const BLACK: Pixel = Rgba([0, 0, 0, 255]);
/// Opaque pure white: mask pixels that must match the region background
pub const WHITE: Pixel = Rgba([255, 255, 255, 255]);
/// Background estimate returned when the mask has no black pixels
pub const NO_BACKGROUND: Pixel = Rgba([0, 0, 0, 0]);
/// Outline color for accepted matches
pub const OUTLINE: Pixel = Rgba([255, 0, 0, 255]);

/// Pack a pixel into a single 32-bit value, red in the lowest byte.
pub fn packed(pixel: &Pixel) -> u32 {
    u32::from_le_bytes(pixel.0)
}

/// What a mask pixel asks of the image pixel under it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskRole {
    /// Pure black: the subject, expected to stand out from the background
    Foreground,
    /// Pure white: expected to blend with the background
    Background,
    /// Any other color. Never matches; always scores a miss.
    Unrecognized,
}

impl MaskRole {
    /// Classify a mask pixel by exact (packed) equality with the sentinel colors
    pub fn of(pixel: &Pixel) -> Self {
        match packed(pixel) {
            p if p == packed(&BLACK) => MaskRole::Foreground,
            p if p == packed(&WHITE) => MaskRole::Background,
            _ => MaskRole::Unrecognized,
        }
    }
}

/// Top-left corner of a mask-sized candidate region in the searched image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub row: u32,
    pub col: u32,
}

impl Origin {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Accepted matches in scan order, none overlapping another
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSet {
    origins: Vec<Origin>,
    mask_width: u32,
    mask_height: u32,
    threshold: i64,
}

impl MatchSet {
    pub(crate) fn new(mask_width: u32, mask_height: u32, threshold: i64) -> Self {
        Self {
            origins: Vec::new(),
            mask_width,
            mask_height,
            threshold,
        }
    }

    pub(crate) fn push(&mut self, origin: Origin) {
        self.origins.push(origin);
    }

    /// Accepted origins in row-major scan order
    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Score a region had to exceed to be accepted
    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn mask_dimensions(&self) -> (u32, u32) {
        (self.mask_width, self.mask_height)
    }

    /// Rectangles of the accepted matches, in scan order
    pub fn regions(&self) -> impl Iterator<Item = MatchRegion> + '_ {
        self.origins
            .iter()
            .map(|&origin| MatchRegion::new(origin, self.mask_width, self.mask_height))
    }

    /// Outline every accepted region in `image`
    pub fn draw_outlines(&self, image: &mut image::RgbaImage) {
        for region in self.regions() {
            region.draw_outline(image, OUTLINE);
        }
    }

    pub fn to_report(&self) -> MatchReport {
        MatchReport {
            matches: self.regions().collect(),
            count: self.len(),
            mask_width: self.mask_width,
            mask_height: self.mask_height,
            threshold: self.threshold,
        }
    }
}

/// Serializable summary of a finished search
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub matches: Vec<MatchRegion>,
    pub count: usize,
    pub mask_width: u32,
    pub mask_height: u32,
    pub threshold: i64,
}

impl MatchReport {
    /// One `sub-image matched at` line per match followed by the total
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for region in &self.matches {
            out.push_str(&format!("sub-image matched at: {region}\n"));
        }
        out.push_str(&format!("Number of matches: {}\n", self.count));
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
