//! Sliding-window mask search
//!
//! Scores every mask-sized region of the image in row-major order and keeps
//! the non-overlapping ones that clear the acceptance threshold.

use image::RgbaImage;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::background::{estimate_background, foreground_pixel_count};
use super::config::SearchConfig;
use super::overlap::overlaps;
use super::region::MatchRegion;
use super::scorer::{HitRule, tally_region};
use super::types::{MaskRole, MatchSet, Origin};

/// Every valid top-left origin for a `mask_width x mask_height` region
/// inside the image, row by row. Empty when the mask is larger than the
/// image in either dimension.
pub fn candidate_origins(
    image_width: u32,
    image_height: u32,
    mask_width: u32,
    mask_height: u32,
) -> impl Iterator<Item = Origin> {
    let (rows, max_col) = match (
        image_height.checked_sub(mask_height),
        image_width.checked_sub(mask_width),
    ) {
        (Some(max_row), Some(max_col)) => (0..=max_row, max_col),
        _ => (1..=0, 0),
    };
    rows.flat_map(move |row| (0..=max_col).map(move |col| Origin::new(row, col)))
}

/// Number of origins [`candidate_origins`] yields
pub fn candidate_count(image_width: u32, image_height: u32, mask_width: u32, mask_height: u32) -> usize {
    match (
        image_height.checked_sub(mask_height),
        image_width.checked_sub(mask_width),
    ) {
        (Some(max_row), Some(max_col)) => (max_row as usize + 1) * (max_col as usize + 1),
        _ => 0,
    }
}

/// Estimate the region background, then score the region against it
pub fn score_at(
    image: &RgbaImage,
    mask: &RgbaImage,
    origin: Origin,
    tolerance: i32,
    rule: HitRule,
) -> i64 {
    let background = estimate_background(image, mask, origin);
    tally_region(image, mask, origin, &background, tolerance, rule).score()
}

/// Search `image` for `mask` with the given threshold and tolerance
pub fn search(
    image: &RgbaImage,
    mask: &RgbaImage,
    match_threshold_percent: i32,
    tolerance: i32,
) -> MatchSet {
    MaskMatcher::new(SearchConfig::new(match_threshold_percent, tolerance)).search(image, mask)
}

/// Mask matcher for finding two-tone patterns in images
pub struct MaskMatcher {
    config: SearchConfig,
}

impl MaskMatcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find all non-overlapping matches of `mask` in `image`.
    ///
    /// Origins are visited row-major; an origin is accepted when its score
    /// is strictly greater than the acceptance threshold and it does not
    /// overlap an origin accepted earlier in that order. Parallel scoring
    /// gives the same result as the sequential scan.
    pub fn search(&self, image: &RgbaImage, mask: &RgbaImage) -> MatchSet {
        let (mask_width, mask_height) = mask.dimensions();
        let threshold = self.config.acceptance_threshold(mask_width, mask_height);
        let mut matches = MatchSet::new(mask_width, mask_height, threshold);

        let total = candidate_count(image.width(), image.height(), mask_width, mask_height);
        if total == 0 {
            log::warn!(
                "⚠️ Mask {}x{} larger than image {}x{}",
                mask_width,
                mask_height,
                image.width(),
                image.height()
            );
            return matches;
        }

        self.log_mask_diagnostics(mask);
        log::debug!(
            "🔍 Scanning {} origins, accept score > {} (tolerance {})",
            total,
            threshold,
            self.config.tolerance
        );

        #[cfg(feature = "rayon")]
        {
            if self.config.use_parallel() {
                let scored = self.score_all_parallel(image, mask);
                accept_in_scan_order(&mut matches, scored.into_iter());
                log::debug!("✅ Found {} matches", matches.len());
                return matches;
            }
        }

        let (tolerance, rule) = (self.config.tolerance, self.config.hit_rule);
        let report_interval = (total / 10).max(1); // Report every 10%
        let scored = candidate_origins(image.width(), image.height(), mask_width, mask_height)
            .enumerate()
            .map(|(idx, origin)| {
                let position = idx + 1;
                if position % report_interval == 0 {
                    log::debug!("  ⏳ Mask scanning: {}%", position * 100 / total);
                }
                (origin, score_at(image, mask, origin, tolerance, rule))
            });
        accept_in_scan_order(&mut matches, scored);

        log::debug!("✅ Found {} matches", matches.len());
        matches
    }

    /// Search, then outline every accepted region in `image`
    pub fn search_and_annotate(&self, image: &mut RgbaImage, mask: &RgbaImage) -> MatchSet {
        let matches = self.search(image, mask);
        matches.draw_outlines(image);
        matches
    }

    /// Scores for every origin, computed in parallel but returned in scan order
    #[cfg(feature = "rayon")]
    fn score_all_parallel(&self, image: &RgbaImage, mask: &RgbaImage) -> Vec<(Origin, i64)> {
        let (tolerance, rule) = (self.config.tolerance, self.config.hit_rule);
        let (mask_width, mask_height) = mask.dimensions();
        let origins: Vec<Origin> =
            candidate_origins(image.width(), image.height(), mask_width, mask_height).collect();
        origins
            .into_par_iter()
            .map(|origin| (origin, score_at(image, mask, origin, tolerance, rule)))
            .collect()
    }

    fn log_mask_diagnostics(&self, mask: &RgbaImage) {
        if !self.config.is_mask {
            log::warn!("⚠️ Direct pixel comparison is not supported, using the mask interpretation");
        }

        let unrecognized = mask
            .pixels()
            .filter(|pixel| MaskRole::of(pixel) == MaskRole::Unrecognized)
            .count();
        if unrecognized > 0 {
            let effect = match self.config.hit_rule {
                HitRule::BackgroundContrast => "they always score as misses",
                HitRule::SubjectShade => "they are scored like white",
            };
            log::warn!(
                "⚠️ Mask has {} pixels that are neither pure black nor pure white; {}",
                unrecognized,
                effect
            );
        }

        if foreground_pixel_count(mask) == 0 {
            log::debug!("Mask has no black pixels, every background estimate is transparent black");
        }
    }
}

impl Default for MaskMatcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// The acceptance pass. Depends on earlier acceptances, so it always runs
/// sequentially over scan order.
fn accept_in_scan_order(matches: &mut MatchSet, scored: impl Iterator<Item = (Origin, i64)>) {
    let (mask_width, mask_height) = matches.mask_dimensions();
    let threshold = matches.threshold();

    for (origin, score) in scored {
        if score > threshold && !overlaps(matches.origins(), origin, mask_height, mask_width) {
            log::debug!(
                "  🎯 Accepted {} (score {})",
                MatchRegion::new(origin, mask_width, mask_height),
                score
            );
            matches.push(origin);
        }
    }
}
