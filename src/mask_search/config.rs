//! Configuration for mask search operations

use super::scorer::HitRule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Percentage of mask pixels that must score as hits, net of misses.
    /// Not range-checked: values above 100 or below 0 are used as given.
    pub match_threshold_percent: i32,
    /// Per-channel difference below which two colors are the same shade
    pub tolerance: i32,
    /// Treat the search image as a black/white mask. Only the mask
    /// interpretation exists; `false` is logged and otherwise ignored.
    pub is_mask: bool,
    /// How mask roles and same-shade tests turn into hits and misses
    pub hit_rule: HitRule,
    /// Score origins in parallel when the `rayon` feature is compiled in
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_threshold_percent: 75,
            tolerance: 32,
            is_mask: true,
            hit_rule: HitRule::BackgroundContrast,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn new(match_threshold_percent: i32, tolerance: i32) -> Self {
        Self {
            match_threshold_percent,
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_hit_rule(mut self, hit_rule: HitRule) -> Self {
        self.hit_rule = hit_rule;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score a `mask_width x mask_height` region must exceed:
    /// `w * h * percent / 100` with truncating integer division.
    pub fn acceptance_threshold(&self, mask_width: u32, mask_height: u32) -> i64 {
        i64::from(mask_width) * i64::from(mask_height) * i64::from(self.match_threshold_percent)
            / 100
    }

    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    pub(crate) fn use_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "rayon")
    }
}

/// Preset for clean, synthetic inputs: near-exact matches only
pub fn create_strict_config() -> SearchConfig {
    SearchConfig {
        match_threshold_percent: 95,
        tolerance: 16,
        ..SearchConfig::default()
    }
}

/// Preset for photographs and lossy sources
pub fn create_lenient_config() -> SearchConfig {
    SearchConfig {
        match_threshold_percent: 60,
        tolerance: 48,
        ..SearchConfig::default()
    }
}
