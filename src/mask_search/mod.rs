//! Mask search module for locating two-tone patterns in raster images
//!
//! This module provides:
//! - Background estimation under the mask's black pixels
//! - Hit/miss scoring with a per-channel color tolerance
//! - Suppression of overlapping matches in scan order
//! - Row-major sliding-window search, optionally parallel

pub mod background;
pub mod config;
pub mod matcher;
pub mod overlap;
pub mod region;
pub mod scorer;
pub mod types;


pub use background::estimate_background;
pub use config::{SearchConfig, create_lenient_config, create_strict_config};
pub use matcher::{MaskMatcher, candidate_origins, search};
pub use overlap::overlaps;
pub use region::MatchRegion;
pub use scorer::{HitRule, is_same_shade, score_region};
pub use types::{BLACK, MaskRole, MatchReport, MatchSet, Origin, Pixel, WHITE};
