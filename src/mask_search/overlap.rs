//! Suppression of candidates that overlap an accepted match

use super::types::Origin;

/// True if `candidate` lies closer than one region height and one region
/// width to any accepted origin. All regions share the mask's size, so this
/// is the usual same-size rectangle intersection test.
pub fn overlaps(accepted: &[Origin], candidate: Origin, height: u32, width: u32) -> bool {
    accepted.iter().any(|origin| {
        origin.row.abs_diff(candidate.row) < height && origin.col.abs_diff(candidate.col) < width
    })
}
