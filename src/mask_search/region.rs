//! Rectangles of accepted matches and their outlines

use std::fmt;

use image::RgbaImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::Serialize;

use super::types::{Origin, Pixel};

/// A matched region as reported: `bottom` and `right` are one past the last
/// row/column covered by the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchRegion {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl MatchRegion {
    pub fn new(origin: Origin, mask_width: u32, mask_height: u32) -> Self {
        Self {
            top: origin.row,
            left: origin.col,
            bottom: origin.row + mask_height,
            right: origin.col + mask_width,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Draw a one-pixel outline on rows `top` and `bottom` and columns `left`
    /// and `right`, so the box sits one pixel outside the region on the
    /// bottom/right. Parts falling outside the image are clipped. Regions
    /// starting beyond `i32::MAX` cannot be addressed by the drawing
    /// routines and are skipped.
    pub fn draw_outline(&self, image: &mut RgbaImage, color: Pixel) {
        let (Ok(left), Ok(top)) = (i32::try_from(self.left), i32::try_from(self.top)) else {
            log::warn!("⚠️ Region {} is out of drawing range, outline skipped", self);
            return;
        };
        let rect = Rect::at(left, top).of_size(self.width() + 1, self.height() + 1);
        draw_hollow_rect_mut(image, rect, color);
    }
}

impl fmt::Display for MatchRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.top, self.left, self.bottom, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask_search::types::{OUTLINE, WHITE};

    #[test]
    fn test_region_from_origin() {
        let region = MatchRegion::new(Origin::new(2, 3), 4, 5);
        assert_eq!(region.top, 2);
        assert_eq!(region.left, 3);
        assert_eq!(region.bottom, 7);
        assert_eq!(region.right, 7);
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 5);
        assert_eq!(region.to_string(), "2, 3, 7, 7");
    }

    #[test]
    fn test_outline_includes_far_edges() {
        let mut image = RgbaImage::from_pixel(8, 8, WHITE);
        MatchRegion::new(Origin::new(1, 2), 3, 2).draw_outline(&mut image, OUTLINE);

        // image.get_pixel takes (x = col, y = row)
        for col in 2..=5 {
            assert_eq!(*image.get_pixel(col, 1), OUTLINE, "top edge at col {col}");
            assert_eq!(*image.get_pixel(col, 3), OUTLINE, "bottom edge at col {col}");
        }
        for row in 1..=3 {
            assert_eq!(*image.get_pixel(2, row), OUTLINE, "left edge at row {row}");
            assert_eq!(*image.get_pixel(5, row), OUTLINE, "right edge at row {row}");
        }
        // Interior untouched
        assert_eq!(*image.get_pixel(3, 2), WHITE);
        assert_eq!(*image.get_pixel(4, 2), WHITE);
        // Outside untouched
        assert_eq!(*image.get_pixel(6, 1), WHITE);
        assert_eq!(*image.get_pixel(2, 4), WHITE);
    }

    #[test]
    fn test_outline_clipped_at_image_border() {
        let mut image = RgbaImage::from_pixel(4, 4, WHITE);
        // Far edges land on row 4 / col 4, outside a 4x4 image
        MatchRegion::new(Origin::new(2, 2), 2, 2).draw_outline(&mut image, OUTLINE);

        assert_eq!(*image.get_pixel(2, 2), OUTLINE);
        assert_eq!(*image.get_pixel(3, 2), OUTLINE);
        assert_eq!(*image.get_pixel(2, 3), OUTLINE);
        assert_eq!(*image.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn test_outline_skipped_past_drawing_range() {
        let mut image = RgbaImage::from_pixel(4, 4, WHITE);
        let far = i32::MAX as u32 + 1;
        for region in [
            MatchRegion { top: far, left: 0, bottom: far + 2, right: 2 },
            MatchRegion { top: 0, left: far, bottom: 2, right: far + 2 },
            MatchRegion { top: u32::MAX - 1, left: 0, bottom: u32::MAX, right: 3 },
        ] {
            region.draw_outline(&mut image, OUTLINE);
        }
        assert!(image.pixels().all(|pixel| *pixel == WHITE));
    }
}
