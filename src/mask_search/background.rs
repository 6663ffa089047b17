//! Background color estimation for a candidate region

use image::{Rgba, RgbaImage};

use super::types::{MaskRole, NO_BACKGROUND, Origin, Pixel};

/// Mean color of the image pixels lying under the mask's black pixels.
///
/// The region `origin .. origin + mask.dimensions()` must lie inside `image`;
/// the search loop bounds guarantee this. Channels are averaged with
/// truncating integer division and alpha is always 0. A mask without any
/// black pixel yields [`NO_BACKGROUND`] (transparent black).
///
/// # Panics
/// If the region extends past the image bounds.
pub fn estimate_background(image: &RgbaImage, mask: &RgbaImage, origin: Origin) -> Pixel {
    let mut sums = [0u64; 3];
    let mut count = 0u64;

    for (mask_col, mask_row, mask_pixel) in mask.enumerate_pixels() {
        if MaskRole::of(mask_pixel) != MaskRole::Foreground {
            continue;
        }
        let sample = image.get_pixel(origin.col + mask_col, origin.row + mask_row);
        for (sum, &channel) in sums.iter_mut().zip(&sample.0[..3]) {
            *sum += u64::from(channel);
        }
        count += 1;
    }

    if count == 0 {
        return NO_BACKGROUND;
    }

    let [red, green, blue] = sums.map(|sum| (sum / count) as u8);
    Rgba([red, green, blue, 0])
}

/// Number of black pixels in the mask, i.e. how many samples feed each
/// background estimate.
pub fn foreground_pixel_count(mask: &RgbaImage) -> usize {
    mask.pixels()
        .filter(|pixel| MaskRole::of(pixel) == MaskRole::Foreground)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask_search::types::{BLACK, WHITE};

    #[test]
    fn test_no_black_pixels_gives_transparent_black() {
        let image = RgbaImage::from_pixel(5, 5, Rgba([200, 100, 50, 255]));
        let mask = RgbaImage::from_pixel(2, 2, WHITE);

        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(
                    estimate_background(&image, &mask, Origin::new(row, col)),
                    Rgba([0, 0, 0, 0])
                );
            }
        }
    }

    #[test]
    fn test_averages_only_under_black() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([10, 20, 30, 255]));
        image.put_pixel(2, 1, Rgba([11, 21, 31, 255]));
        image.put_pixel(1, 2, Rgba([250, 250, 250, 255]));

        // Top row of the mask is black, bottom row white
        let mut mask = RgbaImage::from_pixel(2, 2, WHITE);
        mask.put_pixel(0, 0, BLACK);
        mask.put_pixel(1, 0, BLACK);

        // (10 + 11) / 2 = 10, (20 + 21) / 2 = 20, (30 + 31) / 2 = 30: truncated
        let background = estimate_background(&image, &mask, Origin::new(1, 1));
        assert_eq!(background, Rgba([10, 20, 30, 0]));
    }

    #[test]
    fn test_unrecognized_mask_pixels_are_not_sampled() {
        let image = RgbaImage::from_pixel(3, 3, Rgba([90, 90, 90, 255]));
        let mut mask = RgbaImage::from_pixel(1, 2, Rgba([0, 0, 0, 128]));
        mask.put_pixel(0, 1, BLACK);

        let mut shifted = image.clone();
        shifted.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        // Only the black pixel at mask row 1 contributes, so (0, 0) is ignored
        assert_eq!(
            estimate_background(&shifted, &mask, Origin::new(0, 0)),
            Rgba([90, 90, 90, 0])
        );
    }

    #[test]
    fn test_foreground_pixel_count() {
        let mut mask = RgbaImage::from_pixel(3, 3, WHITE);
        assert_eq!(foreground_pixel_count(&mask), 0);
        mask.put_pixel(1, 1, BLACK);
        mask.put_pixel(2, 0, BLACK);
        assert_eq!(foreground_pixel_count(&mask), 2);
    }
}
