//! Square canvas framing.

use image::{imageops, Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Center `image` on a white square whose side is its longer dimension.
///
/// Content is never scaled. Offsets use floor division, so an odd margin
/// puts the extra pixel on the right/bottom. Square input is returned as is.
pub fn square_canvas(image: RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == height {
        return image;
    }

    let side = width.max(height);
    let mut canvas = RgbImage::from_pixel(side, side, WHITE);
    let x = (side - width) / 2;
    let y = (side - height) / 2;
    imageops::replace(&mut canvas, &image, i64::from(x), i64::from(y));
    canvas
}
