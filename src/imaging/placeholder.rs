use image::{Rgba, RgbaImage};
use super::fonts::draw_bitmap_text;

pub const PLACEHOLDER_FILL: Rgba<u8> = Rgba([230, 230, 230, 255]);
pub const PLACEHOLDER_INK: Rgba<u8> = Rgba([100, 100, 100, 255]);
pub const PLACEHOLDER_LABEL: &str = "no image";

/// Neutral stand-in for a picture that could not be fetched or decoded.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, PLACEHOLDER_FILL);
    let y = (height as i32 / 2) - 10;
    draw_bitmap_text(&mut img, 10, y, PLACEHOLDER_LABEL, PLACEHOLDER_INK, 1);
    img
}
