//! Backdrop preparation: aspect crop, resize, blur, darken.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Center crop | `DynamicImage::crop_imm` (rect from [`geometry::crop_rect`]) |
//! | Resize | `resize_exact` with `FilterType::Lanczos3` |
//! | Blur | `imageops::blur` (Gaussian, sigma 2.0) |
//! | Darken | uniform black at 80/255 alpha, standard "over" compositing |
//!
//! The output is always exactly [`CANVAS_WIDTH`]×[`CANVAS_HEIGHT`]; every
//! downstream centering computation assumes that.

use super::{BLUR_SIGMA, CANVAS_HEIGHT, CANVAS_WIDTH, OVERLAY_ALPHA, geometry};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage, imageops};

/// Center-crop `img` to the given aspect ratio.
///
/// Always succeeds for positive, non-degenerate dimensions; zero-dimension
/// input is a caller contract violation (see [`geometry::crop_rect`]).
pub fn crop_to_aspect(img: &DynamicImage, aspect: (f64, f64)) -> DynamicImage {
    let (x, y, w, h) = geometry::crop_rect((img.width(), img.height()), aspect);
    img.crop_imm(x, y, w, h)
}

/// Produce the caption-ready backdrop on the fixed output canvas.
///
/// Resizes to exactly 1000×350 with a Lanczos kernel (quality matters on the
/// downscale), blurs to cut visual noise behind the text, then darkens with
/// a translucent black layer.
pub fn compose_backdrop(img: &DynamicImage) -> RgbaImage {
    let resized = img.resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Lanczos3);
    let mut canvas = imageops::blur(&resized.to_rgba8(), BLUR_SIGMA);
    darken(&mut canvas, OVERLAY_ALPHA);
    canvas
}

/// Composite a uniform black layer of the given alpha over an opaque image.
///
/// "Over" against black reduces to scaling each channel by `(255 - alpha)`.
fn darken(img: &mut RgbaImage, alpha: u8) {
    let keep = 255 - alpha as u32;
    for px in img.pixels_mut() {
        for channel in &mut px.0[..3] {
            *channel = ((*channel as u32 * keep) / 255) as u8;
        }
    }
}
