//! Image composition and text layout: the deterministic core.
//!
//! | Operation | Where |
//! |---|---|
//! | **Aspect crop** | [`backdrop::crop_to_aspect`] (rect math in [`geometry`]) |
//! | **Backdrop** | [`backdrop::compose_backdrop`]: Lanczos3 resize + blur + darken |
//! | **Word wrap** | [`wrap::wrap_caption`], code-point based |
//! | **Font sizing** | [`geometry::font_size`], two-regime with a hard threshold |
//! | **Text layout** | [`text::plan_layout`] → [`RenderPlan`] |
//! | **Rendering** | [`text::draw_caption`]: shadow pass, then foreground pass |
//!
//! The module is split into:
//! - **Geometry**: pure functions for crop rects, font sizing and centering
//!   (unit testable, no pixels involved)
//! - **Wrap**: the greedy line breaker
//! - **Backdrop**: pixel work producing the fixed 1000×350 canvas
//! - **Text**: the [`CaptionFont`] seam, the TTF implementation, and the
//!   two-pass caption renderer

pub mod backdrop;
pub mod geometry;
pub mod text;
pub mod wrap;

pub use backdrop::{compose_backdrop, crop_to_aspect};
pub use geometry::font_size;
pub use text::{CaptionFont, LinePlacement, RenderPlan, TextError, TtfFont, draw_caption, plan_layout};
pub use wrap::wrap_caption;

use image::{DynamicImage, RgbaImage};

/// Output canvas width. Every centering computation assumes it.
pub const CANVAS_WIDTH: u32 = 1000;
/// Output canvas height.
pub const CANVAS_HEIGHT: u32 = 350;
/// Aspect ratio the background is cropped to before resizing; only the
/// quotient matters.
pub const POSTER_ASPECT: (f64, f64) = (1.0, 0.35);
/// Horizontal margin subtracted from the canvas before dividing by caption
/// length in the short-caption font-size formula.
pub const TEXT_MARGIN: u32 = 100;
/// Upper clamp for short captions.
pub const MAX_FONT_SIZE: f32 = 150.0;
/// Fixed size for captions longer than [`WRAP_WIDTH`] code points; they rely
/// on wrapping instead of shrinking further.
pub const FIXED_FONT_SIZE: f32 = 90.0;
/// Maximum code points per wrapped line.
pub const WRAP_WIDTH: usize = 15;
/// Gaussian blur sigma applied to the resized background.
pub const BLUR_SIGMA: f32 = 2.0;
/// Alpha of the uniform black layer composited over the blurred background.
pub const OVERLAY_ALPHA: u8 = 80;

/// Run the full composition core on an already-acquired background.
///
/// Crops to [`POSTER_ASPECT`], builds the darkened backdrop, wraps and sizes
/// the caption, and draws it in two passes. The caption is measured in code
/// points throughout; an empty caption yields the bare backdrop.
pub fn make_poster(
    background: &DynamicImage,
    caption: &str,
    font: &impl CaptionFont,
) -> Result<RgbaImage, TextError> {
    let cropped = crop_to_aspect(background, POSTER_ASPECT);
    let mut canvas = compose_backdrop(&cropped);

    let lines = wrap_caption(caption, WRAP_WIDTH);
    let size = font_size(caption.chars().count());
    let plan = plan_layout(&lines, font, size)?;
    draw_caption(&mut canvas, &plan, font)?;

    Ok(canvas)
}
