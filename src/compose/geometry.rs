//! Pure calculation functions for cropping, font sizing and centering.
//!
//! All functions here are pure and testable without any I/O or images.

use super::{CANVAS_HEIGHT, CANVAS_WIDTH, FIXED_FONT_SIZE, MAX_FONT_SIZE, TEXT_MARGIN, WRAP_WIDTH};

/// Calculate the centered crop rectangle for a target aspect ratio.
///
/// Compares the source aspect ratio to `aspect.0 / aspect.1`: a wider source
/// keeps its full height and crops width, a taller one keeps its full width
/// and crops height. Bounds are truncated to integer pixels, with any
/// off-by-one absorbed on the trailing edge.
///
/// Zero-dimension sources are an input contract violation; callers must not
/// pass them.
///
/// # Returns
/// * `(x, y, width, height)` of the crop rectangle
pub fn crop_rect(source: (u32, u32), aspect: (f64, f64)) -> (u32, u32, u32, u32) {
    let (src_w, src_h) = (source.0 as f64, source.1 as f64);
    let src_aspect = src_w / src_h;
    let target_aspect = aspect.0 / aspect.1;

    let (target_w, target_h) = if src_aspect > target_aspect {
        // Source is wider: keep full height, crop width
        (src_h * target_aspect, src_h)
    } else {
        // Source is taller: keep full width, crop height
        (src_w, src_w / target_aspect)
    };

    let x0 = (src_w - target_w) / 2.0;
    let y0 = (src_h - target_h) / 2.0;
    let x1 = x0 + target_w;
    let y1 = y0 + target_h;

    (
        x0 as u32,
        y0 as u32,
        x1 as u32 - x0 as u32,
        y1 as u32 - y0 as u32,
    )
}

/// Derive the font size in points from the caption's code-point count.
///
/// Two regimes with a deliberate discontinuity at [`WRAP_WIDTH`]:
/// - short captions (`count <= 15`) get `(1000 - 100) / count`, clamped to
///   150pt, so short text renders large;
/// - longer captions get a fixed 90pt and rely on line wrapping instead of
///   shrinking further.
///
/// An empty caption returns the fixed size as a sentinel; the wrapper already
/// produced zero lines, so the renderer never uses it.
pub fn font_size(codepoint_count: usize) -> f32 {
    if codepoint_count == 0 {
        return FIXED_FONT_SIZE;
    }
    if codepoint_count <= WRAP_WIDTH {
        let base = (CANVAS_WIDTH - TEXT_MARGIN) as f32 / codepoint_count as f32;
        base.min(MAX_FONT_SIZE)
    } else {
        FIXED_FONT_SIZE
    }
}

/// Horizontal start for an individually centered line of the given width.
pub fn line_start_x(line_width: i32) -> i32 {
    (CANVAS_WIDTH as i32 - line_width) / 2
}

/// Baseline of line `index` in a vertically centered block.
///
/// The block of `line_count * line_advance` pixels is centered on the canvas,
/// and the first baseline sits one `line_advance` below the block top. That
/// extra advance is behavior-compatible with the original layout and is
/// pinned by the centering tests; do not "fix" it.
pub fn line_baseline(line_count: usize, line_advance: i32, index: usize) -> i32 {
    let block_height = line_count as i32 * line_advance;
    (CANVAS_HEIGHT as i32 - block_height) / 2 + line_advance + index as i32 * line_advance
}
