//! Caption rendering: the font seam, layout planning, and the two draw passes.
//!
//! The renderer talks to fonts only through [`CaptionFont`], which is exactly
//! the three things layout needs: a line height, a line width, and a draw at
//! a baseline. The production implementation is [`TtfFont`] (rusttype); tests
//! use a fixed-advance mock so layout laws are checked deterministically.
//!
//! Layout is computed once into a [`RenderPlan`] and consumed twice: a shadow
//! pass in solid black offset by [`SHADOW_OFFSET`], then a foreground pass in
//! solid white. Every shadow draw happens before any foreground draw, so the
//! foreground always sits on top.

use super::geometry;
use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use std::path::Path;
use thiserror::Error;

/// Diagonal offset of the shadow pass, in pixels.
pub const SHADOW_OFFSET: (i32, i32) = (2, 2);

const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Error, Debug)]
pub enum TextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font could not be parsed: {0}")]
    BadFont(String),
    #[error("Failed to draw text: {0}")]
    DrawFailed(String),
}

/// The narrow interface the renderer needs from a font resource.
///
/// Measurement must be pure: [`line_width`](CaptionFont::line_width) produces
/// no visible pixels. A measurement or draw failure is fatal to the whole
/// render; there is no partial-text fallback.
pub trait CaptionFont {
    /// Nominal line height (ascent minus descent) at `size`, rounded to
    /// whole pixels. Used as the vertical pitch between baselines.
    fn line_advance(&self, size: f32) -> i32;

    /// Horizontal advance of `text` at `size`, in whole pixels.
    fn line_width(&self, text: &str, size: f32) -> Result<i32, TextError>;

    /// Draw `text` at `size` with its baseline origin at `(x, baseline)`.
    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: f32,
        x: i32,
        baseline: i32,
        color: Rgba<u8>,
    ) -> Result<(), TextError>;
}

/// Production font backed by a TTF file, via rusttype.
pub struct TtfFont {
    font: Font<'static>,
}

impl TtfFont {
    /// Parse a font from raw TTF bytes. Empty or malformed data is fatal.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TextError> {
        if bytes.is_empty() {
            return Err(TextError::BadFont("font file is empty".to_string()));
        }
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| TextError::BadFont("not a usable TTF/OTF".to_string()))?;
        Ok(Self { font })
    }

    /// Read and parse a font file from disk.
    pub fn from_file(path: &Path) -> Result<Self, TextError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes).map_err(|e| match e {
            TextError::BadFont(msg) => TextError::BadFont(format!("{}: {msg}", path.display())),
            other => other,
        })
    }
}

impl CaptionFont for TtfFont {
    fn line_advance(&self, size: f32) -> i32 {
        let v = self.font.v_metrics(Scale::uniform(size));
        (v.ascent - v.descent).round() as i32
    }

    fn line_width(&self, text: &str, size: f32) -> Result<i32, TextError> {
        let scale = Scale::uniform(size);
        let mut width = 0.0f32;
        let mut last = None;
        for ch in text.chars() {
            let glyph = self.font.glyph(ch).scaled(scale);
            if let Some(prev) = last {
                width += self.font.pair_kerning(scale, prev, glyph.id());
            }
            width += glyph.h_metrics().advance_width;
            last = Some(glyph.id());
        }
        Ok(width.round() as i32)
    }

    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: f32,
        x: i32,
        baseline: i32,
        color: Rgba<u8>,
    ) -> Result<(), TextError> {
        let scale = Scale::uniform(size);
        let (canvas_w, canvas_h) = (canvas.width() as i32, canvas.height() as i32);

        for glyph in self
            .font
            .layout(text, scale, point(x as f32, baseline as f32))
        {
            let Some(bb) = glyph.pixel_bounding_box() else {
                // Whitespace and zero-extent glyphs advance but paint nothing
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px >= canvas_w || py >= canvas_h {
                    return;
                }
                blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
        Ok(())
    }
}

/// Alpha-blend `color` into `dst` at the glyph's coverage value.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a == 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv) as u8;
    }
    dst.0[3] = 255;
}

/// One line's resolved position: individually centered, baseline placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlacement {
    pub text: String,
    pub x: i32,
    pub baseline: i32,
}

/// The per-render derived layout, computed once and drawn twice.
///
/// Both passes use identical values; the shadow pass only adds
/// [`SHADOW_OFFSET`] and swaps the color.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub font_size: f32,
    pub line_advance: i32,
    pub lines: Vec<LinePlacement>,
}

/// Lay out wrapped lines on the fixed canvas.
///
/// Each line is centered independently (not block-centered to the widest
/// line); the block as a whole is centered vertically, with the first
/// baseline one line advance below the block top (see
/// [`geometry::line_baseline`]). Zero lines produce an empty plan.
pub fn plan_layout(
    lines: &[String],
    font: &impl CaptionFont,
    font_size: f32,
) -> Result<RenderPlan, TextError> {
    let line_advance = font.line_advance(font_size);
    let mut placements = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let width = font.line_width(line, font_size)?;
        placements.push(LinePlacement {
            text: line.clone(),
            x: geometry::line_start_x(width),
            baseline: geometry::line_baseline(lines.len(), line_advance, i),
        });
    }

    Ok(RenderPlan {
        font_size,
        line_advance,
        lines: placements,
    })
}

/// Draw the planned caption onto `canvas`: all shadow lines first, then all
/// foreground lines. A draw failure aborts immediately.
pub fn draw_caption(
    canvas: &mut RgbaImage,
    plan: &RenderPlan,
    font: &impl CaptionFont,
) -> Result<(), TextError> {
    let (dx, dy) = SHADOW_OFFSET;

    for line in &plan.lines {
        font.draw_line(
            canvas,
            &line.text,
            plan.font_size,
            line.x + dx,
            line.baseline + dy,
            SHADOW_COLOR,
        )?;
    }
    for line in &plan.lines {
        font.draw_line(
            canvas,
            &line.text,
            plan.font_size,
            line.x,
            line.baseline,
            TEXT_COLOR,
        )?;
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock font with a fixed per-code-point advance that records every draw
    /// instead of painting. Mutex keeps it usable behind shared references.
    pub struct MockFont {
        pub char_advance: f32,
        pub draws: Mutex<Vec<RecordedDraw>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedDraw {
        pub text: String,
        pub x: i32,
        pub baseline: i32,
        pub color: [u8; 4],
    }

    impl MockFont {
        pub fn new(char_advance: f32) -> Self {
            Self {
                char_advance,
                draws: Mutex::new(Vec::new()),
            }
        }

        pub fn recorded(&self) -> Vec<RecordedDraw> {
            self.draws.lock().unwrap().clone()
        }
    }

    impl CaptionFont for MockFont {
        fn line_advance(&self, size: f32) -> i32 {
            size.round() as i32
        }

        fn line_width(&self, text: &str, _size: f32) -> Result<i32, TextError> {
            Ok((text.chars().count() as f32 * self.char_advance).round() as i32)
        }

        fn draw_line(
            &self,
            _canvas: &mut RgbaImage,
            text: &str,
            _size: f32,
            x: i32,
            baseline: i32,
            color: Rgba<u8>,
        ) -> Result<(), TextError> {
            self.draws.lock().unwrap().push(RecordedDraw {
                text: text.to_string(),
                x,
                baseline,
                color: color.0,
            });
            Ok(())
        }
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_line_is_horizontally_centered() {
        let font = MockFont::new(40.0);
        let plan = plan_layout(&lines(&["Hello World"]), &font, 80.0).unwrap();

        let placement = &plan.lines[0];
        let width = font.line_width("Hello World", 80.0).unwrap();
        let center = placement.x + width / 2;
        assert!((center - 500).abs() <= 1, "center {center}");
    }

    #[test]
    fn lines_are_centered_independently() {
        let font = MockFont::new(10.0);
        let plan = plan_layout(&lines(&["wide wide wide", "thin"]), &font, 90.0).unwrap();

        // 14 chars at 10px vs 4 chars at 10px
        assert_eq!(plan.lines[0].x, (1000 - 140) / 2);
        assert_eq!(plan.lines[1].x, (1000 - 40) / 2);
    }

    #[test]
    fn baselines_use_block_centering_with_leading_advance() {
        let font = MockFont::new(10.0);
        let plan = plan_layout(&lines(&["one", "two"]), &font, 90.0).unwrap();

        assert_eq!(plan.line_advance, 90);
        // Block = 180, top = (350-180)/2 = 85, first baseline 85+90
        assert_eq!(plan.lines[0].baseline, 175);
        assert_eq!(plan.lines[1].baseline, 265);
    }

    #[test]
    fn empty_plan_draws_nothing() {
        let font = MockFont::new(10.0);
        let plan = plan_layout(&[], &font, 90.0).unwrap();
        assert!(plan.lines.is_empty());

        let mut canvas = RgbaImage::new(10, 10);
        draw_caption(&mut canvas, &plan, &font).unwrap();
        assert!(font.recorded().is_empty());
    }

    #[test]
    fn shadow_pass_precedes_foreground_and_offsets_by_two() {
        let font = MockFont::new(10.0);
        let plan = plan_layout(&lines(&["one", "two"]), &font, 90.0).unwrap();

        let mut canvas = RgbaImage::new(1000, 350);
        draw_caption(&mut canvas, &plan, &font).unwrap();

        let draws = font.recorded();
        assert_eq!(draws.len(), 4);

        // First the two black shadow draws, then the two white foreground draws
        for (shadow, fg) in draws[..2].iter().zip(&draws[2..]) {
            assert_eq!(shadow.color, [0, 0, 0, 255]);
            assert_eq!(fg.color, [255, 255, 255, 255]);
            assert_eq!(shadow.text, fg.text);
            assert_eq!(shadow.x, fg.x + 2);
            assert_eq!(shadow.baseline, fg.baseline + 2);
        }
    }

    #[test]
    fn both_passes_share_one_plan() {
        let font = MockFont::new(12.0);
        let plan = plan_layout(&lines(&["alpha", "beta", "gamma"]), &font, 60.0).unwrap();

        let mut canvas = RgbaImage::new(1000, 350);
        draw_caption(&mut canvas, &plan, &font).unwrap();

        let draws = font.recorded();
        let (shadow, fg) = draws.split_at(3);
        for (s, f) in shadow.iter().zip(fg) {
            // Identical geometry modulo the fixed translation
            assert_eq!((s.x - f.x, s.baseline - f.baseline), (2, 2));
        }
    }

    #[test]
    fn empty_font_bytes_are_rejected() {
        assert!(matches!(
            TtfFont::from_bytes(Vec::new()),
            Err(TextError::BadFont(_))
        ));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(matches!(
            TtfFont::from_bytes(vec![0u8; 64]),
            Err(TextError::BadFont(_))
        ));
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        assert!(matches!(
            TtfFont::from_file(Path::new("/nonexistent/font.ttf")),
            Err(TextError::Io(_))
        ));
    }

    #[test]
    fn blend_full_coverage_replaces_color() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend(&mut dst, Rgba([255, 255, 255, 255]), 1.0);
        assert_eq!(dst, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn blend_zero_coverage_is_a_no_op() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend(&mut dst, Rgba([255, 255, 255, 255]), 0.0);
        assert_eq!(dst, Rgba([10, 20, 30, 255]));
    }
}
