//! # titlecard
//!
//! Renders a single captioned poster image: a background photograph is
//! cropped to a fixed aspect ratio, blurred, darkened, and a caption is
//! drawn centered on top with automatic word-wrapping, dynamic font sizing,
//! and a drop shadow.
//!
//! # Architecture: One Pass, Five Stages
//!
//! ```text
//! 1. Acquire    picsum.photos or --image-dir  →  background raster
//! 2. Crop       background                    →  1 : 0.35 aspect, centered
//! 3. Backdrop   Lanczos3 resize → blur → darken  (fixed 1000×350 canvas)
//! 4. Layout     caption → wrapped lines + font size + render plan
//! 5. Render     shadow pass, then foreground pass, then PNG/JPEG encode
//! ```
//!
//! Every stage owns its input and hands a fresh raster to the next one;
//! nothing is shared and nothing persists between runs. The only
//! nondeterministic pieces (which background gets picked, and the network)
//! live in [`source`] behind a narrow boundary, so the composition core is
//! fully deterministic given a fixture image and a font.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compose`] | The composition core: cropping, backdrop, word-wrap, font sizing, two-pass text rendering |
//! | [`source`] | Background acquisition: remote stock-photo fetch with retries, or largest-file directory scan |
//! | [`encode`] | Writes the final raster to PNG or JPEG, inferring the format from the output extension |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! All pixel work goes through the `image` crate (Lanczos3 resampling,
//! Gaussian blur) and `rusttype` (glyph metrics and rasterization). No
//! ImageMagick, no system freetype: the binary is fully self-contained.
//!
//! ## Fonts Behind a Trait
//!
//! The renderer only ever talks to a font through
//! [`compose::CaptionFont`]: measure a line, measure the line height, draw
//! at a baseline. Production uses a TTF file via `rusttype`; tests use a
//! fixed-advance mock, so every layout law (centering, shadow offset, line
//! pitch) is checked without shipping a font binary in the repo.
//!
//! ## Compute Once, Draw Twice
//!
//! Shadow and foreground are the same geometry. The layout is computed once
//! into a [`compose::RenderPlan`] and consumed by both passes; the only
//! difference between them is a (2, 2) translation and the color.

pub mod compose;
pub mod encode;
pub mod source;
