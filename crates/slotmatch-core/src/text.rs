//! Text measurement for block labels.
//!
//! Blocks size themselves from the text they display, so the engine needs
//! one capability from the text stack: given a string, how much room does it
//! take. That capability is the [`TextMeasure`] trait; the engine never
//! shapes or renders text itself.
//!
//! # Overview
//!
//! - [`TextMeasure`] - The measurement boundary consumed by the engine
//! - [`TextStyle`] - Font settings used by [`CosmicTextMeasure`]
//! - [`CosmicTextMeasure`] - Measures with real font metrics via cosmic-text
//! - [`FixedAdvanceMeasure`] - A deterministic measurer for headless hosts and tests
//!
//! # Quick Start
//!
//! ```
//! # use slotmatch_core::text::{FixedAdvanceMeasure, TextMeasure};
//! let measure = FixedAdvanceMeasure::new(0.5, 1.0);
//! let bounds = measure.measure_text_bounds("x+y");
//! assert_eq!(bounds.width(), 1.5);
//! assert_eq!(bounds.height(), 1.0);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, trace};

use crate::geometry::{Bounds, Point, Size};

/// Shared font system; building one scans the system fonts, so it is done once.
static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

/// Measures the extent of a piece of text in world units.
///
/// Implementations must be pure: the same content always yields the same
/// bounds, which is what makes footprint recomputation idempotent.
pub trait TextMeasure {
    /// Returns the bounds of `content`, with the top-left corner at the origin.
    ///
    /// Empty content measures as zero-sized bounds.
    fn measure_text_bounds(&self, content: &str) -> Bounds;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text_bounds(&self, content: &str) -> Bounds {
        (**self).measure_text_bounds(content)
    }
}

/// Font settings for [`CosmicTextMeasure`].
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `24` points |
/// | World scale | `0.01` world units per pixel |
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    font_size: u16,
    world_scale: f32,
}

impl TextStyle {
    /// Creates a text style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font family (e.g. "Arial", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets how many world units one rendered pixel spans.
    pub fn set_world_scale(&mut self, scale: f32) {
        self.world_scale = scale;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn world_scale(&self) -> f32 {
        self.world_scale
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 24,
            world_scale: 0.01,
        }
    }
}

/// Measures text with real font metrics and shaping from cosmic-text.
///
/// All instances share one lazily created [`FontSystem`].
#[derive(Debug, Clone, Default)]
pub struct CosmicTextMeasure {
    style: TextStyle,
}

impl CosmicTextMeasure {
    /// Creates a measurer using the given style.
    pub fn new(style: TextStyle) -> Self {
        Self { style }
    }

    /// Returns the style used for measurement.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Measures `text` in pixels.
    ///
    /// Ligatures, kerning and multi-line content are handled by the shaper.
    /// When shaping yields no glyphs (for instance when no font is installed)
    /// the width is estimated from the character count instead.
    fn measure_pixels(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = FONT_SYSTEM
            .get_or_init(|| {
                info!("Initializing FontSystem");
                Mutex::new(FontSystem::new())
            })
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Points to pixels at standard DPI
        let font_size_px = self.style.font_size as f32 * 1.33;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.15);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(self.style.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        let line_count = text.lines().count().max(1);
        if max_width <= 0.0 {
            let longest = text
                .lines()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            max_width = longest as f32 * font_size_px * 0.55;
        }
        if total_height <= 0.0 {
            total_height = line_count as f32 * metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text_bounds(&self, content: &str) -> Bounds {
        let size = self.measure_pixels(content).scale(self.style.world_scale);
        trace!(content, width = size.width(), height = size.height(); "Measured text");
        Bounds::new_from_top_left(Point::default(), size)
    }
}

/// Measures text as a grid of equally sized characters.
///
/// Width is the longest line's character count times `advance`; height is
/// the number of lines times `line_height`. Useful wherever font files are
/// unavailable and for reproducible footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    advance: f32,
    line_height: f32,
}

impl FixedAdvanceMeasure {
    /// Creates a measurer with the given per-character advance and line height.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text_bounds(&self, content: &str) -> Bounds {
        let longest = content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = content.lines().count();
        let size = Size::new(
            longest as f32 * self.advance,
            lines as f32 * self.line_height,
        );
        Bounds::new_from_top_left(Point::default(), size)
    }
}
