//! What a block displays, and how much room that takes.
//!
//! A block shows either a line of plain text or a small formula made of a
//! base with a top and a bottom exponent (`E` with `n` above and `x` below).
//! [`BlockContent::measure`] turns either kind into the content bounds that
//! the block's footprint is derived from.
//!
//! # Formula layout
//!
//! ```text
//!  ┌──────┬───┐
//!  │      │ n │  top exponent, scaled by SCRIPT_SCALE
//!  │  E   ├───┤
//!  │      │ x │  bottom exponent, scaled by SCRIPT_SCALE
//!  └──────┴───┘
//! ```
//!
//! The exponents are stacked in one column to the right of the base.

use crate::{
    geometry::{Bounds, Point},
    text::TextMeasure,
};

/// Scale applied to exponent text relative to the base.
pub const SCRIPT_SCALE: f32 = 0.6;

/// The content displayed on a block.
///
/// # Examples
///
/// ```
/// # use slotmatch_core::content::BlockContent;
/// # use slotmatch_core::text::FixedAdvanceMeasure;
/// let measure = FixedAdvanceMeasure::new(1.0, 1.0);
///
/// let label = BlockContent::plain_text("sin");
/// assert_eq!(label.measure(&measure).width(), 3.0);
///
/// let formula = BlockContent::formula("E", "n", "x");
/// let bounds = formula.measure(&measure);
/// assert!(bounds.width() > 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// A single string, possibly spanning several lines.
    PlainText(String),
    /// A base with a top and a bottom exponent.
    Formula {
        base: String,
        top_exponent: String,
        bottom_exponent: String,
    },
}

impl BlockContent {
    /// Creates plain text content.
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self::PlainText(content.into())
    }

    /// Creates formula content.
    pub fn formula(
        base: impl Into<String>,
        top_exponent: impl Into<String>,
        bottom_exponent: impl Into<String>,
    ) -> Self {
        Self::Formula {
            base: base.into(),
            top_exponent: top_exponent.into(),
            bottom_exponent: bottom_exponent.into(),
        }
    }

    /// Returns `true` if the block shows a formula.
    pub fn is_formula(&self) -> bool {
        matches!(self, Self::Formula { .. })
    }

    /// A flat, single-line rendering of the content for logs and debugging.
    ///
    /// Formulas render as `base^top_bottom`; empty exponents are omitted.
    pub fn display_text(&self) -> String {
        match self {
            Self::PlainText(content) => content.clone(),
            Self::Formula {
                base,
                top_exponent,
                bottom_exponent,
            } => {
                let mut text = base.clone();
                if !top_exponent.is_empty() {
                    text.push('^');
                    text.push_str(top_exponent);
                }
                if !bottom_exponent.is_empty() {
                    text.push('_');
                    text.push_str(bottom_exponent);
                }
                text
            }
        }
    }

    /// Measures the content, returning bounds anchored at the origin.
    pub fn measure(&self, measure: &impl TextMeasure) -> Bounds {
        let size = match self {
            Self::PlainText(content) => measure.measure_text_bounds(content).to_size(),
            Self::Formula {
                base,
                top_exponent,
                bottom_exponent,
            } => {
                let base = measure.measure_text_bounds(base).to_size();
                let top = measure
                    .measure_text_bounds(top_exponent)
                    .to_size()
                    .scale(SCRIPT_SCALE);
                let bottom = measure
                    .measure_text_bounds(bottom_exponent)
                    .to_size()
                    .scale(SCRIPT_SCALE);
                base.merge_horizontal(top.merge_vertical(bottom))
            }
        };
        Bounds::new_from_top_left(Point::default(), size)
    }
}

impl Default for BlockContent {
    fn default() -> Self {
        Self::PlainText(String::new())
    }
}

impl From<&str> for BlockContent {
    fn from(content: &str) -> Self {
        Self::plain_text(content)
    }
}

impl From<String> for BlockContent {
    fn from(content: String) -> Self {
        Self::PlainText(content)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{geometry::Size, text::FixedAdvanceMeasure};

    fn measured_size(content: &BlockContent, measure: &FixedAdvanceMeasure) -> Size {
        content.measure(measure).to_size()
    }

    fn unit_measure() -> FixedAdvanceMeasure {
        FixedAdvanceMeasure::new(1.0, 1.0)
    }

    #[test]
    fn test_plain_text_measure() {
        let content = BlockContent::plain_text("hello");
        let bounds = content.measure(&unit_measure());
        assert_eq!(bounds.min_point(), Point::default());
        assert_approx_eq!(f32, bounds.width(), 5.0);
        assert_approx_eq!(f32, bounds.height(), 1.0);
    }

    #[test]
    fn test_formula_measure_stacks_exponents() {
        // base 2x1, exponents 3x1 and 1x1 scaled by 0.6
        let content = BlockContent::formula("AB", "xyz", "k");
        let size = measured_size(&content, &unit_measure());
        assert_approx_eq!(f32, size.width(), 2.0 + 3.0 * SCRIPT_SCALE);
        assert_approx_eq!(f32, size.height(), 2.0 * SCRIPT_SCALE);
    }

    #[test]
    fn test_formula_height_never_below_base() {
        let measure = FixedAdvanceMeasure::new(1.0, 2.0);
        let content = BlockContent::formula("E", "n", "");
        let size = measured_size(&content, &measure);
        assert_approx_eq!(f32, size.height(), 2.0);
        assert_approx_eq!(f32, size.width(), 1.0 + SCRIPT_SCALE);
    }

    #[test]
    fn test_empty_content_is_zero_sized() {
        let size = measured_size(&BlockContent::default(), &unit_measure());
        assert!(size.is_zero());
        let size = measured_size(&BlockContent::formula("", "", ""), &unit_measure());
        assert!(size.is_zero());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(BlockContent::plain_text("sin").display_text(), "sin");
        assert_eq!(BlockContent::formula("E", "n", "x").display_text(), "E^n_x");
        assert_eq!(BlockContent::formula("E", "", "x").display_text(), "E_x");
        assert_eq!(BlockContent::formula("E", "", "").display_text(), "E");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(BlockContent::from("a"), BlockContent::plain_text("a"));
        assert_eq!(
            BlockContent::from(String::from("b")),
            BlockContent::PlainText("b".to_string())
        );
        assert!(BlockContent::formula("E", "n", "x").is_formula());
        assert!(!BlockContent::plain_text("E").is_formula());
    }
}
