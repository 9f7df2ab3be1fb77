//! Pure calculation functions for thumbnail dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::types::Dimensions;

/// Why a source cannot be scaled to the row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleError {
    /// Source height is zero; the aspect ratio is undefined.
    ZeroHeight,
    /// Truncation leaves no columns (source far taller than wide).
    ZeroWidth,
    /// Scaled width does not fit in `u32`.
    Overflow,
}

/// Scale `original` to exactly `row_height` pixels tall, preserving aspect.
///
/// The width is `floor(width * row_height / height)`. It truncates rather
/// than rounds, so the width the layout packs is always the width the engine
/// resizes to. The product is taken in `u64` so large sources cannot wrap.
///
/// # Examples
/// ```
/// # use thumbstrip::imaging::scale_to_row_height;
/// # use thumbstrip::types::Dimensions;
/// // 800x600 at a 28px row → 37.33… → 37
/// let thumb = scale_to_row_height(Dimensions::new(800, 600), 28).unwrap();
/// assert_eq!(thumb, Dimensions::new(37, 28));
/// ```
pub fn scale_to_row_height(original: Dimensions, row_height: u32) -> Result<Dimensions, ScaleError> {
    if original.height == 0 {
        return Err(ScaleError::ZeroHeight);
    }
    let width = u64::from(original.width) * u64::from(row_height) / u64::from(original.height);
    let width = u32::try_from(width).map_err(|_| ScaleError::Overflow)?;
    if width == 0 {
        return Err(ScaleError::ZeroWidth);
    }
    Ok(Dimensions::new(width, row_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(width: u32, height: u32, row_height: u32) -> Result<Dimensions, ScaleError> {
        scale_to_row_height(Dimensions::new(width, height), row_height)
    }

    #[test]
    fn landscape_truncates() {
        // 800 * 28 / 600 = 37.33
        assert_eq!(scaled(800, 600, 28), Ok(Dimensions::new(37, 28)));
    }

    #[test]
    fn truncates_where_rounding_would_round_up() {
        // 1000 * 28 / 600 = 46.67 → 46, not 47
        assert_eq!(scaled(1000, 600, 28), Ok(Dimensions::new(46, 28)));
        // 299 * 100 / 200 = 149.5 → 149, not 150
        assert_eq!(scaled(299, 200, 100), Ok(Dimensions::new(149, 100)));
    }

    #[test]
    fn exact_division_is_unchanged() {
        assert_eq!(scaled(600, 56, 28), Ok(Dimensions::new(300, 28)));
        assert_eq!(scaled(28, 28, 28), Ok(Dimensions::new(28, 28)));
    }

    #[test]
    fn matches_integer_formula_across_triples() {
        let triples = [
            (640, 480, 28),
            (1920, 1080, 28),
            (3, 7, 28),
            (4000, 3000, 100),
            (1, 1, 1),
            (12345, 678, 91),
            (333, 1000, 64),
        ];
        for (w, h, row) in triples {
            let expected = (w as u64 * row as u64 / h as u64) as u32;
            assert_eq!(
                scaled(w, h, row).unwrap().width,
                expected,
                "{w}x{h} at {row}"
            );
        }
    }

    #[test]
    fn upscales_small_sources() {
        assert_eq!(scaled(10, 7, 28), Ok(Dimensions::new(40, 28)));
    }

    #[test]
    fn zero_height_is_rejected_before_dividing() {
        assert_eq!(scaled(100, 0, 28), Err(ScaleError::ZeroHeight));
    }

    #[test]
    fn very_tall_source_collapses_to_zero_width() {
        // 1 * 28 / 100 = 0.28
        assert_eq!(scaled(1, 100, 28), Err(ScaleError::ZeroWidth));
    }

    #[test]
    fn overflowing_width_is_rejected() {
        assert_eq!(scaled(u32::MAX, 1, 2), Err(ScaleError::Overflow));
    }

    #[test]
    fn product_does_not_wrap_in_u32() {
        // 100_000 * 50_000 overflows u32 but the quotient fits.
        assert_eq!(
            scaled(100_000, 100_000, 50_000),
            Ok(Dimensions::new(50_000, 50_000))
        );
    }
}
