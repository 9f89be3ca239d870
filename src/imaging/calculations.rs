//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions when capping an image at `max_width`.
///
/// Images wider than `max_width` are scaled down uniformly to exactly
/// `max_width` wide; the height is rounded to the nearest pixel (never
/// below 1). Images already at or below the cap keep their dimensions;
/// this never upscales.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `max_width` - Width cap in pixels
///
/// # Returns
/// * `(width, height)` - Final output dimensions
///
/// # Examples
/// ```
/// # use photo_export::imaging::calculate_fit_width;
/// // 4000x3000 capped at 1920 → 1920x1440
/// assert_eq!(calculate_fit_width((4000, 3000), 1920), (1920, 1440));
///
/// // 1200x800 is already narrow enough → unchanged
/// assert_eq!(calculate_fit_width((1200, 800), 1920), (1200, 800));
/// ```
pub fn calculate_fit_width(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w <= max_width {
        return (src_w, src_h);
    }

    let ratio = max_width as f64 / src_w as f64;
    let h = (src_h as f64 * ratio).round() as u32;
    (max_width, h.max(1))
}
