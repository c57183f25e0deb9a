//! Tapered (Tukey) window.

use std::f64::consts::PI;

/// Default fraction of the window spent tapering (split across both ends).
pub const DEFAULT_TAPER_FRACTION: f64 = 0.1;

/// Symmetric Tukey (tapered cosine) window of length `n`.
///
/// `alpha` is the fraction of the window inside the cosine tapers: `0`
/// gives a rectangular window, `1` a Hann window. Values outside `[0, 1]`
/// are clamped.
///
/// # Examples
///
/// ```
/// use noisemaze::tukey_window;
///
/// let w = tukey_window(11, 0.5);
/// assert_eq!(w[0], 0.0);
/// assert_eq!(w[5], 1.0);
/// assert_eq!(w[10], 0.0);
/// ```
pub fn tukey_window(n: usize, alpha: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    if alpha == 0.0 {
        return vec![1.0; n];
    }

    let half = alpha / 2.0;
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let x = i as f64 / last;
            if x < half {
                0.5 * (1.0 + (2.0 * PI / alpha * (x - half)).cos())
            } else if x > 1.0 - half {
                0.5 * (1.0 + (2.0 * PI / alpha * (x - 1.0 + half)).cos())
            } else {
                1.0
            }
        })
        .collect()
}

/// Multiplies `values` by a Tukey window of matching length.
pub fn apply_taper(values: &[f64], alpha: f64) -> Vec<f64> {
    values
        .iter()
        .zip(tukey_window(values.len(), alpha))
        .map(|(v, w)| v * w)
        .collect()
}
