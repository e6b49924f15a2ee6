//! Zero-guarded percentage helpers. Every ratio shown to the user goes
//! through these so a zero (or non-finite) denominator yields 0, never
//! NaN or infinity.

/// `part / whole × 100`, or 0 when `whole` is not a positive finite number.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 && whole.is_finite() && part.is_finite() {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

/// [`percent_of`] capped at 100.
pub fn capped_percent(part: f64, whole: f64) -> f64 {
    percent_of(part, whole).min(100.0)
}
