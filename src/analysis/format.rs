//! Double-to-text rendering for averages.
//!
//! Averages are shown the way a JVM dataframe engine casts a double to a
//! string: integral values keep a `.0`, and magnitudes outside
//! `[1e-3, 1e7)` switch to `E` notation.

/// Renders an average for the combined result column.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let s = value.to_string();
        if s.contains('.') { s } else { format!("{}.0", s) }
    } else {
        // LowerExp prints the shortest mantissa, e.g. "1.5e7" or "1e-4".
        let s = format!("{:e}", value);
        match s.split_once('e') {
            Some((mantissa, exponent)) if mantissa.contains('.') => {
                format!("{}E{}", mantissa, exponent)
            }
            Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
            None => s,
        }
    }
}
