//! HALF_UP rounding of averages.
//!
//! Rounding works on the shortest decimal representation of the value
//! (what `f64::to_string` prints), not on its binary expansion. `2.675` is
//! stored as `2.67499999...` but prints as `2.675`, so it rounds to `2.68`.

/// Rounds `value` to `scale` fractional digits, ties away from zero.
///
/// NaN and infinities pass through unchanged. A result of zero is always
/// `0.0`, never `-0.0`.
pub fn round_half_up(value: f64, scale: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        return 0.0;
    }

    // Display for f64 never uses exponent notation.
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    if frac_part.len() <= scale {
        return value;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(scale))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes()[scale] >= b'5' {
        carry_one(&mut digits);
    }

    let split = digits.len() - scale;
    let mut text: String = digits[..split].iter().map(|d| char::from(b'0' + d)).collect();
    if scale > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }

    let magnitude: f64 = match text.parse() {
        Ok(m) => m,
        Err(_) => return value,
    };

    if magnitude == 0.0 {
        0.0
    } else if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Adds one unit in the last place of a big-endian decimal digit string.
fn carry_one(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
