//! Number text rendering.
//!
//! Two flavours exist: [`format_f64`] / [`format_f32`] produce JSON number
//! text for the serialization writer, [`literal_f64`] produces the compact
//! form quoted in coercion diagnostics (`129`, `1.1`, `3.40283e+38`).

/// Renders `f` as JSON number text.
///
/// Integral values below 1e15 are written without a fractional part. JSON has
/// no spelling for NaN or the infinities, so those become `null`.
pub fn format_f64(f: f64) -> String {
    if !f.is_finite() {
        "null".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        // Shortest round-trip representation, never in exponent form.
        format!("{}", f)
    }
}

/// Renders `f` as JSON number text using the shortest `f32` representation.
pub fn format_f32(f: f32) -> String {
    if !f.is_finite() {
        "null".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Renders `f` the way diagnostics quote a decoded number.
///
/// Magnitudes of at least 1e21 or below 1e-4 switch to exponent notation
/// with an explicit sign and at least two exponent digits.
///
/// # Examples
///
/// ```
/// use modelbind_util::number::literal_f64;
///
/// assert_eq!(literal_f64(129.0), "129");
/// assert_eq!(literal_f64(1.1), "1.1");
/// assert_eq!(literal_f64(3.40283e38), "3.40283e+38");
/// ```
pub fn literal_f64(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e21).contains(&magnitude) {
        let text = format!("{:e}", f);
        return match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => text,
        };
    }
    format!("{}", f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integral_float() {
        assert_eq!(format_f64(50.0), "50");
        assert_eq!(format_f64(-3.0), "-3");
        assert_eq!(format_f64(6442450942.0), "6442450942");
    }

    #[test]
    fn test_format_fractional_float() {
        assert_eq!(format_f64(47.641942), "47.641942");
        assert_eq!(format_f64(-122.127222), "-122.127222");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_f64(f64::NAN), "null");
        assert_eq!(format_f64(f64::INFINITY), "null");
        assert_eq!(format_f32(f32::NEG_INFINITY), "null");
    }

    #[test]
    fn test_format_f32_shortest() {
        assert_eq!(format_f32(1.1), "1.1");
        assert_eq!(format_f32(2.0), "2");
    }

    #[test]
    fn test_literal_plain() {
        assert_eq!(literal_f64(0.0), "0");
        assert_eq!(literal_f64(200.0), "200");
        assert_eq!(literal_f64(-1.5), "-1.5");
    }

    #[test]
    fn test_literal_exponent() {
        assert_eq!(literal_f64(3.40283e38), "3.40283e+38");
        assert_eq!(literal_f64(1e21), "1e+21");
        assert_eq!(literal_f64(0.00001), "1e-05");
        assert_eq!(literal_f64(-2.5e-7), "-2.5e-07");
    }
}
