//! Lenient number extraction from free text.
//!
//! Amounts, weights and settings arrive as whatever the user typed
//! (`"300ml"`, `"70.5 kg"`, `"8회"`). None of these helpers fail: text with
//! no usable number yields `None` or `0`.

/// Sum contribution of a water amount such as `"300ml"` or `"1,500 ml"`.
///
/// Every character other than ASCII digits and `.` is discarded, then the
/// longest leading decimal number is read. Text with no digits is `0`.
pub fn amount_value(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&digits).unwrap_or(0.0)
}

/// Longest leading floating-point number in `text`, after leading
/// whitespace. Trailing garbage is ignored (`"70.5kg"` is `70.5`).
///
/// Returns `None` when no digits lead the text or the result is not finite.
pub fn leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest leading integer in `text`, after leading whitespace.
/// `"8회"` is `8`, `"abc"` is `None`.
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse::<i64>().ok()
}

/// A strictly positive count or quantity from free text, or `None` when the
/// text has no leading integer, is zero or negative, or overflows `T`.
pub fn positive_int<T: TryFrom<i64>>(text: &str) -> Option<T> {
    leading_int(text)
        .filter(|v| *v > 0)
        .and_then(|v| T::try_from(v).ok())
}
