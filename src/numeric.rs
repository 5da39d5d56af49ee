use once_cell::sync::Lazy;
use regex::Regex;

// decimal literal accepted by the browser's Number(): sign, digits with optional
// fraction (either side of the dot may be empty, not both), optional exponent
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal literal pattern")
});

/// Convert text the way the browser's `Number(text)` does.
///
/// Returns `None` where the browser would produce `NaN`. Empty (or
/// whitespace-only) text converts to `0`, exactly like the browser.
pub fn to_number(text: &str) -> Option<f64> {
    let t = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if t.is_empty() {
        return Some(0.0);
    }
    match t {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = radix_literal(t) {
        return n;
    }
    if DECIMAL.is_match(t) {
        return t.parse::<f64>().ok();
    }
    None
}

/// Mirrors `!isNaN(text)`.
pub fn is_numeric(text: &str) -> bool {
    to_number(text).is_some()
}

// 0x / 0o / 0b literals; unsigned only. Outer None: not a radix literal at all.
fn radix_literal(t: &str) -> Option<Option<f64>> {
    let bytes = t.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &t[2..];
    if digits.is_empty() {
        return Some(None);
    }
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return Some(None),
        }
    }
    Some(Some(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimals() {
        assert_eq!(to_number("10"), Some(10.0));
        assert_eq!(to_number("-2.5"), Some(-2.5));
        assert_eq!(to_number("+.5"), Some(0.5));
        assert_eq!(to_number("5."), Some(5.0));
        assert_eq!(to_number("1e3"), Some(1000.0));
        assert_eq!(to_number("  42\n"), Some(42.0));
    }

    #[test]
    fn empty_and_blank_are_zero() {
        assert_eq!(to_number(""), Some(0.0));
        assert_eq!(to_number("   "), Some(0.0));
    }

    #[test]
    fn rust_only_spellings_are_rejected() {
        assert_eq!(to_number("inf"), None);
        assert_eq!(to_number("NaN"), None);
        assert_eq!(to_number("nan"), None);
        assert_eq!(to_number("1_000"), None);
        assert_eq!(to_number("."), None);
        assert_eq!(to_number("e5"), None);
    }

    #[test]
    fn infinity_and_radix_literals() {
        assert_eq!(to_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(to_number("0x1F"), Some(31.0));
        assert_eq!(to_number("0b101"), Some(5.0));
        assert_eq!(to_number("0o17"), Some(15.0));
        assert_eq!(to_number("0x"), None);
        assert_eq!(to_number("0xZ"), None);
        assert_eq!(to_number("-0x10"), None);
    }

    #[test]
    fn words_are_not_numeric() {
        assert!(!is_numeric("apple"));
        assert!(!is_numeric("10 km"));
        assert!(is_numeric("007"));
    }
}
