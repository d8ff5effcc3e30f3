//! Normalization of raw duration text from the input field

/// Convert raw input text into whole seconds.
///
/// Never fails: empty or non-numeric text yields `0`, decimals are truncated
/// toward zero and out-of-range values saturate. Negative results are left
/// for the engine to clamp.
pub fn parse_duration_input(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    if let Ok(seconds) = text.parse::<i64>() {
        return seconds;
    }

    match text.parse::<f64>() {
        // `as` saturates at the i64 bounds
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_garbage_become_zero() {
        assert_eq!(parse_duration_input(""), 0);
        assert_eq!(parse_duration_input("   "), 0);
        assert_eq!(parse_duration_input("abc"), 0);
        assert_eq!(parse_duration_input("12abc"), 0);
        assert_eq!(parse_duration_input("NaN"), 0);
        assert_eq!(parse_duration_input("inf"), 0);
    }

    #[test]
    fn integers_pass_through() {
        assert_eq!(parse_duration_input("42"), 42);
        assert_eq!(parse_duration_input("  42 "), 42);
        assert_eq!(parse_duration_input("-2"), -2);
    }

    #[test]
    fn decimals_truncate_toward_zero() {
        assert_eq!(parse_duration_input("3.9"), 3);
        assert_eq!(parse_duration_input("-3.9"), -3);
        assert_eq!(parse_duration_input("1e2"), 100);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(parse_duration_input("1e30"), i64::MAX);
    }
}
