//! Display formatting for remaining time

/// Format seconds as `MM:SS`, both fields zero-padded to two digits
pub fn format_time(seconds: u64) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(125), "02:05");
    }

    #[test]
    fn wide_minutes_are_not_truncated() {
        assert_eq!(format_time(5999), "99:59");
        assert_eq!(format_time(6000), "100:00");
    }
}
