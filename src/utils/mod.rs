use std::time::Duration;

/// Seconds with two decimals, e.g. "1.25".
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}

/// Seconds at millisecond precision, e.g. "0.123".
pub fn format_millis(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::ZERO), "0.00");
        assert_eq!(format_seconds(Duration::from_millis(1234)), "1.23");
        assert_eq!(format_seconds(Duration::from_millis(1500)), "1.50");
        assert_eq!(format_seconds(Duration::from_secs(75)), "75.00");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(0.0), "0.000");
        assert_eq!(format_millis(0.123456789), "0.123");
        assert_eq!(format_millis(1.5), "1.500");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1000), "1.0 KB");
        assert_eq!(format_size(2_500_000), "2.5 MB");
        assert_eq!(format_size(25_000_000_000), "25.0 GB");
    }
}
