//! Countdown display helpers.

/// Render a number of seconds the way the dashboard shows timers:
/// `2h 5m 3s`, `5m 3s`, or `45s`.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_three_shapes() {
        assert_eq!(format_time(7503), "2h 5m 3s");
        assert_eq!(format_time(303), "5m 3s");
        assert_eq!(format_time(45), "45s");
        assert_eq!(format_time(0), "0s");
    }
}
