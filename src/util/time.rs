/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since the UNIX epoch
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| (perf.time_origin() + perf.now()) / 1000.0)
        .unwrap_or(0.0)
}

/// Seconds since the start of the current day (UTC), for log display
pub fn seconds_of_day(timestamp: f64) -> u32 {
    (timestamp.max(0.0) as u64 % 86_400) as u32
}

/// Format a timestamp as `HH:MM:SS` (UTC)
pub fn clock_string(timestamp: f64) -> String {
    let secs = seconds_of_day(timestamp);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_string() {
        assert_eq!(clock_string(0.0), "00:00:00");
        assert_eq!(clock_string(86_400.0 + 3_723.9), "01:02:03");
        assert_eq!(clock_string(-5.0), "00:00:00");
    }
}
