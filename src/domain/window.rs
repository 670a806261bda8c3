/// The bounded time range fetched from the source around a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    /// Start offset in the source, in seconds
    pub start: u64,
    /// Requested window length, in seconds
    pub duration: u64,
}

/// Compute the download window for a marker.
///
/// The window ends at the marker when `offset >= duration`; otherwise it is
/// clamped to start at 0 and covers less lead-in than requested. The clamp
/// is deliberate, not an error.
pub fn clip_window(offset_seconds: u64, duration_seconds: u64) -> ClipWindow {
    ClipWindow {
        start: offset_seconds.saturating_sub(duration_seconds),
        duration: duration_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_ends_at_marker() {
        let w = clip_window(300, 60);
        assert_eq!(w.start, 240);
        assert_eq!(w.duration, 60);
    }

    #[test]
    fn test_window_clamped_at_start() {
        let w = clip_window(30, 60);
        assert_eq!(w.start, 0);
        assert_eq!(w.duration, 60);
    }

    #[test]
    fn test_marker_at_zero() {
        let w = clip_window(0, 60);
        assert_eq!(w.start, 0);
    }

    #[test]
    fn test_offset_equal_to_duration() {
        let w = clip_window(60, 60);
        assert_eq!(w.start, 0);
        assert_eq!(w.duration, 60);
    }
}
