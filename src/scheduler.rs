//! Frame sources and throttling for the update cycle
//!
//! The engine never reads a clock on its own: every update is driven by a
//! frame timestamp (ms) handed in by a [`FrameSource`]. Tests and batch runs
//! use [`SyntheticFrames`]; the terminal front-end feeds real elapsed time.

/// Anything that yields frame timestamps in milliseconds
pub trait FrameSource {
    /// Timestamp of the next frame, or None when the source is exhausted
    fn next_frame(&mut self) -> Option<f64>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = f64>,
{
    fn next_frame(&mut self) -> Option<f64> {
        self.next()
    }
}

/// Evenly spaced synthetic frames
#[derive(Debug, Clone)]
pub struct SyntheticFrames {
    start_ms: f64,
    interval_ms: f64,
    index: usize,
    count: usize,
}

impl SyntheticFrames {
    /// `count` frames starting at `start_ms`, `interval_ms` apart
    pub fn new(start_ms: f64, interval_ms: f64, count: usize) -> Self {
        Self {
            start_ms,
            interval_ms,
            index: 0,
            count,
        }
    }

    /// Frames at a display refresh rate (e.g. 60 Hz) for a duration in seconds
    pub fn at_hz(start_ms: f64, hz: f64, seconds: f64) -> Self {
        let interval_ms = 1000.0 / hz;
        let count = (seconds * hz).floor() as usize + 1;
        Self::new(start_ms, interval_ms, count)
    }
}

impl Iterator for SyntheticFrames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        // Computed from the index so long runs do not drift
        let ts = self.start_ms + self.index as f64 * self.interval_ms;
        self.index += 1;
        Some(ts)
    }
}

/// Drops frames arriving sooner than a minimum interval after the last kept one
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle {
    min_interval_ms: f64,
    last_admitted: Option<f64>,
}

impl FrameThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_admitted: None,
        }
    }

    /// Whether the frame at `timestamp` should be processed
    pub fn admit(&mut self, timestamp: f64) -> bool {
        let admitted = match self.last_admitted {
            Some(last) => timestamp - last >= self.min_interval_ms || timestamp < last,
            None => true,
        };
        if admitted {
            self.last_admitted = Some(timestamp);
        }
        admitted
    }

    /// Mark a frame processed outside the normal cycle (forced render)
    pub fn mark(&mut self, timestamp: f64) {
        self.last_admitted = Some(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_frames_are_evenly_spaced() {
        let frames: Vec<f64> = SyntheticFrames::new(100.0, 16.0, 4).collect();
        assert_eq!(frames, vec![100.0, 116.0, 132.0, 148.0]);
    }

    #[test]
    fn test_at_hz_covers_duration() {
        let frames: Vec<f64> = SyntheticFrames::at_hz(0.0, 10.0, 1.0).collect();
        assert_eq!(frames.len(), 11);
        assert_eq!(frames.first(), Some(&0.0));
        assert!((frames.last().unwrap() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_iterators_are_frame_sources() {
        let mut source = vec![1.0, 2.0].into_iter();
        assert_eq!(source.next_frame(), Some(1.0));
        assert_eq!(source.next_frame(), Some(2.0));
        assert_eq!(source.next_frame(), None);
    }

    #[test]
    fn test_throttle_drops_close_frames() {
        let mut throttle = FrameThrottle::new(50.0);
        let admitted: Vec<bool> = [0.0, 16.0, 33.0, 50.0, 66.0, 100.0]
            .into_iter()
            .map(|ts| throttle.admit(ts))
            .collect();
        assert_eq!(admitted, vec![true, false, false, true, false, true]);
    }

    #[test]
    fn test_zero_throttle_admits_everything() {
        let mut throttle = FrameThrottle::new(0.0);
        assert!((0..10).all(|i| throttle.admit(i as f64)));
    }

    #[test]
    fn test_mark_restarts_interval() {
        let mut throttle = FrameThrottle::new(50.0);
        assert!(throttle.admit(0.0));
        throttle.mark(40.0);
        assert!(!throttle.admit(60.0));
        assert!(throttle.admit(90.0));
    }
}
