use crate::FpsReport;
use std::time::{Duration, Instant};

/// Counts processed frames against a monotonic clock. Call `start`, then
/// `update` once per frame, then `stop`; readings are frozen after `stop`.
#[derive(Debug, Default)]
pub struct FpsCounter {
    started: Option<Instant>,
    stopped: Option<Instant>,
    frames: u64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start instant and reset the frame count. Restarting an
    /// already-used counter begins a fresh measurement.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.stopped = None;
        self.frames = 0;
    }

    /// Count one processed frame. Ignored unless running.
    pub fn update(&mut self) {
        if self.started.is_some() && self.stopped.is_none() {
            self.frames += 1;
        }
    }

    /// Record the stop instant. Later calls keep the first stop time.
    pub fn stop(&mut self) {
        if self.started.is_some() && self.stopped.is_none() {
            self.stopped = Some(Instant::now());
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Measured interval: start to stop once stopped, start to now while
    /// running, zero if never started.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(start) => self.stopped.unwrap_or_else(Instant::now) - start,
            None => Duration::ZERO,
        }
    }

    /// Frames per elapsed second, or 0.0 when no time has been measured.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }

    pub fn report(&self) -> FpsReport {
        FpsReport {
            frames: self.frames(),
            elapsed_secs: self.elapsed().as_secs_f64(),
            fps: self.fps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_counter_is_idle() {
        let c = FpsCounter::new();
        assert_eq!(c.frames(), 0);
        assert_eq!(c.elapsed(), Duration::ZERO);
        assert_eq!(c.fps(), 0.0);
    }

    #[test]
    fn test_update_counts_frames() {
        let mut c = FpsCounter::new();
        c.start();
        for _ in 0..7 {
            c.update();
        }
        assert_eq!(c.frames(), 7);
    }

    #[test]
    fn test_update_ignored_when_idle_or_stopped() {
        let mut c = FpsCounter::new();
        c.update();
        assert_eq!(c.frames(), 0);
        c.start();
        c.update();
        c.stop();
        c.update();
        assert_eq!(c.frames(), 1);
    }

    #[test]
    fn test_fps_is_frames_over_elapsed() {
        let mut c = FpsCounter::new();
        c.start();
        for _ in 0..5 {
            c.update();
        }
        thread::sleep(Duration::from_millis(10));
        c.stop();
        let secs = c.elapsed().as_secs_f64();
        assert!(secs > 0.0);
        assert!((c.fps() - 5.0 / secs).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_monotonic_while_running() {
        let mut c = FpsCounter::new();
        c.start();
        let a = c.elapsed();
        thread::sleep(Duration::from_millis(5));
        let b = c.elapsed();
        assert!(b >= a);
    }

    #[test]
    fn test_elapsed_frozen_after_stop() {
        let mut c = FpsCounter::new();
        c.start();
        thread::sleep(Duration::from_millis(5));
        c.stop();
        let a = c.elapsed();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(c.elapsed(), a);
        // A second stop must not move the stop instant either
        c.stop();
        assert_eq!(c.elapsed(), a);
    }

    #[test]
    fn test_restart_resets_count() {
        let mut c = FpsCounter::new();
        c.start();
        c.update();
        c.stop();
        c.start();
        assert_eq!(c.frames(), 0);
        c.update();
        assert_eq!(c.frames(), 1);
    }

    #[test]
    fn test_report_matches_accessors() {
        let mut c = FpsCounter::new();
        c.start();
        c.update();
        thread::sleep(Duration::from_millis(5));
        c.stop();
        let r = c.report();
        assert_eq!(r.frames, c.frames());
        assert_eq!(r.elapsed_secs, c.elapsed().as_secs_f64());
        assert_eq!(r.fps, c.fps());
    }
}
