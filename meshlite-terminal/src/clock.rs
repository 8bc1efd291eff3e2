/// Frame timing: delta time, frame pacing and an FPS readout
use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots with clamped delta time.
///
/// The upper clamp keeps the light and camera from jumping after the
/// terminal was suspended.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let frame = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps out the remainder of each frame and averages frames per second
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            window_start: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Time left in a frame that started at `frame_start`
    pub fn remaining(&self, frame_start: Instant) -> Option<Duration> {
        self.target.checked_sub(frame_start.elapsed()).filter(|d| !d.is_zero())
    }

    pub fn finish_frame(&mut self, frame_start: Instant) {
        if let Some(rest) = self.remaining(frame_start) {
            std::thread::sleep(rest);
        }
        self.record(Instant::now());
    }

    /// Count a frame; the FPS figure refreshes once a second
    pub fn record(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames_and_clamps_dt() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(50), Duration::from_millis(100));
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        // Back-to-back ticks hit the lower clamp
        assert!((second.dt - 0.05).abs() < 1e-6);

        std::thread::sleep(Duration::from_millis(150));
        assert!((clock.tick().dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pacer_target_from_fps() {
        assert_eq!(FramePacer::new(30).target(), Duration::from_millis(33));
        assert_eq!(FramePacer::new(0).target(), Duration::from_millis(1000));
    }

    #[test]
    fn test_fps_refreshes_after_a_second() {
        let mut pacer = FramePacer::new(30);
        let start = pacer.window_start;
        for i in 1..=10 {
            pacer.record(start + Duration::from_millis(50 * i));
        }
        assert_eq!(pacer.fps(), 0.0);

        pacer.record(start + Duration::from_millis(1100));
        assert!((pacer.fps() - 11.0 / 1.1).abs() < 1e-3);
    }
}
