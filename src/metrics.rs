use std::{
    fmt::Display,
    time::{Duration, Instant},
};

/// Frame timing statistics, reset every reporting window.
pub struct Metrics {
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            frame_time: Duration::ZERO,
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
        }
    }

    pub fn update(&mut self, frame_delta: Duration) {
        self.fps_counter += 1;
        self.frame_time = frame_delta;
        self.frame_times.push(frame_delta.as_secs_f32() * 1000.0);
    }

    /// Average frame time of the current window in milliseconds.
    pub fn average_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    /// Close the reporting window once it is a second old. Returns true when
    /// `current_fps` was refreshed and the stats are worth logging.
    pub fn roll_window(&mut self, now: Instant) -> bool {
        let elapsed = now.duration_since(self.fps_update_timer);
        if elapsed < Self::REPORT_INTERVAL {
            return false;
        }
        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        true
    }

    pub fn reset_window(&mut self, now: Instant) {
        self.fps_counter = 0;
        self.frame_times.clear();
        self.fps_update_timer = now;
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            self.average_ms(),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rolls_after_a_second() {
        let mut metrics = Metrics::new();
        let start = metrics.fps_update_timer;
        for _ in 0..30 {
            metrics.update(Duration::from_millis(20));
        }
        assert!(!metrics.roll_window(start + Duration::from_millis(500)));
        assert!(metrics.roll_window(start + Duration::from_secs(2)));
        assert!((metrics.current_fps - 15.0).abs() < 1e-3);
        assert!((metrics.average_ms() - 20.0).abs() < 1e-3);

        metrics.reset_window(start + Duration::from_secs(2));
        assert_eq!(metrics.fps_counter, 0);
        assert!(metrics.frame_times.is_empty());
    }

    #[test]
    fn display_lists_the_window_stats() {
        let mut metrics = Metrics::new();
        metrics.update(Duration::from_millis(10));
        metrics.update(Duration::from_millis(30));
        let text = metrics.to_string();
        assert!(text.contains("Avg: 20.00ms"));
        assert!(text.contains("Min: 10.00ms"));
        assert!(text.contains("Max: 30.00ms"));
    }
}
