use std::time::{Duration, Instant};

/// Session bookkeeping: the run clock, games played and the best score.
///
/// The clock only advances through `tick_clock`, which the driver calls
/// while the game is running; freezing the displayed time on game over
/// falls out of simply not ticking it.
pub struct SessionMetrics {
    run_started: Instant,
    run_elapsed: Duration,
    clock_frozen: bool,
    best_score: u32,
    runs_completed: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            run_elapsed: Duration::ZERO,
            clock_frozen: true,
            best_score: 0,
            runs_completed: 0,
        }
    }

    pub fn tick_clock(&mut self) {
        if !self.clock_frozen {
            self.run_elapsed = self.run_started.elapsed();
        }
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Instant::now();
        self.run_elapsed = Duration::ZERO;
        self.clock_frozen = false;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.clock_frozen = true;
        self.runs_completed += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn runs_completed(&self) -> u32 {
        self.runs_completed
    }

    pub fn format_clock(&self) -> String {
        let total_secs = self.run_elapsed.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.run_elapsed = Duration::from_secs(125);
        assert_eq!(metrics.format_clock(), "02:05");

        metrics.run_elapsed = Duration::from_secs(0);
        assert_eq!(metrics.format_clock(), "00:00");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.best_score(), 10);
        assert_eq!(metrics.runs_completed(), 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.best_score(), 10); // Should not decrease
        assert_eq!(metrics.runs_completed(), 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.best_score(), 15);
    }

    #[test]
    fn test_clock_frozen_until_run_starts() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.tick_clock();
        assert_eq!(metrics.run_elapsed, Duration::ZERO);

        metrics.on_run_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.tick_clock();
        assert!(metrics.run_elapsed.as_millis() >= 20);
    }

    #[test]
    fn test_clock_frozen_after_game_over() {
        let mut metrics = SessionMetrics::new();
        metrics.on_run_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.tick_clock();
        let at_death = metrics.run_elapsed;

        metrics.on_game_over(3);
        std::thread::sleep(Duration::from_millis(10));
        metrics.tick_clock();
        assert_eq!(metrics.run_elapsed, at_death);
    }
}
