// crates/engine/src/timer.rs
use std::time::{Duration, Instant};

/// Duration of one named stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed: Duration,
}

/// Stage stopwatch. Each [`Timer::report`] measures the time since the
/// previous one; the total is logged when the timer is dropped.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
    lap: Instant,
    stages: Vec<StageTiming>,
}

impl Timer {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        let now = Instant::now();
        Self {
            label,
            start: now,
            lap: now,
            stages: Vec::new(),
        }
    }

    /// Closes the current stage under `stage` and starts the next one.
    pub fn report(&mut self, stage: &'static str) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.lap);
        self.lap = now;
        log::debug!("time ({stage}) = {:.3}s", elapsed.as_secs_f64());
        self.stages.push(StageTiming { stage, elapsed });
        elapsed
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Hands out the recorded stages; the total is still logged on drop.
    #[must_use]
    pub fn take_stages(&mut self) -> Vec<StageTiming> {
        std::mem::take(&mut self.stages)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!("time ({}) = {:.3}s", self.label, self.total().as_secs_f64());
    }
}
