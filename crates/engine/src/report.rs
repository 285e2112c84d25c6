// crates/engine/src/report.rs
use crate::timer::StageTiming;
use std::fmt;
use std::time::Duration;
use wordfreq_core::CountSummary;

/// What a counting run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub summary: CountSummary,
    /// Ranked entries written to the output (after `top_n`).
    pub written: usize,
    /// Whether the counts were checked against a plain hash map.
    pub verified: bool,
    pub stages: Vec<StageTiming>,
    pub total: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "bytes       {}", s.bytes)?;
        writeln!(f, "words       {}", s.words)?;
        writeln!(f, "distinct    {}", s.distinct)?;
        writeln!(f, "written     {}", self.written)?;
        writeln!(f, "saturated   {}", s.saturated)?;
        writeln!(f, "arena bytes {}", s.arena_used)?;
        writeln!(f, "load factor {:.4}", s.load_factor)?;
        if self.verified {
            writeln!(f, "verified    yes")?;
        }
        for stage in &self.stages {
            writeln!(f, "time ({}) = {:.3}s", stage.stage, stage.elapsed.as_secs_f64())?;
        }
        write!(f, "time (total) = {:.3}s", self.total.as_secs_f64())
    }
}
