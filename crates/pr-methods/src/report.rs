//! Phase timing and the coordinator's report.

use std::fmt;
use std::time::{Duration, Instant};

use pr_core::formatting::{format_seconds, speedup};
use pr_core::{Real, Size};
use pr_math::close;

/// Wall-clock timer around one phase.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since [`Stopwatch::start`].
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Result and duration of one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    /// What was computed.
    pub description: String,
    /// The phase's final scalar.
    pub result: Real,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: result={} time={}",
            self.description,
            self.result,
            format_seconds(self.elapsed)
        )
    }
}

/// Both phases of a job, as seen by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    /// Unpartitioned reference computation.
    pub sequential: PhaseReport,
    /// Partitioned computation and combine.
    pub partitioned: PhaseReport,
    /// Number of workers that computed partials.
    pub num_workers: Size,
}

impl JobReport {
    /// Sequential time over partitioned time.
    pub fn speedup(&self) -> Option<Real> {
        speedup(self.sequential.elapsed, self.partitioned.elapsed)
    }

    /// `|partitioned - sequential|`.
    pub fn discrepancy(&self) -> Real {
        (self.partitioned.result - self.sequential.result).abs()
    }

    /// Whether both phases produced the same result within `tolerance`.
    pub fn agrees_within(&self, tolerance: Real) -> bool {
        close(self.partitioned.result, self.sequential.result, tolerance)
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sequential)?;
        write!(f, "{}", self.partitioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(result: Real, millis: u64) -> PhaseReport {
        PhaseReport {
            description: "phase".into(),
            result,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn phase_line_carries_result_and_time() {
        assert_eq!(
            phase(-1.0, 250).to_string(),
            "phase: result=-1 time=0.250000s"
        );
    }

    #[test]
    fn job_report_lines_and_ratios() {
        let report = JobReport {
            sequential: phase(2.0, 300),
            partitioned: phase(2.5, 100),
            num_workers: 3,
        };
        assert_eq!(report.to_string().lines().count(), 2);
        assert!((report.speedup().unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(report.discrepancy(), 0.5);
        assert!(report.agrees_within(0.5));
        assert!(!report.agrees_within(0.1));
    }

    #[test]
    fn stopwatch_moves_forward() {
        let sw = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(2));
        assert!(sw.elapsed() >= Duration::from_millis(2));
    }
}
