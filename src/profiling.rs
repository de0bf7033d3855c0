//! Self-profiling for the decision pipeline
//!
//! Tracks calls and time spent in each detector stage so thresholds can be
//! tuned against their cost. Enabled with `--profile`; never changes a verdict.

use std::time::{Duration, Instant};

/// Detector stages that can be profiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfilingCategory {
    /// Alphabet encoding of the input
    Encoding,
    /// Start-of-stream entropy anomaly
    StartAnomaly,
    /// Single-removal entropy-slope scan
    SingleRemoval,
    /// Spectral confirmation of single-removal windows
    SpectralFit,
    /// Combinatorial multi-removal search
    MultiRemoval,
    /// Relaxed minimum-entropy guess
    Fallback,
}

impl ProfilingCategory {
    pub const ALL: [ProfilingCategory; 6] = [
        ProfilingCategory::Encoding,
        ProfilingCategory::StartAnomaly,
        ProfilingCategory::SingleRemoval,
        ProfilingCategory::SpectralFit,
        ProfilingCategory::MultiRemoval,
        ProfilingCategory::Fallback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProfilingCategory::Encoding => "encode",
            ProfilingCategory::StartAnomaly => "start_anomaly",
            ProfilingCategory::SingleRemoval => "single_removal",
            ProfilingCategory::SpectralFit => "spectral_fit",
            ProfilingCategory::MultiRemoval => "multi_removal",
            ProfilingCategory::Fallback => "fallback",
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Calls and cumulative time of one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTiming {
    pub calls: u64,
    pub total: Duration,
}

/// Profiling context that tracks time spent in each stage
#[derive(Debug)]
pub struct ProfilingContext {
    enabled: bool,
    timings: [CategoryTiming; 6],
    start_time: Instant,
}

impl Default for ProfilingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilingContext {
    /// Create an enabled profiling context
    pub fn new() -> Self {
        Self {
            enabled: true,
            timings: [CategoryTiming::default(); 6],
            start_time: Instant::now(),
        }
    }

    /// Create a context that records nothing
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Measure the time taken by an operation
    ///
    /// # Example
    /// ```
    /// use cribador::profiling::{ProfilingCategory, ProfilingContext};
    ///
    /// let mut ctx = ProfilingContext::new();
    /// let result = ctx.measure(ProfilingCategory::Encoding, || 2 + 2);
    /// assert_eq!(result, 4);
    /// assert_eq!(ctx.timing(ProfilingCategory::Encoding).calls, 1);
    /// ```
    pub fn measure<F, R>(&mut self, category: ProfilingCategory, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }
        let start = Instant::now();
        let result = f();
        self.record_time(category, start.elapsed());
        result
    }

    /// Record one call of a category
    pub fn record_time(&mut self, category: ProfilingCategory, duration: Duration) {
        if !self.enabled {
            return;
        }
        let timing = &mut self.timings[category.slot()];
        timing.calls += 1;
        timing.total += duration;
    }

    pub fn timing(&self, category: ProfilingCategory) -> CategoryTiming {
        self.timings[category.slot()]
    }

    /// Wall clock time since the context was created
    pub fn wall_time(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Sum of all recorded stage time
    pub fn stage_time(&self) -> Duration {
        self.timings.iter().map(|t| t.total).sum()
    }

    /// Categories with at least one call, by descending cumulative time
    pub fn sorted_by_cumulative(&self) -> Vec<(ProfilingCategory, CategoryTiming)> {
        let mut rows: Vec<_> = ProfilingCategory::ALL
            .iter()
            .map(|&c| (c, self.timing(c)))
            .filter(|(_, t)| t.calls > 0)
            .collect();
        rows.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        rows
    }

    /// Render the breakdown table
    pub fn summary_string(&self) -> String {
        let stage = self.stage_time();
        let mut out = String::new();
        out.push_str(&format!(
            "Total wall time: {:.6}s, in stages: {:.6}s\n",
            self.wall_time().as_secs_f64(),
            stage.as_secs_f64()
        ));
        out.push_str("   calls    cumtime    percall   %time stage\n");
        for (category, timing) in self.sorted_by_cumulative() {
            let percall = timing.total.as_secs_f64() / timing.calls as f64;
            let percent = if stage > Duration::ZERO {
                timing.total.as_secs_f64() / stage.as_secs_f64() * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "{:>8} {:>10.6} {:>10.6} {:>7.2} {}\n",
                timing.calls,
                timing.total.as_secs_f64(),
                percall,
                percent,
                category.name()
            ));
        }
        out
    }

    /// Print profiling summary to stderr
    pub fn print_summary(&self) {
        eprintln!("\n=== Detector profile (sorted by cumulative time) ===");
        eprint!("{}", self.summary_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_record_time_accumulates() {
        let mut ctx = ProfilingContext::new();
        let duration = Duration::from_millis(100);

        ctx.record_time(ProfilingCategory::MultiRemoval, duration);
        ctx.record_time(ProfilingCategory::MultiRemoval, duration);

        let timing = ctx.timing(ProfilingCategory::MultiRemoval);
        assert_eq!(timing.calls, 2);
        assert_eq!(timing.total, duration + duration);
    }

    #[test]
    fn test_measure() {
        let mut ctx = ProfilingContext::new();

        let result = ctx.measure(ProfilingCategory::SpectralFit, || {
            thread::sleep(Duration::from_millis(10));
            42
        });

        assert_eq!(result, 42);
        assert!(ctx.timing(ProfilingCategory::SpectralFit).total >= Duration::from_millis(10));
    }

    #[test]
    fn test_disabled_records_nothing() {
        let mut ctx = ProfilingContext::disabled();
        let result = ctx.measure(ProfilingCategory::Encoding, || "x");
        assert_eq!(result, "x");
        assert_eq!(ctx.timing(ProfilingCategory::Encoding).calls, 0);
        assert!(ctx.sorted_by_cumulative().is_empty());
    }

    #[test]
    fn test_sorted_by_cumulative_time() {
        let mut ctx = ProfilingContext::new();
        ctx.record_time(ProfilingCategory::StartAnomaly, Duration::from_millis(1));
        ctx.record_time(ProfilingCategory::MultiRemoval, Duration::from_millis(30));
        ctx.record_time(ProfilingCategory::SingleRemoval, Duration::from_millis(5));

        let order: Vec<_> = ctx.sorted_by_cumulative().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![
                ProfilingCategory::MultiRemoval,
                ProfilingCategory::SingleRemoval,
                ProfilingCategory::StartAnomaly
            ]
        );
        assert_eq!(ctx.stage_time(), Duration::from_millis(36));
    }

    #[test]
    fn test_summary_lists_stage_names() {
        let mut ctx = ProfilingContext::new();
        ctx.record_time(ProfilingCategory::Fallback, Duration::from_millis(2));
        let summary = ctx.summary_string();
        assert!(summary.contains("fallback"));
        assert!(summary.contains("cumtime"));
        assert!(!summary.contains("multi_removal"));
    }

    #[test]
    fn test_print_summary_does_not_panic() {
        ProfilingContext::new().print_summary();
    }
}
