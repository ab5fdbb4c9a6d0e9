use crate::grid::{Coord, Rate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// One accumulator placement and the whole-base rate it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    pub coord: Coord,
    pub power_rate: Rate,
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}/h", self.coord, self.power_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionItem {
    pub power_rate: Rate,
    /// Accumulators in placement order.
    pub path: Vec<PathNode>,
}

impl SolutionItem {
    #[inline]
    pub fn num_accumulators(&self) -> usize {
        self.path.len()
    }

    pub fn accumulators(&self) -> Vec<Coord> {
        self.path.iter().map(|n| n.coord).collect()
    }

    /// Rate change contributed by each step; the first step is measured
    /// against `baseline`.
    pub fn gains(&self, baseline: Rate) -> Vec<i64> {
        let mut prev = baseline as i64;
        self.path
            .iter()
            .map(|n| {
                let gain = n.power_rate as i64 - prev;
                prev = n.power_rate as i64;
                gain
            })
            .collect()
    }
}

impl fmt::Display for SolutionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Solution with {} accus, power rate: {}/h",
            self.path.len(),
            self.power_rate
        )?;
        for node in &self.path {
            writeln!(f, "   {}", node)?;
        }
        Ok(())
    }
}

/// Outcome of one search: every solution sharing the best rate found, plus
/// the call count of the recursive step and the wall time spent.
#[derive(Debug, Clone)]
pub struct SearchResult {
    solutions: Vec<SolutionItem>,
    iterations: u64,
    runtime: Duration,
    start: Instant,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchResult {
    pub fn new() -> Self {
        Self {
            solutions: Vec::new(),
            iterations: 0,
            runtime: Duration::ZERO,
            start: Instant::now(),
        }
    }

    /// Records `path` if it reaches at least the best rate seen so far.
    /// A strictly better rate discards all earlier solutions; ties are kept.
    pub fn offer(&mut self, power_rate: Rate, path: &[PathNode]) -> bool {
        match self.best_rate() {
            Some(best) if power_rate < best => return false,
            Some(best) if power_rate > best => self.solutions.clear(),
            _ => {}
        }
        self.solutions.push(SolutionItem {
            power_rate,
            path: path.to_vec(),
        });
        self.runtime = self.start.elapsed();
        true
    }

    #[inline(always)]
    pub fn inc_iterations(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn finish(&mut self) {
        self.runtime = self.start.elapsed();
    }

    pub fn best(&self) -> Option<&SolutionItem> {
        self.solutions.first()
    }

    pub fn best_rate(&self) -> Option<Rate> {
        self.best().map(|s| s.power_rate)
    }

    pub fn solutions(&self) -> &[SolutionItem] {
        &self.solutions
    }

    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn runtime(&self) -> Duration {
        self.runtime
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} solution(s) in {:.3} sec ({} iterations)",
            self.num_solutions(),
            self.runtime.as_secs_f64(),
            self.iterations
        )
    }
}
