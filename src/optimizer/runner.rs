use crate::config::{Config, PowerRates};
use crate::error::{PfResult, PowerForgeError};
use crate::grid::{CellKind, Grid, Rate};
use crate::optimizer::{DfsSearch, SearchResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::{debug, info};

pub struct BatchOptions {
    pub total_buildings: usize,
    pub top_n: usize,
    pub two_phase_threshold: Rate,
    pub threads: Option<usize>,
    pub rates: PowerRates,
}

impl From<&Config> for BatchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            total_buildings: cfg.search.total_buildings,
            top_n: cfg.search.top_n,
            two_phase_threshold: cfg.search.two_phase_threshold,
            threads: cfg.search.threads,
            rates: cfg.rates,
        }
    }
}

impl BatchOptions {
    #[inline]
    pub fn is_two_phase(&self) -> bool {
        self.two_phase_threshold > 0 && self.top_n > 1
    }
}

/// Which pass produced a grid's final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Single pass, or the narrow `top_n = 1` pass of a two-phase run.
    Narrow,
    /// Repeated with the requested `top_n` after clearing the threshold.
    Wide,
}

#[derive(Debug, Clone)]
pub struct GridOutcome {
    /// Position of the grid in the input slice.
    pub index: usize,
    pub phase: SearchPhase,
    pub top_n: usize,
    pub result: SearchResult,
}

impl GridOutcome {
    pub fn best_rate(&self) -> Rate {
        self.result.best_rate().unwrap_or(0)
    }
}

#[derive(Debug)]
pub struct BatchResult {
    /// Best rate first; equal rates keep input order.
    pub ranking: Vec<GridOutcome>,
    pub runtime: Duration,
}

impl BatchResult {
    pub fn winner(&self) -> Option<&GridOutcome> {
        self.ranking.first()
    }

    pub fn outcome(&self, index: usize) -> Option<&GridOutcome> {
        self.ranking.iter().find(|o| o.index == index)
    }
}

/// Runs one independent search per grid on a rayon pool.
pub struct BatchOptimizer {
    options: BatchOptions,
}

impl BatchOptimizer {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Checks every grid against the building budget before any search runs.
    pub fn validate(&self, grids: &[Grid]) -> PfResult<()> {
        if self.options.top_n == 0 {
            return Err(PowerForgeError::Config(
                "top_n must be at least 1".to_string(),
            ));
        }
        if self.options.threads == Some(0) {
            return Err(PowerForgeError::Config(
                "threads must be at least 1 when given".to_string(),
            ));
        }
        if grids.is_empty() {
            return Err(PowerForgeError::Config("no grids to optimize".to_string()));
        }
        for (idx, grid) in grids.iter().enumerate() {
            self.placement_budget(idx, grid)?;
        }
        Ok(())
    }

    /// Number of buildings still to place on `grid`.
    fn placement_budget(&self, idx: usize, grid: &Grid) -> PfResult<usize> {
        let placed = grid.placed_buildings();
        let total = self.options.total_buildings;
        if total < placed {
            return Err(PowerForgeError::Config(format!(
                "grid {}: total_buildings {} is below the {} buildings already placed",
                idx, total, placed
            )));
        }
        let budget = total - placed;
        let free = grid.count(CellKind::Empty);
        if budget > free {
            return Err(PowerForgeError::Config(format!(
                "grid {}: {} buildings to place but only {} empty cells",
                idx, budget, free
            )));
        }
        Ok(budget)
    }

    pub fn run(&self, grids: &[Grid]) -> PfResult<BatchResult> {
        self.validate(grids)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads.unwrap_or(0))
            .build()?;

        pool.install(|| self.run_phases(grids))
    }

    fn run_phases(&self, grids: &[Grid]) -> PfResult<BatchResult> {
        let opts = &self.options;
        let start = Instant::now();

        // 1. Narrow pass over every grid
        let first_top_n = if opts.is_two_phase() { 1 } else { opts.top_n };
        let all: Vec<usize> = (0..grids.len()).collect();
        info!(
            "Searching {} grid(s) with top_n={} ({} buildings)",
            grids.len(),
            first_top_n,
            opts.total_buildings
        );
        let mut outcomes = self.run_phase(grids, &all, first_top_n, SearchPhase::Narrow)?;

        // 2. Wide pass over the promising grids only
        if opts.is_two_phase() {
            let promising: Vec<usize> = outcomes
                .iter()
                .filter(|o| o.best_rate() > opts.two_phase_threshold)
                .map(|o| o.index)
                .collect();

            info!(
                "{} grid(s) above {}/h, repeating with top_n={}",
                promising.len(),
                opts.two_phase_threshold,
                opts.top_n
            );

            for outcome in self.run_phase(grids, &promising, opts.top_n, SearchPhase::Wide)? {
                let idx = outcome.index;
                outcomes[idx] = outcome;
            }
        }

        // 3. Rank
        outcomes.sort_by(|a, b| {
            b.best_rate()
                .cmp(&a.best_rate())
                .then_with(|| a.index.cmp(&b.index))
        });

        if let Some(w) = outcomes.first() {
            info!(
                "Best grid #{}: {}/h with {} accumulator(s)",
                w.index,
                w.best_rate(),
                w.result.best().map_or(0, |s| s.num_accumulators())
            );
        }

        Ok(BatchResult {
            ranking: outcomes,
            runtime: start.elapsed(),
        })
    }

    /// Searches the grids at `indices` in parallel. Results are only read
    /// after every worker has returned; outcomes come back in `indices` order.
    fn run_phase(
        &self,
        grids: &[Grid],
        indices: &[usize],
        top_n: usize,
        phase: SearchPhase,
    ) -> PfResult<Vec<GridOutcome>> {
        let rates = self.options.rates;

        let results: Vec<PfResult<GridOutcome>> = indices
            .par_iter()
            .map(|&index| {
                let grid = &grids[index];
                let budget = self.placement_budget(index, grid)?;

                let mut search = DfsSearch::new(grid, rates);
                let result = search.find_best_power(top_n, budget)?;
                debug!("Grid #{} ({}): {}", index, phase, result);

                Ok(GridOutcome {
                    index,
                    phase,
                    top_n,
                    result,
                })
            })
            .collect();

        results.into_iter().collect()
    }
}
