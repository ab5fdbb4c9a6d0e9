use crate::config::{Config, PowerRates};
use crate::error::{PfResult, PowerForgeError};
use crate::grid::{Grid, GridState, Rate};
use crate::layouts::NamedGrid;
use crate::optimizer::runner::{BatchOptimizer, BatchOptions, GridOutcome, SearchPhase};
use crate::optimizer::{PathNode, SolutionItem};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a report needs about one optimized grid.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub grid_index: usize,
    pub grid_name: String,
    pub phase: SearchPhase,
    pub top_n: usize,
    pub baseline_rate: Rate,
    pub best_rate: Rate,
    pub accumulators: Vec<PathNode>,
    pub num_solutions: usize,
    pub iterations: u64,
    pub elapsed_ms: f64,
}

/// Output of `k` power plants on the best free cells of `grid`, without any
/// new accumulator.
pub fn aggregate_rate_for_power_plants(grid: &Grid, rates: PowerRates, k: usize) -> Rate {
    GridState::new(grid, rates).aggregate_rate_for_power_plants(k)
}

/// Rate of the whole base when every open building slot becomes a power
/// plant; plants already on `grid` are counted too.
pub fn baseline_rate(grid: &Grid, rates: PowerRates, total_buildings: usize) -> Rate {
    let slots = total_buildings.saturating_sub(grid.placed_buildings());
    GridState::new(grid, rates).base_rate_with_power_plants(slots)
}

/// Optimizes every grid and returns one report per grid, best first.
pub fn optimize_grids(grids: &[NamedGrid], config: &Config) -> PfResult<Vec<SearchReport>> {
    config.validate()?;

    let plain: Vec<Grid> = grids.iter().map(|g| g.grid.clone()).collect();
    let optimizer = BatchOptimizer::new(BatchOptions::from(config));
    let batch = optimizer.run(&plain)?;

    info!(
        "Optimized {} grid(s) in {:.2}s",
        grids.len(),
        batch.runtime.as_secs_f64()
    );

    Ok(batch
        .ranking
        .iter()
        .map(|o| build_report(o, &grids[o.index], config))
        .collect())
}

fn build_report(outcome: &GridOutcome, named: &NamedGrid, config: &Config) -> SearchReport {
    let best = outcome.result.best();
    SearchReport {
        grid_index: outcome.index,
        grid_name: named.name.clone(),
        phase: outcome.phase,
        top_n: outcome.top_n,
        baseline_rate: baseline_rate(&named.grid, config.rates, config.search.total_buildings),
        best_rate: outcome.best_rate(),
        accumulators: best.map(|s| s.path.clone()).unwrap_or_default(),
        num_solutions: outcome.result.num_solutions(),
        iterations: outcome.result.iterations(),
        elapsed_ms: outcome.result.runtime().as_secs_f64() * 1000.0,
    }
}

/// Applies `solution` to `grid`: its accumulators are placed in order and
/// the remaining building slots are filled with optimally placed power
/// plants.
pub fn final_layout(
    grid: &Grid,
    solution: &SolutionItem,
    rates: PowerRates,
    total_buildings: usize,
) -> PfResult<Grid> {
    let used = grid.placed_buildings() + solution.num_accumulators();
    let power_plants = total_buildings.checked_sub(used).ok_or_else(|| {
        PowerForgeError::Config(format!(
            "total_buildings {} is below the {} buildings of the solution",
            total_buildings, used
        ))
    })?;

    let mut state = GridState::new(grid, rates);
    for node in &solution.path {
        state.place_accumulator(node.coord)?;
    }
    state.commit_optimal_power_plants(power_plants);
    Ok(state.snapshot())
}
