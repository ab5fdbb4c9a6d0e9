pub mod ranking;
pub mod result;
pub mod runner;

pub use self::result::{PathNode, SearchResult, SolutionItem};

use crate::config::PowerRates;
use crate::error::PfResult;
use crate::grid::{Grid, GridState, CELL_COUNT};
use tracing::debug;

/// Depth-first search over accumulator placements on a single grid.
///
/// The search owns its `GridState` and mutates it in place: every tentative
/// accumulator is placed and removed again before the step returns, so the
/// state is unchanged between searches and the engine can be reused with a
/// different breadth.
pub struct DfsSearch {
    state: GridState,
}

impl DfsSearch {
    pub fn new(grid: &Grid, rates: PowerRates) -> Self {
        Self {
            state: GridState::new(grid, rates),
        }
    }

    pub fn from_state(state: GridState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Searches placements of up to `total_buildings` accumulators, filling
    /// the remaining slots with power plants on the best free cells.
    ///
    /// `top_n` is the number of distinct score ranks followed at every level.
    /// A branch is only extended while each new accumulator strictly raises
    /// the rate over the previous one, which keeps the search tractable but
    /// does not guarantee the global optimum.
    pub fn find_best_power(&mut self, top_n: usize, total_buildings: usize) -> PfResult<SearchResult> {
        let mut result = SearchResult::new();

        let baseline = self.state.base_rate_with_power_plants(total_buildings);

        let mut path = Vec::with_capacity(total_buildings.min(CELL_COUNT));
        self.search_recursive(&mut result, &mut path, top_n, total_buildings)?;

        // Offered last so placements tying the baseline are reported first
        result.offer(baseline, &[]);
        result.finish();

        debug!(
            "Search top_n={} buildings={}: best {:?}/h, {} solution(s), {} iterations, {:.3}s",
            top_n,
            total_buildings,
            result.best_rate(),
            result.num_solutions(),
            result.iterations(),
            result.runtime().as_secs_f64()
        );
        Ok(result)
    }

    fn search_recursive(
        &mut self,
        result: &mut SearchResult,
        path: &mut Vec<PathNode>,
        top_n: usize,
        total_buildings: usize,
    ) -> PfResult<()> {
        result.inc_iterations();

        let depth = path.len();
        if depth >= total_buildings {
            return Ok(());
        }
        let power_plants = total_buildings - 1 - depth;

        // 1. Score every free cell as the next accumulator
        let empty = self.state.empty_cells();
        let mut candidates = Vec::with_capacity(empty.len());
        for coord in empty {
            self.state.place_accumulator(coord)?;
            let power_rate = self.state.base_rate_with_power_plants(power_plants);
            self.state.remove_accumulator(coord)?;
            candidates.push(PathNode { coord, power_rate });
        }

        // 2. Follow the best ranks
        for node in ranking::select_top_ranks(candidates, top_n, |n| n.power_rate) {
            self.state.place_accumulator(node.coord)?;
            path.push(node);

            result.offer(node.power_rate, path);

            let len = path.len();
            let improving = len == 1 || path[len - 1].power_rate > path[len - 2].power_rate;
            if improving && len < total_buildings {
                self.search_recursive(result, path, top_n, total_buildings)?;
            }

            self.state.remove_accumulator(node.coord)?;
            path.pop();
        }

        Ok(())
    }
}
