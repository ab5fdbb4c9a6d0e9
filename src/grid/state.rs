use super::{CellKind, Coord, Grid, Rate, RateCategoryIndex, CELL_COUNT};
use crate::config::PowerRates;
use crate::error::{PfResult, PowerForgeError};

/// Mutable grid with incrementally maintained adjacency counts.
///
/// Every cell carries the number of crystal and accumulator fields among its
/// neighbors plus the rate a power plant would produce there. Placing or
/// removing an accumulator touches at most eight neighbor entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    cells: [CellKind; CELL_COUNT],
    adjacent_crystal: [u8; CELL_COUNT],
    adjacent_accu: [u8; CELL_COUNT],
    potential_rate: [Rate; CELL_COUNT],
    rates: PowerRates,
}

impl GridState {
    pub fn new(grid: &Grid, rates: PowerRates) -> Self {
        let mut state = Self {
            cells: [CellKind::Empty; CELL_COUNT],
            adjacent_crystal: [0; CELL_COUNT],
            adjacent_accu: [0; CELL_COUNT],
            potential_rate: [0; CELL_COUNT],
            rates,
        };

        for (coord, kind) in grid.iter() {
            state.cells[coord.index()] = kind;
            match kind {
                CellKind::Crystal => {
                    for n in coord.neighbors() {
                        state.adjacent_crystal[n.index()] += 1;
                    }
                }
                CellKind::Accumulator => {
                    for n in coord.neighbors() {
                        state.adjacent_accu[n.index()] += 1;
                    }
                }
                _ => {}
            }
        }

        for idx in 0..CELL_COUNT {
            state.refresh_rate(idx);
        }
        state
    }

    #[inline(always)]
    fn refresh_rate(&mut self, idx: usize) {
        self.potential_rate[idx] = self
            .rates
            .power_rate(self.adjacent_crystal[idx], self.adjacent_accu[idx]);
    }

    pub fn place_accumulator(&mut self, coord: Coord) -> PfResult<()> {
        if !coord.in_bounds() || self.cells[coord.index()] != CellKind::Empty {
            return Err(PowerForgeError::Precondition(format!(
                "cannot place accumulator at {}: cell is not empty",
                coord
            )));
        }
        self.cells[coord.index()] = CellKind::Accumulator;
        for n in coord.neighbors() {
            let idx = n.index();
            self.adjacent_accu[idx] += 1;
            self.refresh_rate(idx);
        }
        Ok(())
    }

    pub fn remove_accumulator(&mut self, coord: Coord) -> PfResult<()> {
        if !coord.in_bounds() || self.cells[coord.index()] != CellKind::Accumulator {
            return Err(PowerForgeError::Precondition(format!(
                "cannot remove accumulator at {}: cell holds no accumulator",
                coord
            )));
        }
        self.cells[coord.index()] = CellKind::Empty;
        for n in coord.neighbors() {
            let idx = n.index();
            self.adjacent_accu[idx] -= 1;
            self.refresh_rate(idx);
        }
        Ok(())
    }

    /// Cells without resource or building, row-major.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == CellKind::Empty)
            .map(|(i, _)| Coord::from_index(i))
            .collect()
    }

    /// Total output if `power_plants` plants were put on the best empty cells.
    /// Does not modify the grid.
    pub fn aggregate_rate_for_power_plants(&self, power_plants: usize) -> Rate {
        if power_plants == 0 {
            return 0;
        }
        RateCategoryIndex::build(self).aggregate_rate(power_plants)
    }

    /// Current output of the power plants already standing on the grid,
    /// including the boost of any adjacent accumulators.
    pub fn standing_power_rate(&self) -> Rate {
        self.cells
            .iter()
            .zip(self.potential_rate.iter())
            .filter(|(k, _)| **k == CellKind::PowerPlant)
            .map(|(_, &rate)| rate)
            .sum()
    }

    /// Whole-base output: standing plants plus `power_plants` new ones on
    /// the best empty cells.
    pub fn base_rate_with_power_plants(&self, power_plants: usize) -> Rate {
        self.standing_power_rate() + self.aggregate_rate_for_power_plants(power_plants)
    }

    /// Places power plants on the cells `aggregate_rate_for_power_plants`
    /// would pick and returns them.
    pub fn commit_optimal_power_plants(&mut self, power_plants: usize) -> Vec<Coord> {
        let chosen = RateCategoryIndex::build(self).select(power_plants);
        for coord in &chosen {
            self.cells[coord.index()] = CellKind::PowerPlant;
        }
        chosen
    }

    // Accessors index the cell arrays directly and panic on a coordinate
    // outside the grid; check `Coord::in_bounds` for untrusted input.

    #[inline(always)]
    pub fn cell(&self, coord: Coord) -> CellKind {
        self.cells[coord.index()]
    }

    #[inline(always)]
    pub fn potential_rate(&self, coord: Coord) -> Rate {
        self.potential_rate[coord.index()]
    }

    #[inline(always)]
    pub fn adjacent_crystals(&self, coord: Coord) -> u8 {
        self.adjacent_crystal[coord.index()]
    }

    #[inline(always)]
    pub fn adjacent_accumulators(&self, coord: Coord) -> u8 {
        self.adjacent_accu[coord.index()]
    }

    pub fn potential_rates(&self) -> &[Rate; CELL_COUNT] {
        &self.potential_rate
    }

    pub fn accumulator_counts(&self) -> &[u8; CELL_COUNT] {
        &self.adjacent_accu
    }

    pub fn crystal_counts(&self) -> &[u8; CELL_COUNT] {
        &self.adjacent_crystal
    }

    pub fn rates(&self) -> &PowerRates {
        &self.rates
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    pub fn snapshot(&self) -> Grid {
        Grid::from_cells(self.cells)
    }
}

impl From<&Grid> for GridState {
    fn from(grid: &Grid) -> Self {
        GridState::new(grid, PowerRates::default())
    }
}
