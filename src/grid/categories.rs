use super::{CellKind, Coord, GridState, Rate, CELL_COUNT};

/// Empty cells sharing one potential rate, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCategory {
    pub rate: Rate,
    pub coords: Vec<Coord>,
}

impl RateCategory {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Empty cells of a grid grouped by potential rate, best rate first.
#[derive(Debug, Clone, Default)]
pub struct RateCategoryIndex {
    categories: Vec<RateCategory>,
}

impl RateCategoryIndex {
    pub fn build(state: &GridState) -> Self {
        let mut categories: Vec<RateCategory> = Vec::new();

        for idx in 0..CELL_COUNT {
            let coord = Coord::from_index(idx);
            if state.cell(coord) != CellKind::Empty {
                continue;
            }
            let rate = state.potential_rate(coord);
            match categories.iter_mut().find(|cat| cat.rate == rate) {
                Some(cat) => cat.coords.push(coord),
                None => categories.push(RateCategory {
                    rate,
                    coords: vec![coord],
                }),
            }
        }

        // Rates are unique per category, so the order is total.
        categories.sort_unstable_by(|a, b| b.rate.cmp(&a.rate));
        Self { categories }
    }

    pub fn categories(&self) -> &[RateCategory] {
        &self.categories
    }

    /// Number of empty cells covered by the index.
    pub fn cell_count(&self) -> usize {
        self.categories.iter().map(RateCategory::len).sum()
    }

    /// Sum of rates when `power_plants` cells are filled best-first.
    pub fn aggregate_rate(&self, power_plants: usize) -> Rate {
        let mut left = power_plants;
        let mut total: Rate = 0;
        for cat in &self.categories {
            if left == 0 {
                break;
            }
            let take = left.min(cat.len());
            total += cat.rate * take as Rate;
            left -= take;
        }
        total
    }

    /// The cells `aggregate_rate` counts. Whole categories are taken while
    /// they fit; the last one contributes its first cells in row-major order.
    pub fn select(&self, power_plants: usize) -> Vec<Coord> {
        let mut left = power_plants;
        let mut chosen = Vec::with_capacity(power_plants.min(CELL_COUNT));
        for cat in &self.categories {
            if left == 0 {
                break;
            }
            let take = left.min(cat.len());
            chosen.extend_from_slice(&cat.coords[..take]);
            left -= take;
        }
        chosen
    }
}
