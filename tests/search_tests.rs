mod common;

use common::*;
use powerforge::config::PowerRates;
use powerforge::grid::{CellKind, Grid, GridState};
use powerforge::optimizer::{DfsSearch, PathNode, SearchResult};
use rstest::rstest;

fn search(grid: &Grid, top_n: usize, total: usize) -> SearchResult {
    let mut engine = DfsSearch::new(grid, rates());
    engine.find_best_power(top_n, total).unwrap()
}

fn assert_strictly_increasing(path: &[PathNode]) {
    for w in path.windows(2) {
        assert!(w[1].power_rate > w[0].power_rate, "path not improving: {:?}", path);
    }
}

#[rstest]
#[case::scattered_narrow(scattered(), 1, 38, 13_178_226_716, 18, 2)]
#[case::scattered_wide(scattered(), 2, 38, 13_226_122_660, 2737, 30)]
#[case::clustered_narrow(clustered(), 1, 38, 12_638_371_014, 604, 2)]
fn test_known_layouts(
    #[case] grid: Grid,
    #[case] top_n: usize,
    #[case] total: usize,
    #[case] best: u64,
    #[case] iterations: u64,
    #[case] solutions: usize,
) {
    println!("=== TEST: top_n={} total={} ===", top_n, total);
    let result = search(&grid, top_n, total);

    assert_eq!(result.best_rate(), Some(best));
    assert_eq!(result.iterations(), iterations);
    assert_eq!(result.num_solutions(), solutions);
    for sol in result.solutions() {
        assert_eq!(sol.power_rate, best);
        assert_eq!(sol.num_accumulators(), 8);
        assert_strictly_increasing(&sol.path);
    }
    println!("✅ {}", result);
}

#[test]
fn test_scattered_best_path() {
    let result = search(&scattered(), 1, 38);
    let best = result.best().unwrap();

    let expected = [
        (4, 1, 10_277_329_068),
        (4, 5, 11_075_594_795),
        (2, 3, 11_681_592_519),
        (4, 7, 12_271_168_776),
        (1, 7, 12_829_954_785),
        (2, 5, 13_052_784_961),
        (2, 2, 13_131_927_306),
        (6, 2, 13_178_226_716),
    ];
    let got: Vec<(u8, u8, u64)> = best
        .path
        .iter()
        .map(|n| (n.coord.row, n.coord.col, n.power_rate))
        .collect();
    assert_eq!(got, expected);

    let gains = best.gains(9_400_377_150);
    assert_eq!(gains[0], 10_277_329_068 - 9_400_377_150);
    assert!(gains.iter().all(|&g| g > 0));
}

#[rstest]
#[case(1, 2)]
#[case(2, 3)]
#[case(3, 5)]
fn test_pocket_grid(#[case] top_n: usize, #[case] iterations: u64) {
    let result = search(&pocket(), top_n, 6);
    assert_eq!(result.best_rate(), Some(2_071_613_590));
    assert_eq!(result.iterations(), iterations);
    assert_eq!(result.num_solutions(), 1);
    assert_eq!(result.best().unwrap().accumulators(), vec![c(3, 4)]);
}

/// Exhaustive check over every accumulator subset of the pocket grid.
#[test]
fn test_pocket_grid_matches_brute_force() {
    let grid = pocket();
    let total = 6;
    let mut state = GridState::new(&grid, rates());
    let empty = state.empty_cells();

    let mut best = state.aggregate_rate_for_power_plants(total);
    for mask in 1u32..(1 << empty.len()) {
        let chosen: Vec<_> = (0..empty.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| empty[i])
            .collect();
        if chosen.len() > total {
            continue;
        }
        for &coord in &chosen {
            state.place_accumulator(coord).unwrap();
        }
        best = best.max(state.aggregate_rate_for_power_plants(total - chosen.len()));
        for &coord in &chosen {
            state.remove_accumulator(coord).unwrap();
        }
    }

    assert_eq!(best, 2_071_613_590);
    assert_eq!(search(&grid, 3, total).best_rate(), Some(best));
}

#[test]
fn test_single_empty_cell_keeps_baseline() {
    let result = search(&single_cell(), 1, 3);
    assert_eq!(result.iterations(), 2);
    assert_eq!(result.num_solutions(), 1);

    let only = &result.solutions()[0];
    assert_eq!(only.power_rate, 318_393_985);
    assert_eq!(only.power_rate, BASE + 2 * CRYSTAL);
    assert!(only.path.is_empty());
}

#[test]
fn test_no_empty_cells() {
    let grid = GridBuilder::filled(CellKind::Silo).build();
    let result = search(&grid, 2, 10);
    assert_eq!(result.best_rate(), Some(0));
    assert_eq!(result.iterations(), 1);
    assert!(result.best().unwrap().path.is_empty());
}

#[test]
fn test_zero_buildings() {
    let result = search(&scattered(), 1, 0);
    assert_eq!(result.best_rate(), Some(0));
    assert_eq!(result.iterations(), 1);
}

#[test]
fn test_state_restored_after_search() {
    let grid = scattered();
    let mut engine = DfsSearch::new(&grid, rates());
    let before = engine.state().clone();

    engine.find_best_power(2, 38).unwrap();
    assert_eq!(engine.state(), &before);

    // Engine is reusable and deterministic
    let again = engine.find_best_power(1, 38).unwrap();
    assert_eq!(again.best_rate(), Some(13_178_226_716));
    assert_eq!(again.iterations(), 18);
}

#[test]
fn test_wider_search_never_worse() {
    for (grid, total) in [(scattered(), 38), (pocket(), 6), (clustered(), 12)] {
        let narrow = search(&grid, 1, total).best_rate().unwrap();
        let wide = search(&grid, 2, total).best_rate().unwrap();
        assert!(wide >= narrow);
    }
}

#[test]
fn test_small_budget() {
    let result = search(&scattered(), 1, 4);
    assert_eq!(result.best_rate(), Some(1_433_457_162));
    assert_eq!(result.iterations(), 2);
    assert_eq!(result.best().unwrap().accumulators(), vec![c(2, 2)]);
}

#[test]
fn test_placements_tying_baseline_come_first() {
    let flat = PowerRates {
        base_rate: 2,
        crystal_rate: 0,
        accu_rate: 1,
        accu_bonus: 1,
    };
    let mut engine = DfsSearch::new(&Grid::empty(), flat);
    let result = engine.find_best_power(1, 2).unwrap();

    // 72 single accumulators each match the plain 2-plant output
    assert_eq!(result.best_rate(), Some(4));
    assert_eq!(result.num_solutions(), 73);
    assert_eq!(result.best().unwrap().accumulators(), vec![c(0, 0)]);
    assert!(result.solutions().last().unwrap().path.is_empty());
}

#[test]
fn test_standing_plants_count_towards_score() {
    let grid = GridBuilder::empty()
        .cell(0, 0, CellKind::PowerPlant)
        .cell(0, 2, CellKind::PowerPlant)
        .cell(1, 1, CellKind::PowerPlant)
        .build();

    // No slot left: the base still runs its plant
    let lone = GridBuilder::empty().cell(0, 0, CellKind::PowerPlant).build();
    let result = search(&lone, 1, 0);
    assert_eq!(result.best_rate(), Some(BASE));

    // One slot: an accumulator touching all three plants beats a fourth plant
    let result = search(&grid, 1, 1);
    assert_eq!(result.best_rate(), Some(3 * (BASE + ACCU + BONUS)));
    assert_eq!(result.best().unwrap().accumulators(), vec![c(0, 1)]);
    assert_eq!(result.iterations(), 1);
}
