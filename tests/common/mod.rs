#![allow(dead_code)]

use powerforge::config::PowerRates;
use powerforge::grid::{CellKind, Coord, Grid, COLS, ROWS};
use powerforge::layouts::KnownLayout;

pub const BASE: u64 = 159_653_145;
pub const CRYSTAL: u64 = 79_370_420;
pub const ACCU: u64 = 63_633_182;
pub const BONUS: u64 = 95_791_887;

pub fn rates() -> PowerRates {
    PowerRates::default()
}

/// Builder for grids in tests: starts from a uniform fill and stamps cells.
pub struct GridBuilder {
    rows: Vec<Vec<u32>>,
}

impl GridBuilder {
    pub fn empty() -> Self {
        Self::filled(CellKind::Empty)
    }

    pub fn filled(kind: CellKind) -> Self {
        Self {
            rows: vec![vec![kind.code(); COLS]; ROWS],
        }
    }

    pub fn cell(mut self, row: u8, col: u8, kind: CellKind) -> Self {
        self.rows[row as usize][col as usize] = kind.code();
        self
    }

    pub fn block(mut self, rows: std::ops::Range<u8>, cols: std::ops::Range<u8>, kind: CellKind) -> Self {
        for r in rows {
            for c in cols.clone() {
                self.rows[r as usize][c as usize] = kind.code();
            }
        }
        self
    }

    pub fn build(self) -> Grid {
        Grid::from_codes(&self.rows).expect("test grid must be valid")
    }
}

pub fn scattered() -> Grid {
    KnownLayout::Scattered.grid()
}

pub fn clustered() -> Grid {
    KnownLayout::Clustered.grid()
}

/// Nine free cells in the middle of a silo-filled base.
pub fn pocket() -> Grid {
    GridBuilder::filled(CellKind::Silo)
        .block(2..5, 2..6, CellKind::Empty)
        .cell(3, 3, CellKind::Crystal)
        .cell(2, 5, CellKind::Crystal)
        .cell(4, 2, CellKind::Tiberium)
        .build()
}

/// Exactly one free cell, (0,0), touching two crystals.
pub fn single_cell() -> Grid {
    GridBuilder::filled(CellKind::Silo)
        .cell(0, 0, CellKind::Empty)
        .cell(0, 1, CellKind::Crystal)
        .cell(1, 1, CellKind::Crystal)
        .build()
}

pub fn c(row: u8, col: u8) -> Coord {
    Coord::new(row, col)
}
