pub mod categories;
pub mod state;

pub use self::categories::{RateCategory, RateCategoryIndex};
pub use self::state::GridState;

use crate::error::{PfResult, PowerForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const ROWS: usize = 8;
pub const COLS: usize = 9;
pub const CELL_COUNT: usize = ROWS * COLS;

/// Hourly power production.
pub type Rate = u64;

/// Contents of one grid cell. Discriminants are the integer codes used by
/// layout sources; buildings other than accumulators and power plants are
/// opaque to the optimizer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum CellKind {
    Empty = 0,
    Crystal = 1,
    Tiberium = 2,
    Accumulator = 4,
    PowerPlant = 8,
    Harvester = 16,
    Silo = 32,
    Refinery = 64,
    ConstructionYard = 128,
    DefenseHq = 256,
    DefenseFacility = 512,
    CommandCenter = 1024,
    Barracks = 2048,
    Airfield = 4096,
    Factory = 8192,
    Skystrike = 16384,
    IonCannon = 32768,
    FalconSupport = 65536,
}

impl CellKind {
    #[inline(always)]
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        CellKind::iter().find(|k| k.code() == code)
    }

    #[inline(always)]
    pub fn is_resource(self) -> bool {
        matches!(self, CellKind::Crystal | CellKind::Tiberium)
    }

    #[inline(always)]
    pub fn is_building(self) -> bool {
        !matches!(
            self,
            CellKind::Empty | CellKind::Crystal | CellKind::Tiberium
        )
    }

    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Crystal => 'C',
            CellKind::Tiberium => 'T',
            CellKind::Accumulator => 'A',
            CellKind::PowerPlant => 'P',
            _ => '#',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / COLS) as u8,
            col: (idx % COLS) as u8,
        }
    }

    /// Row-major position inside the grid arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    #[inline(always)]
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < ROWS && (self.col as usize) < COLS
    }

    /// The up-to-8 cells of the 3x3 block around `self`, clipped at the grid
    /// border, in row-major order.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        let row = self.row as usize;
        let col = self.col as usize;
        let rows = row.saturating_sub(1)..(row + 2).min(ROWS);
        let cols = col.saturating_sub(1)..(col + 2).min(COLS);
        rows.flat_map(move |r| cols.clone().map(move |c| Coord::new(r as u8, c as u8)))
            .filter(move |c| *c != self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// An immutable 8x9 snapshot as delivered by a layout source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Grid {
    cells: [CellKind; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cells: [CellKind::Empty; CELL_COUNT],
        }
    }

    pub(crate) fn from_cells(cells: [CellKind; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Builds a grid from rows of integer cell codes, rejecting wrong
    /// dimensions and unknown codes.
    pub fn from_codes<R: AsRef<[u32]>>(rows: &[R]) -> PfResult<Self> {
        if rows.len() != ROWS {
            return Err(PowerForgeError::Validation(format!(
                "expected {} rows, got {}",
                ROWS,
                rows.len()
            )));
        }

        let mut grid = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != COLS {
                return Err(PowerForgeError::Validation(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    COLS
                )));
            }
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or_else(|| {
                    PowerForgeError::Validation(format!(
                        "unknown cell code {} at ({},{})",
                        code, r, c
                    ))
                })?;
                grid.cells[r * COLS + c] = kind;
            }
        }
        Ok(grid)
    }

    /// Builds a grid holding only the given resource fields.
    pub fn with_resources(crystals: &[Coord], tiberium: &[Coord]) -> PfResult<Self> {
        let mut grid = Self::empty();
        for (&coord, kind) in crystals
            .iter()
            .map(|c| (c, CellKind::Crystal))
            .chain(tiberium.iter().map(|c| (c, CellKind::Tiberium)))
        {
            grid.set(coord, kind)?;
        }
        Ok(grid)
    }

    pub fn to_codes(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(COLS)
            .map(|row| row.iter().map(|k| k.code()).collect())
            .collect()
    }

    /// # Panics
    ///
    /// If `coord` lies outside the grid; see [`Coord::in_bounds`].
    #[inline(always)]
    pub fn get(&self, coord: Coord) -> CellKind {
        self.cells[coord.index()]
    }

    pub fn set(&mut self, coord: Coord, kind: CellKind) -> PfResult<()> {
        if !coord.in_bounds() {
            return Err(PowerForgeError::Validation(format!(
                "coordinate {} outside the {}x{} grid",
                coord, ROWS, COLS
            )));
        }
        self.cells[coord.index()] = kind;
        Ok(())
    }

    /// Cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &k)| (Coord::from_index(i), k))
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Accumulators and power plants already standing on the grid.
    pub fn placed_buildings(&self) -> usize {
        self.count(CellKind::Accumulator) + self.count(CellKind::PowerPlant)
    }

    pub fn empty_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, k)| *k == CellKind::Empty)
            .map(|(c, _)| c)
            .collect()
    }

    /// Copy of the grid with every building removed, keeping only crystal and
    /// tiberium fields.
    pub fn resources_only(&self) -> Self {
        let mut out = Self::empty();
        for (i, &kind) in self.cells.iter().enumerate() {
            if kind.is_resource() {
                out.cells[i] = kind;
            }
        }
        out
    }
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = PowerForgeError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Grid::from_codes(&rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.to_codes()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(COLS) {
            let line: Vec<String> = row.iter().map(|k| k.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
