use crate::error::PfResult;
use crate::grid::{CellKind, Coord, Grid, CELL_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// A grid as delivered by a layout source, with a label for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedGrid {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "cells")]
    pub grid: Grid,
}

/// On-disk batch of grids: `{"grids": [{"name": "...", "cells": [[...]]}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridFile {
    pub grids: Vec<NamedGrid>,
}

impl GridFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut file: GridFile = serde_json::from_str(&content)?;
        for (i, g) in file.grids.iter_mut().enumerate() {
            if g.name.is_empty() {
                g.name = format!("grid_{}", i);
                warn!("Unnamed grid at position {}, using '{}'", i, g.name);
            }
        }
        Ok(file)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> PfResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Built-in resource layouts for demos and benchmarks.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    /// Six crystal and six tiberium fields spread over the whole base.
    Scattered,
    /// Two crystal clusters in opposite corners.
    Clustered,
}

impl KnownLayout {
    fn resources(&self) -> (&'static [(u8, u8)], &'static [(u8, u8)]) {
        match self {
            Self::Scattered => (
                &[(0, 2), (2, 1), (2, 7), (4, 3), (6, 1), (6, 7)],
                &[(0, 6), (2, 4), (4, 0), (4, 8), (6, 4), (7, 6)],
            ),
            Self::Clustered => (
                &[(1, 1), (1, 2), (2, 1), (5, 6), (5, 7), (6, 7)],
                &[(0, 8), (3, 4), (4, 4), (7, 0), (7, 1), (7, 8)],
            ),
        }
    }

    pub fn grid(&self) -> Grid {
        let (crystal, tiberium) = self.resources();
        let mut cells = [CellKind::Empty; CELL_COUNT];
        for &(r, c) in crystal {
            cells[Coord::new(r, c).index()] = CellKind::Crystal;
        }
        for &(r, c) in tiberium {
            cells[Coord::new(r, c).index()] = CellKind::Tiberium;
        }
        Grid::from_cells(cells)
    }

    pub fn named(&self) -> NamedGrid {
        NamedGrid {
            name: self.to_string(),
            grid: self.grid(),
        }
    }
}

pub fn get_all_layouts() -> Vec<NamedGrid> {
    KnownLayout::iter().map(|l| l.named()).collect()
}
