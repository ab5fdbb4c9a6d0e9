use crate::error::{PfResult, PowerForgeError};
use crate::grid::Rate;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub rates: PowerRates,
}

impl Config {
    pub fn validate(&self) -> PfResult<()> {
        self.search.validate()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Accumulators plus power plants to place on every grid
    #[arg(long, default_value_t = 38)]
    pub total_buildings: usize,

    /// Distinct score ranks explored per recursion level
    #[arg(long, default_value_t = 1)]
    pub top_n: usize,

    /// Grids whose narrow-search best exceeds this rate get a second,
    /// wider pass with --top-n. 0 disables the second pass.
    #[arg(long, default_value_t = 0)]
    pub two_phase_threshold: Rate,

    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            total_buildings: 38,
            top_n: 1,
            two_phase_threshold: 0,
            threads: None,
        }
    }
}

impl SearchParams {
    #[inline]
    pub fn is_two_phase(&self) -> bool {
        self.two_phase_threshold > 0 && self.top_n > 1
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.top_n == 0 {
            return Err(PowerForgeError::Config(
                "top_n must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(PowerForgeError::Config(
                "threads must be at least 1 when given".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hourly production constants of a power plant.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRates {
    /// Output of a power plant with no crystal and no accumulator nearby
    #[arg(long, default_value_t = 159_653_145)]
    pub base_rate: Rate,

    /// Added per adjacent crystal field
    #[arg(long, default_value_t = 79_370_420)]
    pub crystal_rate: Rate,

    /// Added per adjacent accumulator
    #[arg(long, default_value_t = 63_633_182)]
    pub accu_rate: Rate,

    /// Added once if at least one accumulator is adjacent
    #[arg(long, default_value_t = 95_791_887)]
    pub accu_bonus: Rate,
}

impl Default for PowerRates {
    fn default() -> Self {
        Self {
            base_rate: 159_653_145,
            crystal_rate: 79_370_420,
            accu_rate: 63_633_182,
            accu_bonus: 95_791_887,
        }
    }
}

impl PowerRates {
    #[inline(always)]
    pub fn power_rate(&self, crystals: u8, accus: u8) -> Rate {
        let bonus = if accus > 0 { self.accu_bonus } else { 0 };
        self.base_rate
            + crystals as Rate * self.crystal_rate
            + accus as Rate * self.accu_rate
            + bonus
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn merge_from_cli(&mut self, cli_rates: &PowerRates, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_rates.$field;
                }
            };
        }

        update_if_present!(base_rate);
        update_if_present!(crystal_rate);
        update_if_present!(accu_rate);
        update_if_present!(accu_bonus);
    }
}
