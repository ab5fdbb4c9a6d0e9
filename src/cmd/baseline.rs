use crate::cmd::GridSource;
use crate::reports;
use clap::Args;
use powerforge::api;
use powerforge::config::Config;
use powerforge::grid::Rate;
use powerforge::PfResult;

#[derive(Args, Debug, Clone)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: GridSource,
}

/// Rate of every grid with power plants only.
pub fn run(args: BaselineArgs, config: Config) -> PfResult<()> {
    let grids = args.source.load()?;
    let rows: Vec<(String, Rate)> = grids
        .iter()
        .map(|g| {
            (
                g.name.clone(),
                api::baseline_rate(&g.grid, config.rates, config.search.total_buildings),
            )
        })
        .collect();
    reports::print_baselines(&rows);
    Ok(())
}
