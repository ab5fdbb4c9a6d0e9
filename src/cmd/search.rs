use crate::cmd::GridSource;
use crate::reports;
use clap::Args;
use powerforge::api::{self, SearchReport};
use powerforge::config::Config;
use powerforge::layouts::NamedGrid;
use powerforge::optimizer::SolutionItem;
use powerforge::PfResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: GridSource,

    /// Print the reports as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SearchArgs, config: Config) -> PfResult<()> {
    let grids = args.source.load()?;
    info!(
        "🔥 Optimizing {} grid(s), top_n={}, {} buildings",
        grids.len(),
        config.search.top_n,
        config.search.total_buildings
    );

    let reports = api::optimize_grids(&grids, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    reports::print_ranking(&reports);

    if let Some(winner) = reports.first() {
        print_winner(winner, &grids[winner.grid_index], &config)?;
    }
    Ok(())
}

fn print_winner(report: &SearchReport, named: &NamedGrid, config: &Config) -> PfResult<()> {
    println!(
        "\n🏆 Best grid: {} with {}/h ({} accumulator(s))",
        report.grid_name,
        report.best_rate,
        report.accumulators.len()
    );
    let solution = SolutionItem {
        power_rate: report.best_rate,
        path: report.accumulators.clone(),
    };
    if solution.num_accumulators() > 0 {
        reports::print_path(&solution, report.baseline_rate);
    }

    let layout = api::final_layout(
        &named.grid,
        &solution,
        config.rates,
        config.search.total_buildings,
    )?;
    reports::print_grid(&report.grid_name, &layout);
    Ok(())
}
