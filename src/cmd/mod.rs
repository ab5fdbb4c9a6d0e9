pub mod baseline;
pub mod search;

use clap::Args;
use powerforge::layouts::{get_all_layouts, GridFile, KnownLayout, NamedGrid};
use powerforge::PfResult;
use tracing::info;

/// Where the grids of a run come from. Without any flag every built-in
/// sample layout is used.
#[derive(Args, Debug, Clone)]
pub struct GridSource {
    /// JSON file with a `grids` array
    #[arg(short, long, conflicts_with = "sample")]
    pub grids: Option<String>,

    /// Built-in layout name (scattered, clustered)
    #[arg(short, long)]
    pub sample: Option<KnownLayout>,

    /// Drop pre-placed buildings and keep only crystal and tiberium fields
    #[arg(long, default_value_t = false)]
    pub resources_only: bool,
}

impl GridSource {
    pub fn load(&self) -> PfResult<Vec<NamedGrid>> {
        let mut grids = if let Some(path) = &self.grids {
            info!("📂 Loading grids from: {}", path);
            GridFile::load_from_file(path)?.grids
        } else if let Some(layout) = self.sample {
            vec![layout.named()]
        } else {
            get_all_layouts()
        };

        if self.resources_only {
            for g in &mut grids {
                g.grid = g.grid.resources_only();
            }
        }
        Ok(grids)
    }
}
