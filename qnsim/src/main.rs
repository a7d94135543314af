//! Command line front-end of the three-station queueing network simulator.
//!
//! ```bash
//! # reference network, reproducible run
//! qnsim --seed 42
//!
//! # everything at once
//! qnsim --network "lambda=1 mu1=2 p=0.4 mu2=4 mu3=3 events=100000"
//!
//! # follow the run
//! RUST_LOG=qnsim_core=debug qnsim -n 50
//! ```

mod cli;
mod logging;
mod render;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use qnsim_core::{Simulation, StationId};
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(args.log_level)?;

    let params = args.parameters().context("invalid network parameters")?;
    let seed = args.seed();
    info!(%params, seed, "configuration");

    if !params.is_stable() {
        for id in StationId::ALL {
            let load = params.offered_load(id);
            if load >= 1.0 {
                warn!(station = %id, load, "station is saturated, its queue grows without bound");
            }
        }
    }

    let mut simulation = Simulation::seeded(params, seed);
    simulation.run();
    let report = simulation.report();

    print!(
        "{}",
        render::Rendered {
            params: &params,
            seed,
            report: &report,
        }
    );

    Ok(())
}
