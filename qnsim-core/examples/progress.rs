//! Long run stepped one event at a time, with a progress bar.
//!
//! Run with:
//!   cargo run --release --example progress -p qnsim-core

use anyhow::Result;
use indicatif::ProgressBar;
use qnsim_core::{NetworkParameters, Simulation, StationId};

const EVENTS: u64 = 5_000_000;
const CHUNK: u64 = 10_000;

fn main() -> Result<()> {
    let params = NetworkParameters::builder().events(EVENTS).build()?;
    let mut simulation = Simulation::seeded(params, 42);

    let pb = ProgressBar::new(EVENTS);
    while simulation.remaining() > 0 {
        for _ in 0..CHUNK.min(simulation.remaining()) {
            simulation.step();
        }
        pb.inc(CHUNK);
    }
    pb.finish_with_message("simulation completed");

    let report = simulation.report();
    for id in StationId::ALL {
        let station = report.station(id);
        println!(
            "station {id}: utilization {:.4} (offered {:.4}), time-average length {:.4}",
            station.utilization.unwrap_or(f64::NAN),
            params.offered_load(id),
            station.time_average_number.unwrap_or(f64::NAN),
        );
    }

    Ok(())
}
