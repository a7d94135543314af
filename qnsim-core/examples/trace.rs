//! Print the first events of a run as they are applied.
//!
//! Run with:
//!   cargo run --example trace -p qnsim-core

use anyhow::Result;
use qnsim_core::{NetworkParameters, Simulation};

fn main() -> Result<()> {
    let params: NetworkParameters = "lambda=1 mu1=2 p=0.4 mu2=4 mu3=3 events=20".parse()?;
    let mut simulation = Simulation::seeded(params, 1);

    simulation.run_with(|transition| {
        let routed = transition
            .routed_to
            .map(|station| format!(" -> {station}"))
            .unwrap_or_default();
        let sojourn = transition
            .departed
            .and_then(|visit| visit.sojourn())
            .map(|sojourn| format!(" (stayed {sojourn:.3})"))
            .unwrap_or_default();
        println!(
            "[{at:>8.3}] {event}{routed}{sojourn}",
            at = transition.at.into_f64(),
            event = transition.event,
        );
    });

    let stats = simulation.stats();
    for station in stats.stations {
        println!(
            "station {}: {} in queue, next completion {:?}",
            station.id,
            station.queue_length,
            station.next_completion.map(|at| at.into_f64())
        );
    }

    Ok(())
}
