//! Simulation observability types.
//!
//! [`NetworkStats`] provides a point-in-time snapshot of the network state.
//! Obtain one via [`Simulation::stats`](crate::Simulation::stats).

use crate::{station::StationId, time::SimTime};

/// Snapshot of a single station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationStats {
    /// The station's identifier.
    pub id: StationId,
    /// Visits waiting or in service.
    pub queue_length: usize,
    /// Scheduled completion of the visit in service, `None` when idle.
    pub next_completion: Option<SimTime>,
    /// Visits that entered the station so far.
    pub arrivals: u64,
    /// Visits that left the station so far.
    pub departures: u64,
}

/// Point-in-time snapshot of the whole network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStats {
    /// The simulation clock.
    pub clock: SimTime,
    /// Time of the next external arrival.
    pub next_arrival: SimTime,
    /// Events processed so far.
    pub events: u64,
    /// Per-station statistics, in the order `1, 2, 3`.
    pub stations: [StationStats; 3],
}
