use crate::{
    metrics::Metrics,
    network::{Network, Transition},
    params::NetworkParameters,
    report::Report,
    stats::{NetworkStats, StationStats},
    variate::VariateGenerator,
};
use rand_chacha::ChaChaRng;
use rand_core::Rng;
use tracing::info;

/// The discrete-event simulation engine.
///
/// A [`Simulation`] exclusively owns the [`Network`] state, the
/// [`Metrics`] accumulator and the [`VariateGenerator`] of one run. Each
/// [`step`](Simulation::step) selects the earliest pending event, applies
/// it and records the new state, so a run is exactly
/// [`NetworkParameters::events`] steps.
///
/// Two simulations built with the same parameters and the same seed go
/// through the same sequence of events and produce the same [`Report`].
///
/// # Example
///
/// ```
/// use qnsim_core::{NetworkParameters, Simulation, StationId};
///
/// let params = NetworkParameters::builder().events(1_000).build().unwrap();
/// let mut simulation = Simulation::seeded(params, 42);
/// simulation.run();
///
/// let report = simulation.report();
/// assert_eq!(report.events, 1_000);
/// assert!(report.station(StationId::One).utilization.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<R = ChaChaRng> {
    network: Network,
    metrics: Metrics,
    generator: VariateGenerator<R>,
}

impl Simulation<ChaChaRng> {
    /// Create a simulation drawing from a [`ChaChaRng`] seeded with `seed`.
    pub fn seeded(params: NetworkParameters, seed: u64) -> Self {
        Self::new(params, VariateGenerator::seeded(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation at time `0`: all stations empty and the first
    /// external arrival drawn from `generator`.
    pub fn new(params: NetworkParameters, mut generator: VariateGenerator<R>) -> Self {
        let network = Network::new(params, &mut generator);
        Self {
            network,
            metrics: Metrics::new(),
            generator,
        }
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Number of events processed so far.
    #[inline]
    pub fn events(&self) -> u64 {
        self.metrics.events()
    }

    /// Events left before the run is complete.
    pub fn remaining(&self) -> u64 {
        self.network
            .params()
            .events()
            .saturating_sub(self.metrics.events())
    }

    /// Process exactly one event.
    ///
    /// Can be called past the configured number of events; [`run`] and
    /// [`run_with`] stop at it.
    ///
    /// [`run`]: Simulation::run
    /// [`run_with`]: Simulation::run_with
    pub fn step(&mut self) -> Transition {
        let before = self.network.queue_lengths();
        let transition = self.network.step(&mut self.generator);
        self.metrics
            .record(&transition, before, self.network.queue_lengths());
        transition
    }

    /// Process the remaining events of the run.
    pub fn run(&mut self) {
        self.run_with(|_| {})
    }

    /// Process the remaining events of the run, handing every
    /// [`Transition`] to `handle` in the order it happened.
    pub fn run_with<H>(&mut self, mut handle: H)
    where
        H: FnMut(&Transition),
    {
        let remaining = self.remaining();
        info!(
            events = remaining,
            params = %self.network.params(),
            "simulation started"
        );

        for _ in 0..remaining {
            let transition = self.step();
            handle(&transition);
        }

        info!(
            events = self.metrics.events(),
            clock = %self.network.clock(),
            in_system = self.network.in_system(),
            "simulation completed"
        );
    }

    /// Derive the [`Report`] of the events processed so far.
    pub fn report(&self) -> Report {
        Report::derive(&self.network, &self.metrics)
    }

    /// Returns a point-in-time snapshot of the network state.
    pub fn stats(&self) -> NetworkStats {
        let stations = self
            .network
            .stations()
            .each_ref()
            .map(|station| StationStats {
                id: station.id(),
                queue_length: station.len(),
                next_completion: station.next_completion(),
                arrivals: station.arrivals(),
                departures: station.departures(),
            });

        NetworkStats {
            clock: self.network.clock(),
            next_arrival: self.network.next_arrival(),
            events: self.metrics.events(),
            stations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Event, station::StationId};

    fn params(events: u64) -> NetworkParameters {
        NetworkParameters::builder().events(events).build().unwrap()
    }

    #[test]
    fn runs_exactly_n_events() {
        let mut simulation = Simulation::seeded(params(1_234), 0);
        let mut count = 0u64;
        simulation.run_with(|_| count += 1);
        assert_eq!(count, 1_234);
        assert_eq!(simulation.events(), 1_234);
        assert_eq!(simulation.remaining(), 0);

        // the run is complete, running again does nothing
        simulation.run();
        assert_eq!(simulation.events(), 1_234);
    }

    #[test]
    fn single_event_is_an_arrival() {
        let mut simulation = Simulation::seeded(params(1), 0);
        let mut events = Vec::new();
        simulation.run_with(|transition| events.push(transition.event));
        assert_eq!(events, vec![Event::Arrival]);

        let report = simulation.report();
        assert_eq!(report.events, 1);
        assert!(report.clock > crate::SimTime::ZERO);
        assert_eq!(report.network.mean_response_time, None);
        assert_eq!(report.network.completed_visits, 0);
        assert_eq!(report.network.resident_visits, 1);
        assert!(report.station(StationId::One).mean_number.is_some());
    }

    #[test]
    fn stats_snapshot() {
        let mut simulation = Simulation::seeded(params(100), 9);
        simulation.run();
        let stats = simulation.stats();

        assert_eq!(stats.events, 100);
        assert_eq!(stats.clock, simulation.network().clock());
        assert_eq!(stats.next_arrival, simulation.network().next_arrival());
        for (station, id) in stats.stations.iter().zip(StationId::ALL) {
            assert_eq!(station.id, id);
            assert_eq!(station.queue_length, simulation.network().station(id).len());
            assert_eq!(station.next_completion.is_some(), station.queue_length > 0);
        }
    }

    #[test]
    fn step_matches_run_with() {
        let mut stepped = Simulation::seeded(params(300), 11);
        let by_step: Vec<Transition> = (0..300).map(|_| stepped.step()).collect();

        let mut ran = Simulation::seeded(params(300), 11);
        let mut by_run = Vec::new();
        ran.run_with(|transition| by_run.push(*transition));

        assert_eq!(by_step, by_run);
        assert_eq!(stepped.report(), ran.report());
    }
}
