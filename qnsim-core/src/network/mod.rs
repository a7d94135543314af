mod event;

use crate::{
    params::NetworkParameters,
    station::{Station, StationId},
    time::SimTime,
    variate::VariateGenerator,
};
use rand_core::Rng;
use tracing::{debug, trace};

pub use self::event::{Event, Scheduled, Transition, next_event};

/// The mutable state of the queueing network.
///
/// The [`Network`] holds the three [`Station`]s, the time of the next
/// external arrival and the simulation clock. It applies one [`Event`] at a
/// time and schedules the follow-on events that event implies:
///
/// ```text
///   external arrivals (λ₁)
///          │
///          ▼
///   [ station 1 (μ₁) ] ──── p ────► [ station 2 (μ₂) ] ──► out
///          │
///          └────────── 1 − p ─────► [ station 3 (μ₃) ] ──► out
/// ```
///
/// The network never reads the wall clock or draws from an ambient random
/// source: every duration and routing decision comes from the
/// [`VariateGenerator`] passed to [`apply`](Network::apply).
///
/// See [`Simulation`](crate::Simulation) for the loop that drives it.
#[derive(Debug, Clone)]
pub struct Network {
    params: NetworkParameters,

    stations: [Station; 3],

    /// time of the next external arrival at station 1
    ///
    /// Arrivals never stop so this is always set.
    next_arrival: SimTime,

    /// the simulation's "now", never decreases
    clock: SimTime,
}

impl Network {
    /// Create an empty network at time `0` with its first arrival scheduled.
    pub fn new<R: Rng>(params: NetworkParameters, generator: &mut VariateGenerator<R>) -> Self {
        let next_arrival = SimTime::ZERO.after(generator.exponential(params.arrival_rate()));

        Self {
            params,
            stations: StationId::ALL.map(Station::new),
            next_arrival,
            clock: SimTime::ZERO,
        }
    }

    #[inline]
    pub fn params(&self) -> &NetworkParameters {
        &self.params
    }

    #[inline]
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    #[inline]
    pub fn next_arrival(&self) -> SimTime {
        self.next_arrival
    }

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    /// The stations in the order `1, 2, 3`.
    #[inline]
    pub fn stations(&self) -> &[Station; 3] {
        &self.stations
    }

    /// The queue length of every station, in the order `1, 2, 3`.
    pub fn queue_lengths(&self) -> [usize; 3] {
        self.stations.each_ref().map(Station::len)
    }

    /// Number of entities anywhere in the network.
    pub fn in_system(&self) -> usize {
        self.stations.iter().map(Station::len).sum()
    }

    /// Apply the earliest pending event, as selected by [`next_event`].
    ///
    /// The clock moves to the time of that event and never decreases.
    pub fn step<R: Rng>(&mut self, generator: &mut VariateGenerator<R>) -> Transition {
        let next = next_event(self);
        self.apply(next, generator)
    }

    /// `next` must be the result of [`next_event`] on the current state.
    pub(crate) fn apply<R: Rng>(
        &mut self,
        next: Scheduled,
        generator: &mut VariateGenerator<R>,
    ) -> Transition {
        debug_assert_eq!(next, next_event(self), "event applied out of order");
        debug_assert!(next.at >= self.clock, "clock going backward");

        self.clock = next.at;
        trace!(clock = %self.clock, event = %next.event, "apply");

        match next.event {
            Event::Arrival => self.arrive(generator),
            Event::Departure(id) => self.depart(id, generator),
        }
    }

    fn arrive<R: Rng>(&mut self, generator: &mut VariateGenerator<R>) -> Transition {
        self.enter(StationId::One, generator);

        self.next_arrival = self
            .clock
            .after(generator.exponential(self.params.arrival_rate()));

        Transition {
            event: Event::Arrival,
            at: self.clock,
            departed: None,
            routed_to: None,
        }
    }

    fn depart<R: Rng>(&mut self, id: StationId, generator: &mut VariateGenerator<R>) -> Transition {
        let now = self.clock;
        let departed = self.stations[id.index()].pop(now);
        debug_assert!(departed.is_some(), "departure from idle station {id}");

        let routed_to = if id == StationId::One {
            let destination = self.params.routing().route(generator.uniform());
            debug!(clock = %now, %destination, "route");
            self.enter(destination, generator);
            Some(destination)
        } else {
            None
        };

        if self.stations[id.index()].is_busy() {
            self.schedule_completion(id, generator);
        }

        Transition {
            event: Event::Departure(id),
            at: now,
            departed,
            routed_to,
        }
    }

    /// push a new visit on `id`, starting its service if the station was idle
    fn enter<R: Rng>(&mut self, id: StationId, generator: &mut VariateGenerator<R>) {
        if self.stations[id.index()].push(self.clock) {
            self.schedule_completion(id, generator);
        }
    }

    fn schedule_completion<R: Rng>(&mut self, id: StationId, generator: &mut VariateGenerator<R>) {
        let at = self
            .clock
            .after(generator.exponential(self.params.service_rate(id)));
        debug!(station = %id, %at, "schedule completion");
        self.stations[id.index()].schedule(at);
    }
}
