use super::Network;
use crate::{station::StationId, time::SimTime, visit::Visit};
use std::fmt;

/// The four kinds of transition the network can make.
///
/// The declaration order is the tie-break precedence of
/// [`next_event`]: `Arrival < Departure(One) < Departure(Two) <
/// Departure(Three)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    /// External arrival at station 1.
    Arrival,
    /// Service completion at the given station.
    Departure(StationId),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrival => write!(f, "arrival@1"),
            Self::Departure(station) => write!(f, "departure@{station}"),
        }
    }
}

/// An [`Event`] together with the time it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub event: Event,
    pub at: SimTime,
}

/// Select the next event to apply to `network`.
///
/// This is one minimum over all the pending times: the next external
/// arrival (always pending) and the next completion of every busy station.
/// Stations are visited in the order `1, 2, 3` and a candidate only
/// replaces the current choice if it is strictly earlier, so equal times
/// resolve to the first in [`Event`] precedence.
///
/// Exactly one event is returned per call.
pub fn next_event(network: &Network) -> Scheduled {
    let mut next = Scheduled {
        event: Event::Arrival,
        at: network.next_arrival(),
    };

    for id in StationId::ALL {
        if let Some(at) = network.station(id).next_completion()
            && at < next.at
        {
            next = Scheduled {
                event: Event::Departure(id),
                at,
            };
        }
    }

    next
}

/// The outcome of applying one [`Event`] to the [`Network`].
///
/// Handed to the closure of [`Simulation::run_with`] after every step.
///
/// [`Simulation::run_with`]: crate::Simulation::run_with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// The event that was applied.
    pub event: Event,
    /// The clock after the event, i.e. the time the event was due.
    pub at: SimTime,
    /// The visit that completed service, for departures.
    pub departed: Option<Visit>,
    /// The station that received the entity leaving station 1.
    pub routed_to: Option<StationId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        assert!(Event::Arrival < Event::Departure(StationId::One));
        assert!(Event::Departure(StationId::One) < Event::Departure(StationId::Two));
        assert!(Event::Departure(StationId::Two) < Event::Departure(StationId::Three));
    }

    #[test]
    fn display() {
        assert_eq!(Event::Arrival.to_string(), "arrival@1");
        assert_eq!(
            Event::Departure(StationId::Three).to_string(),
            "departure@3"
        );
    }
}
