use crate::time::SimTime;

/// Where a [`Visit`] is in its lifecycle at one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// The visit is waiting or, at the head of the queue, being served.
    Queued,
    /// Service completed at the given time.
    Departed { at: SimTime },
}

/// One entity's stay at one station.
///
/// A visit is created when an entity enters a station (an external
/// arrival at station 1, or a routed arrival at station 2 or 3) and is
/// finalised when the entity leaves that station. The departure time is
/// carried by [`VisitState::Departed`] so it can never be read before it is
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    entry: SimTime,
    state: VisitState,
}

impl Visit {
    pub(crate) fn new(entry: SimTime) -> Self {
        Self {
            entry,
            state: VisitState::Queued,
        }
    }

    /// finalise the visit at `at`.
    ///
    /// `at` is the clock at the moment of the departure and can not be
    /// before the entry: the clock never goes backward.
    #[must_use = "function does not modify the current value"]
    pub(crate) fn depart(self, at: SimTime) -> Self {
        debug_assert!(at >= self.entry, "departure before entry");
        Self {
            entry: self.entry,
            state: VisitState::Departed { at },
        }
    }

    #[inline]
    pub fn entry(&self) -> SimTime {
        self.entry
    }

    #[inline]
    pub fn state(&self) -> VisitState {
        self.state
    }

    #[inline]
    pub fn departure(&self) -> Option<SimTime> {
        match self.state {
            VisitState::Queued => None,
            VisitState::Departed { at } => Some(at),
        }
    }

    /// Time spent at the station, `None` while the visit is still queued.
    pub fn sojourn(&self) -> Option<f64> {
        self.departure().map(|at| at.since(self.entry))
    }

    /// Time spent at the station, counting a queued visit as if it left
    /// at `now`.
    pub fn censored_sojourn(&self, now: SimTime) -> f64 {
        self.departure().unwrap_or(now).since(self.entry)
    }
}
