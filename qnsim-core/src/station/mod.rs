mod id;

pub use self::id::{StationId, StationIdParseError};
use crate::{time::SimTime, visit::Visit};
use std::collections::VecDeque;

/// A single-server FIFO service facility of the [`Network`].
///
/// The `Station` owns the visits that are waiting or in service and the
/// time of its next service completion. Only the visit at the head of the
/// queue is in service; the others wait in arrival order.
///
/// ## Invariant
///
/// [`next_completion`](Station::next_completion) is `Some` if and only if
/// the queue is not empty. Every method that mutates the queue keeps the
/// two in step: [`push`](Station::push) tells the caller when the station
/// was idle so a completion can be scheduled, [`pop`](Station::pop) clears
/// the completion and the caller reschedules it when visits remain.
///
/// [`Network`]: crate::network::Network
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,

    queue: VecDeque<Visit>,

    /// time of the next service completion, `None` when idle
    next_completion: Option<SimTime>,

    arrivals: u64,
    departures: u64,
}

impl Station {
    pub(crate) fn new(id: StationId) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
            next_completion: None,
            arrivals: 0,
            departures: 0,
        }
    }

    /// Returns the identifier of this station.
    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    /// number of visits waiting or in service
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub fn next_completion(&self) -> Option<SimTime> {
        self.next_completion
    }

    /// Total visits that entered this station.
    #[inline]
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    /// Total visits that completed service at this station.
    #[inline]
    pub fn departures(&self) -> u64 {
        self.departures
    }

    /// The visits currently at the station, head (in service) first.
    pub fn visits(&self) -> impl ExactSizeIterator<Item = &Visit> + '_ {
        self.queue.iter()
    }

    /// Enqueue a new visit entering at `now`.
    ///
    /// Returns `true` if the station was idle before the push, in which case
    /// the caller must schedule the completion of the new head with
    /// [`Station::schedule`].
    pub(crate) fn push(&mut self, now: SimTime) -> bool {
        let was_idle = self.queue.is_empty();
        self.queue.push_back(Visit::new(now));
        self.arrivals += 1;
        was_idle
    }

    /// Complete the service of the head at `now`.
    ///
    /// The completion time is cleared; if visits remain the caller
    /// schedules the next one with [`Station::schedule`].
    pub(crate) fn pop(&mut self, now: SimTime) -> Option<Visit> {
        let visit = self.queue.pop_front()?.depart(now);
        self.departures += 1;
        self.next_completion = None;
        Some(visit)
    }

    /// Set the completion time of the visit at the head of the queue.
    pub(crate) fn schedule(&mut self, at: SimTime) {
        debug_assert!(!self.queue.is_empty(), "scheduling an idle station");
        self.next_completion = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::VisitState;

    fn t(x: f64) -> SimTime {
        SimTime::ZERO.after(x)
    }

    #[test]
    fn new_station_is_idle() {
        let station = Station::new(StationId::Two);
        assert_eq!(station.id(), StationId::Two);
        assert!(station.is_empty());
        assert_eq!(station.next_completion(), None);
    }

    #[test]
    fn push_reports_idle_only_once() {
        let mut station = Station::new(StationId::One);
        assert!(station.push(t(1.0)));
        station.schedule(t(2.0));
        assert!(!station.push(t(1.5)));
        assert_eq!(station.len(), 2);
        assert_eq!(station.arrivals(), 2);
        assert_eq!(station.next_completion(), Some(t(2.0)));
    }

    #[test]
    fn pop_is_fifo_and_clears_completion() {
        let mut station = Station::new(StationId::One);
        station.push(t(1.0));
        station.schedule(t(3.0));
        station.push(t(2.0));

        let visit = station.pop(t(3.0)).unwrap();
        assert_eq!(visit.entry(), t(1.0));
        assert_eq!(visit.state(), VisitState::Departed { at: t(3.0) });
        assert_eq!(station.next_completion(), None);
        assert_eq!(station.len(), 1);
        assert_eq!(station.departures(), 1);

        let head = station.visits().next().unwrap();
        assert_eq!(head.entry(), t(2.0));
    }

    #[test]
    fn pop_empty() {
        let mut station = Station::new(StationId::Three);
        assert!(station.pop(t(1.0)).is_none());
        assert_eq!(station.departures(), 0);
    }
}
