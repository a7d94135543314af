//! Running sums observed after every event of a run.
//!
//! The [`Metrics`] accumulator is a plain value owned by the
//! [`Simulation`](crate::Simulation): it is updated in place after each
//! event and handed to [`Report::derive`](crate::Report::derive) once the
//! run is over.

use crate::{network::Transition, time::SimTime};

/// Sum of `f64` with Neumaier compensation.
///
/// The time integrals add up tens of thousands of small products; the
/// compensation keeps the rounding error independent of the run length.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Sum {
    sum: f64,
    compensation: f64,
}

impl Sum {
    pub(crate) fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub(crate) fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Count-weighted and time-weighted running sums of a run.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    events: u64,

    /// Σ queue length of each station, sampled after every event
    total_queue_length: [u64; 3],

    /// Σ (entities in the network after the event) × (time since the
    /// previous event)
    area_in_system: Sum,

    last_event_time: SimTime,

    /// ∫ queue length dt, using the length held during each interval
    queue_area: [Sum; 3],

    /// ∫ 1{station busy} dt
    busy_time: [Sum; 3],

    completed_visits: u64,
    sojourn_total: Sum,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the state after one event.
    ///
    /// `before` and `after` are the queue lengths of the stations (in the
    /// order `1, 2, 3`) right before and right after `transition` was
    /// applied. The interval that just ended is integrated with `before`,
    /// the lengths that held during it; the sampled sums use `after`.
    pub(crate) fn record(&mut self, transition: &Transition, before: [usize; 3], after: [usize; 3]) {
        let elapsed = transition.at.since(self.last_event_time);

        self.events += 1;

        let mut in_system = 0;
        for k in 0..3 {
            self.total_queue_length[k] += after[k] as u64;
            in_system += after[k];

            self.queue_area[k].add(before[k] as f64 * elapsed);
            if before[k] > 0 {
                self.busy_time[k].add(elapsed);
            }
        }
        self.area_in_system.add(in_system as f64 * elapsed);
        self.last_event_time = transition.at;

        if let Some(sojourn) = transition.departed.and_then(|visit| visit.sojourn()) {
            self.completed_visits += 1;
            self.sojourn_total.add(sojourn);
        }
    }

    /// Number of events observed.
    #[inline]
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Σ of the sampled queue lengths of each station.
    #[inline]
    pub fn total_queue_length(&self) -> [u64; 3] {
        self.total_queue_length
    }

    /// The accumulated number-in-system × elapsed-time integral.
    #[inline]
    pub fn area_in_system(&self) -> f64 {
        self.area_in_system.value()
    }

    #[inline]
    pub fn last_event_time(&self) -> SimTime {
        self.last_event_time
    }

    /// ∫ queue length dt of each station.
    pub fn queue_area(&self) -> [f64; 3] {
        self.queue_area.map(|sum| sum.value())
    }

    /// Time each station spent serving.
    pub fn busy_time(&self) -> [f64; 3] {
        self.busy_time.map(|sum| sum.value())
    }

    /// Number of visits that completed service, at any station.
    #[inline]
    pub fn completed_visits(&self) -> u64 {
        self.completed_visits
    }

    /// Σ (departure − entry) over the completed visits.
    #[inline]
    pub fn sojourn_total(&self) -> f64 {
        self.sojourn_total.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Event, station::StationId, visit::Visit};

    fn t(x: f64) -> SimTime {
        SimTime::ZERO.after(x)
    }

    fn arrival(at: f64) -> Transition {
        Transition {
            event: Event::Arrival,
            at: t(at),
            departed: None,
            routed_to: None,
        }
    }

    #[test]
    fn compensated_sum() {
        let mut sum = Sum::default();
        sum.add(1.0);
        for _ in 0..10_000 {
            sum.add(1e-16);
        }
        // a plain sum would have stayed at exactly 1.0
        assert!(sum.value() > 1.0 + 0.9e-12);
        assert!((sum.value() - (1.0 + 1e-12)).abs() < 1e-15);
    }

    #[test]
    fn sampled_sums_use_state_after_event() {
        let mut metrics = Metrics::new();
        metrics.record(&arrival(1.0), [0, 0, 0], [1, 0, 0]);
        metrics.record(&arrival(3.0), [1, 0, 0], [2, 0, 0]);

        assert_eq!(metrics.events(), 2);
        assert_eq!(metrics.total_queue_length(), [3, 0, 0]);
        // 1 × (1 − 0) + 2 × (3 − 1)
        assert_eq!(metrics.area_in_system(), 5.0);
        assert_eq!(metrics.last_event_time(), t(3.0));
    }

    #[test]
    fn time_integrals_use_state_during_interval() {
        let mut metrics = Metrics::new();
        metrics.record(&arrival(1.0), [0, 0, 0], [1, 0, 0]);
        metrics.record(&arrival(3.0), [1, 0, 0], [2, 0, 0]);

        // idle on [0, 1), one entity on [1, 3)
        assert_eq!(metrics.queue_area(), [2.0, 0.0, 0.0]);
        assert_eq!(metrics.busy_time(), [2.0, 0.0, 0.0]);
    }

    #[test]
    fn completed_visits_are_summed() {
        let mut metrics = Metrics::new();
        metrics.record(&arrival(1.0), [0, 0, 0], [1, 0, 0]);

        let departure = Transition {
            event: Event::Departure(StationId::One),
            at: t(2.5),
            departed: Some(Visit::new(t(1.0)).depart(t(2.5))),
            routed_to: Some(StationId::Two),
        };
        metrics.record(&departure, [1, 0, 0], [0, 1, 0]);

        assert_eq!(metrics.completed_visits(), 1);
        assert_eq!(metrics.sojourn_total(), 1.5);
        assert_eq!(metrics.total_queue_length(), [1, 1, 0]);
    }
}
