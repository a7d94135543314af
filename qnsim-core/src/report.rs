//! Performance measures derived at the end of a run.
//!
//! [`Report::derive`] is a pure function of the final [`Network`] and the
//! [`Metrics`] accumulated along the run. Every average whose denominator
//! can be zero is an `Option<f64>`: `None` means the measure is undefined
//! for this run (no simulated time elapsed, no event processed, no visit
//! completed) rather than a `NaN` or an infinity.
//!
//! ## Per station
//!
//! With `S_k` the sum of the queue lengths of station `k` sampled after every
//! event, `T` the final clock and `N` the number of events:
//!
//! | measure | formula |
//! |---------|---------|
//! | `mean_number` (L) | `S_k / T` |
//! | `mean_queued` (LQ) | `L − λ_k / μ_k` |
//! | `mean_time` (W) | `S_k / N` |
//! | `mean_wait` (WQ) | `W − 1 / μ_k` |
//! | `traffic_intensity` | `L / μ_k` |
//! | `utilization` | busy time of `k` / `T` |
//! | `time_average_number` | `∫ length_k dt / T` |
//!
//! `λ_k` is the effective arrival rate of the station, see
//! [`NetworkParameters::effective_arrival_rate`].
//!
//! ## Response time
//!
//! Visits still at a station when the run stops have no departure time.
//! They are left out of [`NetworkReport::mean_response_time`], which only
//! averages completed visits. [`NetworkReport::censored_mean_response_time`]
//! counts them as if they left at the final clock.
//!
//! [`NetworkParameters::effective_arrival_rate`]: crate::NetworkParameters::effective_arrival_rate

use crate::{metrics::Metrics, network::Network, station::StationId, time::SimTime};

/// Measures of one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationReport {
    pub station: StationId,
    /// Σ of the queue lengths sampled after every event.
    pub observations: u64,
    /// Visits that entered the station.
    pub arrivals: u64,
    /// Visits that completed service at the station.
    pub departures: u64,
    /// L, the sampled length sum over the elapsed time.
    pub mean_number: Option<f64>,
    /// LQ, `L` minus the mean number in service given by Little's law.
    pub mean_queued: Option<f64>,
    /// W, the sampled length sum per event.
    pub mean_time: Option<f64>,
    /// WQ, `W` minus the mean service time.
    pub mean_wait: Option<f64>,
    /// `L / μ`.
    pub traffic_intensity: Option<f64>,
    /// Fraction of the elapsed time the station was serving.
    pub utilization: Option<f64>,
    /// Time-weighted mean queue length.
    pub time_average_number: Option<f64>,
}

/// Measures of the whole network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkReport {
    /// Mean `departure − entry` over the completed visits.
    pub mean_response_time: Option<f64>,
    /// Mean `departure − entry` over every visit, the visits still queued
    /// counting the final clock as their departure.
    pub censored_mean_response_time: Option<f64>,
    /// The number-in-system integral per event.
    pub mean_time_in_system: Option<f64>,
    /// The number-in-system × elapsed-time integral itself.
    pub area_in_system: f64,
    /// `L₁ + L₂ + L₃`.
    pub mean_number_by_station: Option<f64>,
    /// `(S₁ + S₂ + S₃) / T`, computed independently of the per-station `L`.
    pub mean_number_by_population: Option<f64>,
    /// `LQ₁ + LQ₂ + LQ₃`.
    pub mean_queued: Option<f64>,
    pub completed_visits: u64,
    /// Visits still at a station when the run stopped.
    pub resident_visits: u64,
}

/// The outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Number of events processed.
    pub events: u64,
    /// The final clock.
    pub clock: SimTime,
    pub stations: [StationReport; 3],
    pub network: NetworkReport,
}

/// `numerator / denominator`, `None` when the denominator is not positive.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

impl Report {
    /// Derive the report of a run from its final state and metrics.
    pub fn derive(network: &Network, metrics: &Metrics) -> Self {
        let params = network.params();
        let clock = network.clock().into_f64();
        let events = metrics.events() as f64;

        let totals = metrics.total_queue_length();
        let queue_area = metrics.queue_area();
        let busy_time = metrics.busy_time();

        let stations = StationId::ALL.map(|id| {
            let k = id.index();
            let station = network.station(id);
            let mu = params.service_rate(id);
            let observations = totals[k] as f64;

            let mean_number = ratio(observations, clock);
            let mean_time = ratio(observations, events);

            StationReport {
                station: id,
                observations: totals[k],
                arrivals: station.arrivals(),
                departures: station.departures(),
                mean_number,
                mean_queued: mean_number
                    .map(|l| l - params.effective_arrival_rate(id) / mu.value()),
                mean_time,
                mean_wait: mean_time.map(|w| w - mu.mean_duration()),
                traffic_intensity: mean_number.map(|l| l / mu.value()),
                utilization: ratio(busy_time[k], clock),
                time_average_number: ratio(queue_area[k], clock),
            }
        });

        let now = network.clock();
        let residents = network
            .stations()
            .iter()
            .flat_map(|station| station.visits())
            .fold((0u64, 0.0), |(count, total), visit| {
                (count + 1, total + visit.censored_sojourn(now))
            });

        let completed = metrics.completed_visits();
        let all_visits = completed + residents.0;

        let network_report = NetworkReport {
            mean_response_time: ratio(metrics.sojourn_total(), completed as f64),
            censored_mean_response_time: ratio(
                metrics.sojourn_total() + residents.1,
                all_visits as f64,
            ),
            mean_time_in_system: ratio(metrics.area_in_system(), events),
            area_in_system: metrics.area_in_system(),
            mean_number_by_station: sum_all(stations.map(|s| s.mean_number)),
            mean_number_by_population: ratio(totals.iter().sum::<u64>() as f64, clock),
            mean_queued: sum_all(stations.map(|s| s.mean_queued)),
            completed_visits: completed,
            resident_visits: residents.0,
        };

        Self {
            events: metrics.events(),
            clock: now,
            stations,
            network: network_report,
        }
    }

    #[inline]
    pub fn station(&self, id: StationId) -> &StationReport {
        &self.stations[id.index()]
    }
}

/// Σ of the values in station order, `None` if any is undefined.
fn sum_all(values: [Option<f64>; 3]) -> Option<f64> {
    values.into_iter().sum()
}
