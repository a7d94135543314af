use qnsim_core::{NetworkParameters, Report, StationReport};
use std::fmt;

/// An optional measure, `undefined` when it could not be computed.
struct Measure(Option<f64>);

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.6}"),
            None => f.write_str("undefined"),
        }
    }
}

/// Text rendering of a [`Report`] along with the inputs of the run.
pub struct Rendered<'a> {
    pub params: &'a NetworkParameters,
    pub seed: u64,
    pub report: &'a Report,
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "  {label:<32}{value}")
}

impl Rendered<'_> {
    fn station(&self, f: &mut fmt::Formatter<'_>, station: &StationReport) -> fmt::Result {
        let id = station.station;
        writeln!(f, "station {id}")?;
        line(f, "observations", station.observations)?;
        line(f, "arrivals", station.arrivals)?;
        line(f, "departures", station.departures)?;
        line(f, "mean number (L)", Measure(station.mean_number))?;
        line(f, "mean queued (LQ)", Measure(station.mean_queued))?;
        line(f, "mean time (W)", Measure(station.mean_time))?;
        line(f, "mean wait (WQ)", Measure(station.mean_wait))?;
        line(f, "traffic intensity (L/mu)", Measure(station.traffic_intensity))?;
        line(
            f,
            "utilization",
            format_args!(
                "{} (offered {:.6})",
                Measure(station.utilization),
                self.params.offered_load(id)
            ),
        )?;
        line(f, "time-average number", Measure(station.time_average_number))
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let network = &report.network;

        writeln!(f, "network: {}", self.params)?;
        writeln!(f, "seed: {}", self.seed)?;
        writeln!(f, "events: {}, clock: {}", report.events, report.clock)?;
        writeln!(f)?;

        for station in &report.stations {
            self.station(f, station)?;
            writeln!(f)?;
        }

        writeln!(f, "network")?;
        line(f, "mean response time", Measure(network.mean_response_time))?;
        line(
            f,
            "censored mean response time",
            Measure(network.censored_mean_response_time),
        )?;
        line(f, "mean time in system", Measure(network.mean_time_in_system))?;
        line(f, "area in system", format_args!("{:.6}", network.area_in_system))?;
        line(
            f,
            "mean number (sum of L)",
            Measure(network.mean_number_by_station),
        )?;
        line(
            f,
            "mean number (population/clock)",
            Measure(network.mean_number_by_population),
        )?;
        line(f, "mean queued (sum of LQ)", Measure(network.mean_queued))?;
        line(f, "completed visits", network.completed_visits)?;
        line(f, "resident visits", network.resident_visits)
    }
}
