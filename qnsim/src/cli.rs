use clap::Parser;
use qnsim_core::{
    NetworkParameters, ParameterError, StationId,
    defaults::{
        DEFAULT_ARRIVAL_RATE, DEFAULT_EVENTS, DEFAULT_ROUTING, DEFAULT_SERVICE_RATE_1,
        DEFAULT_SERVICE_RATE_2, DEFAULT_SERVICE_RATE_3,
    },
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::filter::LevelFilter;

/// Simulate an open network of three single-server FIFO stations.
///
/// Entities arrive at station 1 and, once served, move on to station 2
/// with probability `p` or to station 3 otherwise. The run processes a
/// fixed number of events and prints the performance measures of every
/// station and of the whole network.
#[derive(Parser, Debug)]
#[command(name = "qnsim", version, about, long_about)]
pub struct Args {
    /// External arrival rate at station 1 (λ₁)
    #[arg(long, alias = "lambda", default_value_t = DEFAULT_ARRIVAL_RATE.value())]
    pub arrival_rate: f64,

    /// Service rate of station 1 (μ₁)
    #[arg(long, default_value_t = DEFAULT_SERVICE_RATE_1.value())]
    pub mu1: f64,

    /// Probability that a visit leaving station 1 goes to station 2 (p)
    #[arg(long, short = 'p', default_value_t = DEFAULT_ROUTING.value())]
    pub routing: f64,

    /// Service rate of station 2 (μ₂)
    #[arg(long, default_value_t = DEFAULT_SERVICE_RATE_2.value())]
    pub mu2: f64,

    /// Service rate of station 3 (μ₃)
    #[arg(long, default_value_t = DEFAULT_SERVICE_RATE_3.value())]
    pub mu3: f64,

    /// Number of events to process (N)
    #[arg(long, short = 'n', default_value_t = DEFAULT_EVENTS)]
    pub events: u64,

    /// All the parameters at once, e.g. "lambda=1 mu1=2 p=0.4 mu2=4 mu3=3 events=10000".
    /// Takes precedence over the individual flags.
    #[arg(long, value_name = "TEXT")]
    pub network: Option<NetworkParameters>,

    /// Seed of the random generator. When omitted, one is derived from the
    /// system clock and printed so the run can be replayed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level, overridden by `RUST_LOG`
    #[arg(long, default_value_t = LevelFilter::WARN)]
    pub log_level: LevelFilter,
}

impl Args {
    /// The parameters of the run.
    pub fn parameters(&self) -> Result<NetworkParameters, ParameterError> {
        if let Some(params) = self.network {
            return Ok(params);
        }

        NetworkParameters::builder()
            .arrival_rate(self.arrival_rate)
            .service_rate(StationId::One, self.mu1)
            .routing(self.routing)
            .service_rate(StationId::Two, self.mu2)
            .service_rate(StationId::Three, self.mu3)
            .events(self.events)
            .build()
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("qnsim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.parameters().unwrap(), NetworkParameters::default());
        assert_eq!(args.seed, None);
        assert_eq!(args.log_level, LevelFilter::WARN);
    }

    #[test]
    fn individual_flags() {
        let args = parse(&[
            "--arrival-rate",
            "0.5",
            "--mu1",
            "1",
            "-p",
            "0.25",
            "--mu2",
            "2",
            "--mu3",
            "3",
            "-n",
            "500",
            "--seed",
            "17",
        ]);
        let params = args.parameters().unwrap();

        assert_eq!(params.arrival_rate().value(), 0.5);
        assert_eq!(params.service_rate(StationId::One).value(), 1.0);
        assert_eq!(params.routing().value(), 0.25);
        assert_eq!(params.service_rate(StationId::Two).value(), 2.0);
        assert_eq!(params.service_rate(StationId::Three).value(), 3.0);
        assert_eq!(params.events(), 500);
        assert_eq!(args.seed(), 17);
    }

    #[test]
    fn network_overrides_flags() {
        let args = parse(&[
            "--mu1",
            "9",
            "--network",
            "lambda=2 mu1=5 p=0.5 mu2=3 mu3=3 events=42",
        ]);
        let params = args.parameters().unwrap();
        assert_eq!(params.service_rate(StationId::One).value(), 5.0);
        assert_eq!(params.events(), 42);
    }

    #[test]
    fn invalid_network_text_is_rejected() {
        let result = Args::try_parse_from(["qnsim", "--network", "lambda=-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_flags_are_reported() {
        let args = parse(&["--mu2", "0"]);
        assert!(matches!(
            args.parameters(),
            Err(ParameterError::ServiceRate {
                station: StationId::Two,
                ..
            })
        ));

        let args = parse(&["-p", "1.5"]);
        assert!(matches!(args.parameters(), Err(ParameterError::Routing(_))));

        let args = parse(&["-n", "0"]);
        assert_eq!(args.parameters(), Err(ParameterError::ZeroEvents));
    }

    #[test]
    fn log_level() {
        let args = parse(&["--log-level", "debug"]);
        assert_eq!(args.log_level, LevelFilter::DEBUG);
    }
}
