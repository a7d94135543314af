//! Validated parameters of a simulation run.
//!
//! [`NetworkParameters`] can be assembled with its [`builder`] or parsed
//! from a compact textual form:
//!
//! ```
//! use qnsim_core::{NetworkParameters, StationId};
//!
//! let params: NetworkParameters = "lambda=1 mu1=2 p=0.4 mu2=4 mu3=3 events=10000"
//!     .parse()
//!     .unwrap();
//! assert_eq!(params.service_rate(StationId::Two).value(), 4.0);
//! assert_eq!(params.events(), 10_000);
//!
//! // missing keys keep their default value, greek letters are accepted
//! let params: NetworkParameters = "λ=0.5 μ1=1".parse().unwrap();
//! assert_eq!(params.arrival_rate().value(), 0.5);
//! ```
//!
//! [`builder`]: NetworkParameters::builder

use crate::{
    defaults::{
        DEFAULT_ARRIVAL_RATE, DEFAULT_EVENTS, DEFAULT_ROUTING, DEFAULT_SERVICE_RATE_1,
        DEFAULT_SERVICE_RATE_2, DEFAULT_SERVICE_RATE_3,
    },
    measure::{Rate, RateError, RateParseError, Routing, RoutingError, RoutingParseError},
    station::StationId,
};
use logos::{Lexer, Logos};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The immutable inputs of a run: the rates, the routing probability and
/// the number of events to process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParameters {
    arrival_rate: Rate,
    service_rates: [Rate; 3],
    routing: Routing,
    events: u64,
}

/// Error returned when the parameters of a run are invalid.
///
/// Raised before the simulation starts so an invalid configuration can never
/// turn into `NaN` or infinite results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("arrival rate: {0}")]
    ArrivalRate(RateError),
    #[error("service rate of station {station}: {error}")]
    ServiceRate { station: StationId, error: RateError },
    #[error("{0}")]
    Routing(#[from] RoutingError),
    #[error("the number of events must be at least 1")]
    ZeroEvents,
}

/// Builder for [`NetworkParameters`].
///
/// Obtained via [`NetworkParameters::builder`]. Every setting starts at its
/// value in [`defaults`](crate::defaults); the values are validated by
/// [`build`](ParametersBuilder::build).
///
/// ```
/// use qnsim_core::{NetworkParameters, ParameterError};
///
/// let params = NetworkParameters::builder()
///     .arrival_rate(0.8)
///     .routing(0.5)
///     .events(1_000)
///     .build()
///     .unwrap();
/// assert!(params.is_stable());
///
/// let err = NetworkParameters::builder().events(0).build().unwrap_err();
/// assert_eq!(err, ParameterError::ZeroEvents);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParametersBuilder {
    arrival_rate: f64,
    service_rates: [f64; 3],
    routing: f64,
    events: u64,
}

impl Default for NetworkParameters {
    fn default() -> Self {
        Self {
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_rates: [
                DEFAULT_SERVICE_RATE_1,
                DEFAULT_SERVICE_RATE_2,
                DEFAULT_SERVICE_RATE_3,
            ],
            routing: DEFAULT_ROUTING,
            events: DEFAULT_EVENTS,
        }
    }
}

impl NetworkParameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::from(Self::default())
    }

    /// λ₁, the rate of the external arrivals at station 1.
    #[inline]
    pub fn arrival_rate(&self) -> Rate {
        self.arrival_rate
    }

    /// μ of the given station.
    #[inline]
    pub fn service_rate(&self, station: StationId) -> Rate {
        self.service_rates[station.index()]
    }

    #[inline]
    pub fn routing(&self) -> Routing {
        self.routing
    }

    /// N, the number of events a run processes.
    #[inline]
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Rate at which entities enter `station` in steady state.
    ///
    /// Station 1 sees λ₁; stations 2 and 3 see the share of λ₁ that the
    /// routing sends them, `λ₁·p` and `λ₁·(1 − p)`.
    pub fn effective_arrival_rate(&self, station: StationId) -> f64 {
        let lambda = self.arrival_rate.value();
        match station {
            StationId::One => lambda,
            StationId::Two | StationId::Three => lambda * self.routing.fraction_to(station),
        }
    }

    /// The analytic utilization `λ_k / μ_k` of `station`.
    pub fn offered_load(&self, station: StationId) -> f64 {
        self.effective_arrival_rate(station) / self.service_rate(station).value()
    }

    /// `true` if every station is served faster than it is fed.
    ///
    /// An unstable network still simulates fine, but its queues grow
    /// without bound and the reported averages never settle.
    pub fn is_stable(&self) -> bool {
        StationId::ALL
            .into_iter()
            .all(|station| self.offered_load(station) < 1.0)
    }
}

impl From<NetworkParameters> for ParametersBuilder {
    fn from(params: NetworkParameters) -> Self {
        Self {
            arrival_rate: params.arrival_rate.value(),
            service_rates: params.service_rates.map(Rate::value),
            routing: params.routing.value(),
            events: params.events,
        }
    }
}

impl ParametersBuilder {
    /// Set λ₁, the external arrival rate.
    pub fn arrival_rate(mut self, rate: f64) -> Self {
        self.arrival_rate = rate;
        self
    }

    /// Set the service rate of one station.
    pub fn service_rate(mut self, station: StationId, rate: f64) -> Self {
        self.service_rates[station.index()] = rate;
        self
    }

    /// Set the fraction of station-1 departures routed to station 2.
    pub fn routing(mut self, p: f64) -> Self {
        self.routing = p;
        self
    }

    /// Set the number of events to process.
    pub fn events(mut self, events: u64) -> Self {
        self.events = events;
        self
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// The first invalid setting, checked in the order arrival rate,
    /// service rates of stations 1 to 3, routing, events.
    pub fn build(self) -> Result<NetworkParameters, ParameterError> {
        let arrival_rate = Rate::new(self.arrival_rate).map_err(ParameterError::ArrivalRate)?;

        let mut service_rates = [arrival_rate; 3];
        for station in StationId::ALL {
            service_rates[station.index()] = Rate::new(self.service_rates[station.index()])
                .map_err(|error| ParameterError::ServiceRate { station, error })?;
        }

        let routing = Routing::new(self.routing)?;

        if self.events == 0 {
            return Err(ParameterError::ZeroEvents);
        }

        Ok(NetworkParameters {
            arrival_rate,
            service_rates,
            routing,
            events: self.events,
        })
    }
}

impl fmt::Display for NetworkParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lambda={} mu1={} p={} mu2={} mu3={} events={}",
            self.arrival_rate,
            self.service_rates[0],
            self.routing.value(),
            self.service_rates[1],
            self.service_rates[2],
            self.events,
        )
    }
}

/// Error returned when parsing [`NetworkParameters`] from a string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected input at {position}, expecting one of lambda, mu1, mu2, mu3, p or events")]
    UnexpectedInput { position: usize },
    #[error("expecting `=' after `{key}'")]
    ExpectingEqual { key: Key },
    #[error("expecting a value after `{key}='")]
    ExpectingValue { key: Key },
    #[error("`{key}' is set more than once")]
    Duplicate { key: Key },
    #[error("{key}: {error}")]
    Rate { key: Key, error: RateParseError },
    #[error("p: {0}")]
    Routing(#[from] RoutingParseError),
    #[error("events: invalid count `{0}'")]
    Events(String),
    #[error("{0}")]
    Invalid(#[from] ParameterError),
}

/// The settings recognised by the textual form of [`NetworkParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrivalRate,
    ServiceRate(StationId),
    Routing,
    Events,
}

impl Key {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            Self::ArrivalRate => 0,
            Self::ServiceRate(station) => 1 + station.index(),
            Self::Routing => 4,
            Self::Events => 5,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrivalRate => write!(f, "lambda"),
            Self::ServiceRate(station) => write!(f, "mu{station}"),
            Self::Routing => write!(f, "p"),
            Self::Events => write!(f, "events"),
        }
    }
}

impl FromStr for NetworkParameters {
    type Err = ParseError;

    /// Parses a whitespace (or comma) separated list of `key=value`.
    ///
    /// Keys not present keep their default value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::<Token>::new(s);
        let mut builder = NetworkParameters::builder();
        let mut seen = [false; Key::COUNT];

        while let Some(next) = lex.next() {
            let unexpected = || ParseError::UnexpectedInput {
                position: lex.span().start,
            };
            let key = match next.map_err(|()| unexpected())? {
                Token::Lambda => Key::ArrivalRate,
                Token::Mu1 => Key::ServiceRate(StationId::One),
                Token::Mu2 => Key::ServiceRate(StationId::Two),
                Token::Mu3 => Key::ServiceRate(StationId::Three),
                Token::Routing => Key::Routing,
                Token::Events => Key::Events,
                Token::Equal | Token::Value => return Err(unexpected()),
            };

            if std::mem::replace(&mut seen[key.index()], true) {
                return Err(ParseError::Duplicate { key });
            }

            let Some(Ok(Token::Equal)) = lex.next() else {
                return Err(ParseError::ExpectingEqual { key });
            };
            let Some(Ok(Token::Value)) = lex.next() else {
                return Err(ParseError::ExpectingValue { key });
            };
            let value = lex.slice();

            builder = match key {
                Key::ArrivalRate => builder.arrival_rate(parse_rate(key, value)?),
                Key::ServiceRate(station) => builder.service_rate(station, parse_rate(key, value)?),
                Key::Routing => builder.routing(value.parse::<Routing>()?.value()),
                Key::Events => builder.events(
                    value
                        .parse()
                        .map_err(|_| ParseError::Events(value.to_owned()))?,
                ),
            };
        }

        Ok(builder.build()?)
    }
}

fn parse_rate(key: Key, value: &str) -> Result<f64, ParseError> {
    value
        .parse::<Rate>()
        .map(Rate::value)
        .map_err(|error| ParseError::Rate { key, error })
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f,;]+")]
enum Token {
    #[regex("lambda1?|λ1?")]
    Lambda,
    #[regex("mu1|μ1")]
    Mu1,
    #[regex("mu2|μ2")]
    Mu2,
    #[regex("mu3|μ3")]
    Mu3,
    #[regex("p|p21|routing")]
    Routing,
    #[regex("events|n|N")]
    Events,
    #[token("=")]
    Equal,

    #[regex(r"[-+]?[0-9]+(\.[0-9]*)?([eE][-+]?[0-9]+)?%?")]
    Value,
}
