use crate::station::StationId;
use std::{fmt, str::FromStr};

/// Probabilistic routing of the entities leaving station 1.
///
/// Holds `p`, the fraction of station-1 departures sent to station 2. The
/// remaining `1 - p` go to station 3. Every departure goes to exactly one of
/// the two.
///
/// # Example
///
/// ```
/// use qnsim_core::{Routing, StationId};
///
/// let routing = Routing::new(0.4).unwrap();
/// assert_eq!(routing.to_string(), "40%");
///
/// assert_eq!(routing.route(0.1), StationId::Two);
/// assert_eq!(routing.route(0.4), StationId::Three);
///
/// // parsed either as a fraction or as a percentage
/// assert_eq!("0.4".parse::<Routing>().unwrap(), routing);
/// assert_eq!("40%".parse::<Routing>().unwrap(), routing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Routing(f64);

impl Routing {
    /// Create a validated routing probability.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] if `p` is not in `[0.0, 1.0]` (including NaN).
    pub fn new(p: f64) -> Result<Self, RoutingError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(RoutingError(p));
        }
        Ok(Self(p))
    }

    pub(crate) const fn new_unchecked(p: f64) -> Self {
        Self(p)
    }

    /// Pick the destination of a station-1 departure.
    ///
    /// `u` is a uniform draw in `[0, 1)`, see
    /// [`VariateGenerator::uniform`]. A draw strictly below `p` routes to
    /// station 2, any other draw to station 3. So `p = 0` never routes to
    /// station 2 and `p = 1` always does.
    ///
    /// [`VariateGenerator::uniform`]: crate::VariateGenerator::uniform
    #[inline]
    pub fn route(&self, u: f64) -> StationId {
        if u < self.0 {
            StationId::Two
        } else {
            StationId::Three
        }
    }

    /// Fraction of the flow leaving station 1 that enters `station`.
    ///
    /// Station 1 is not a destination and gets `0`.
    pub fn fraction_to(&self, station: StationId) -> f64 {
        match station {
            StationId::One => 0.0,
            StationId::Two => self.0,
            StationId::Three => 1.0 - self.0,
        }
    }

    /// Returns the inner `f64` value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Routing {
    /// Formats as a percentage with up to 2 decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self.0 * 100.0;
        if pct.fract() == 0.0 {
            write!(f, "{}%", pct as u64)
        } else {
            write!(f, "{:.2}%", pct)
        }
    }
}

impl FromStr for Routing {
    type Err = RoutingParseError;

    /// Parses either a probability (`"0.4"`) or a percentage (`"40%"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (num, scale) = match s.strip_suffix('%') {
            Some(num) => (num.trim(), 100.0),
            None => (s, 1.0),
        };
        let value: f64 = num
            .parse()
            .map_err(|_| RoutingParseError::InvalidNumber(s.to_owned()))?;
        Ok(Self::new(value / scale)?)
    }
}

/// Error returned when constructing a [`Routing`] with a value outside
/// `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("routing probability must be in [0.0, 1.0], got {0}")]
pub struct RoutingError(pub(crate) f64);

/// Error returned when parsing a [`Routing`] from a string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingParseError {
    #[error("invalid routing probability `{0}'")]
    InvalidNumber(String),
    #[error("{0}")]
    OutOfRange(#[from] RoutingError),
}
