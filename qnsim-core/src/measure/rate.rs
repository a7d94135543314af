use std::{fmt, str::FromStr};

/// A validated rate of events per unit of time.
///
/// Used for both the external arrival rate (λ) and the service rates (μ)
/// of the stations. A [`Rate`] is always strictly positive and finite, so
/// its reciprocal (the mean duration between two events) is always
/// defined.
///
/// # Example
///
/// ```
/// use qnsim_core::Rate;
///
/// let mu = Rate::new(4.0).unwrap();
/// assert_eq!(mu.mean_duration(), 0.25);
///
/// let parsed: Rate = "4".parse().unwrap();
/// assert_eq!(parsed, mu);
///
/// assert!(Rate::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    /// Create a new validated rate.
    ///
    /// # Errors
    ///
    /// Returns [`RateError`] if `rate` is NaN, infinite, zero or negative.
    pub fn new(rate: f64) -> Result<Self, RateError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateError(rate));
        }
        Ok(Self(rate))
    }

    /// Build a rate known to be valid at compile time, for the constants
    /// in [`defaults`](crate::defaults).
    pub(crate) const fn new_unchecked(rate: f64) -> Self {
        Self(rate)
    }

    /// Returns the inner `f64` value.
    #[inline(always)]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The mean time between two events, `1 / rate`.
    #[inline]
    pub fn mean_duration(self) -> f64 {
        1.0 / self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Rate {
    type Err = RateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| RateParseError::InvalidNumber(s.to_owned()))?;
        Ok(Self::new(value)?)
    }
}

/// Error returned when constructing a [`Rate`] that is not strictly
/// positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("rate must be strictly positive and finite, got {0}")]
pub struct RateError(pub(crate) f64);

/// Error returned when parsing a [`Rate`] from a string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateParseError {
    #[error("invalid rate `{0}'")]
    InvalidNumber(String),
    #[error("{0}")]
    OutOfRange(#[from] RateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepted() {
        assert_eq!(Rate::new(2.0).unwrap().value(), 2.0);
        assert_eq!(Rate::new(1e-9).unwrap().value(), 1e-9);
    }

    #[test]
    fn zero_rejected() {
        assert_eq!(Rate::new(0.0), Err(RateError(0.0)));
    }

    #[test]
    fn negative_rejected() {
        assert!(Rate::new(-1.0).is_err());
    }

    #[test]
    fn nan_and_infinity_rejected() {
        assert!(Rate::new(f64::NAN).is_err());
        assert!(Rate::new(f64::INFINITY).is_err());
    }

    #[test]
    fn mean_duration() {
        assert_eq!(Rate::new(2.0).unwrap().mean_duration(), 0.5);
    }

    #[test]
    fn parse() {
        assert_eq!("3.5".parse::<Rate>().unwrap().value(), 3.5);
        assert_eq!(" 3 ".parse::<Rate>().unwrap().value(), 3.0);
    }

    #[test]
    fn parse_invalid_number() {
        assert!(matches!(
            "fast".parse::<Rate>(),
            Err(RateParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn parse_out_of_range() {
        assert!(matches!(
            "-2".parse::<Rate>(),
            Err(RateParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = Rate::new(-2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rate must be strictly positive and finite, got -2"
        );
    }
}
