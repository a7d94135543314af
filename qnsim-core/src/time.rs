use std::{cmp::Ordering, fmt, ops::Add};

/// A point on the simulation clock.
///
/// The simulation has no notion of wall-clock units: rates are expressed
/// "per unit of time" and a [`SimTime`] counts those units from the
/// start of the run.
///
/// A [`SimTime`] is always finite and non-negative. The only way to move
/// a time forward is to add a finite, non-negative duration with
/// [`SimTime::after`] (or `+`), which is what every sampled interarrival or
/// service duration is.
///
/// ```
/// # use qnsim_core::SimTime;
/// let t = SimTime::ZERO.after(1.5);
/// assert_eq!(t.into_f64(), 1.5);
/// assert!(SimTime::ZERO < t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimTime(f64);

impl SimTime {
    /// The origin of the simulation clock.
    pub const ZERO: Self = Self(0.0);

    /// the time `duration` units after `self`.
    ///
    /// `duration` comes from the [`VariateGenerator`] and is therefore
    /// strictly positive and finite.
    ///
    /// [`VariateGenerator`]: crate::VariateGenerator
    #[inline(always)]
    #[must_use = "function does not modify the current value"]
    pub fn after(self, duration: f64) -> Self {
        debug_assert!(duration.is_finite() && duration >= 0.0);
        Self(self.0 + duration)
    }

    /// elapsed time between `earlier` and `self`, `0` if `earlier` is not
    /// before `self`.
    #[inline]
    pub fn since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    #[inline(always)]
    pub fn into_f64(self) -> f64 {
        self.0
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        self.after(rhs)
    }
}

impl From<SimTime> for f64 {
    fn from(value: SimTime) -> Self {
        value.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_moves_forward() {
        let t = SimTime::ZERO.after(0.25) + 0.5;
        assert_eq!(t.into_f64(), 0.75);
    }

    #[test]
    fn since_never_negative() {
        let early = SimTime::ZERO.after(1.0);
        let late = early.after(2.0);
        assert_eq!(late.since(early), 2.0);
        assert_eq!(early.since(late), 0.0);
    }

    #[test]
    fn ordering() {
        let a = SimTime::ZERO.after(1.0);
        let b = SimTime::ZERO.after(2.0);
        assert!(a < b);
        assert_eq!(a.max(b), b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::ZERO.after(1.5).to_string(), "1.5");
    }
}
