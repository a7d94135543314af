use crate::measure::{Rate, Routing};

/// Default external arrival rate (λ₁) of station 1.
///
/// ```
/// # use qnsim_core::defaults::*;
/// assert_eq!(DEFAULT_ARRIVAL_RATE.to_string(), "1");
/// ```
pub const DEFAULT_ARRIVAL_RATE: Rate = Rate::new_unchecked(1.0);

/// Default service rate (μ₁) of station 1.
pub const DEFAULT_SERVICE_RATE_1: Rate = Rate::new_unchecked(2.0);

/// Default service rate (μ₂) of station 2.
pub const DEFAULT_SERVICE_RATE_2: Rate = Rate::new_unchecked(4.0);

/// Default service rate (μ₃) of station 3.
pub const DEFAULT_SERVICE_RATE_3: Rate = Rate::new_unchecked(3.0);

/// Default fraction of station-1 departures routed to station 2.
///
/// ```
/// # use qnsim_core::defaults::*;
/// assert_eq!(DEFAULT_ROUTING.to_string(), "40%");
/// ```
pub const DEFAULT_ROUTING: Routing = Routing::new_unchecked(0.4);

/// Default number of events processed by a run.
///
/// The run length is counted in events, not in simulated time.
pub const DEFAULT_EVENTS: u64 = 10_000;

/// Default seed of the [`VariateGenerator`].
///
/// [`VariateGenerator`]: crate::VariateGenerator
pub const DEFAULT_SEED: u64 = 0;
