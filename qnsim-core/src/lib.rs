/*!
# Queueing network simulator

Discrete-event simulation of an open network of three single-server FIFO
stations:

```text
  λ₁ ──► [ 1 ] ──(p)────► [ 2 ] ──►
           │
           └──(1 − p)───► [ 3 ] ──►
```

Entities arrive at station 1 following a Poisson process of rate λ₁. Each
station serves one entity at a time with exponential service times of rate
μ₁, μ₂ and μ₃. An entity leaving station 1 goes to station 2 with
probability `p`, to station 3 otherwise, and leaves the network after
station 2 or 3.

The [`Simulation`] processes a fixed number of events, always the earliest
pending one, and accumulates the statistics the [`Report`] is derived from.
All randomness comes from one seedable [`VariateGenerator`], so a run is
reproducible from its [`NetworkParameters`] and its seed.

```
use qnsim_core::{NetworkParameters, Simulation, StationId};

let params: NetworkParameters = "lambda=1 mu1=2 p=0.4 mu2=4 mu3=3 events=20000"
    .parse()
    .unwrap();

let mut simulation = Simulation::seeded(params, 7);
simulation.run();
let report = simulation.report();

let rho = report.station(StationId::One).utilization.unwrap();
assert!((rho - 0.5).abs() < 0.1);
```
*/

pub mod defaults;
pub mod measure;
pub mod metrics;
pub mod network;
pub mod params;
pub mod report;
mod simulation;
pub mod station;
pub mod stats;
mod time;
mod variate;
mod visit;

pub use self::{
    measure::{Rate, Routing},
    metrics::Metrics,
    network::{Event, Network, Transition},
    params::{NetworkParameters, ParameterError, ParametersBuilder},
    report::{NetworkReport, Report, StationReport},
    simulation::Simulation,
    station::{Station, StationId},
    stats::{NetworkStats, StationStats},
    time::SimTime,
    variate::VariateGenerator,
    visit::{Visit, VisitState},
};
