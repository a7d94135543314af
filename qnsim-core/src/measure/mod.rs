mod rate;
mod routing;

pub use self::{
    rate::{Rate, RateError, RateParseError},
    routing::{Routing, RoutingError, RoutingParseError},
};
