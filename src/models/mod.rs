//! Domain model types for the capacitated vehicle routing problem.
//!
//! A [`ProblemInstance`] holds the depot, the vehicle capacity and the
//! customers; [`Route`] and [`RoutePlan`] describe a decoded solution.

mod customer;
mod instance;
mod route;

pub use customer::{Customer, Point};
pub use instance::ProblemInstance;
pub use route::{Route, RoutePlan};
