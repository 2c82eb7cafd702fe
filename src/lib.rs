//! # cvrp-ga
//!
//! Genetic algorithm solver for the Capacitated Vehicle Routing Problem.
//! Solutions are encoded as giant tours and split greedily into routes
//! that respect vehicle capacity.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Point, Customer, ProblemInstance, Route, RoutePlan)
//! - [`distance`]: Euclidean distance matrix
//! - [`ga`]: Chromosomes, operators and the evolution driver
//! - [`io`]: Instance reader and progress reporting
//! - [`error`]: Crate error type

pub mod distance;
pub mod error;
pub mod ga;
pub mod io;
pub mod models;

pub use error::{CvrpError, Result};
