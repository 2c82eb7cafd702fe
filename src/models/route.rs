//! Decoded routes and the final route plan.

use serde::{Deserialize, Serialize};

/// One vehicle trip: depot, the listed customers in order, back to the depot.
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::Route;
///
/// let route = Route::new(vec![2, 3], 5.24, 6.0, 6.0);
/// assert_eq!(route.len(), 2);
/// assert!(!route.is_overloaded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    customers: Vec<usize>,
    distance: f64,
    load: f64,
    overloaded: bool,
}

impl Route {
    /// Creates a route; `capacity` is only used to flag an overload.
    pub fn new(customers: Vec<usize>, distance: f64, load: f64, capacity: f64) -> Self {
        Self {
            customers,
            distance,
            load,
            overloaded: load > capacity,
        }
    }

    /// Customer ids in visit order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers on the route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Euclidean length including both depot legs.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Sum of customer demands on the route.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Returns `true` if the load exceeds vehicle capacity.
    pub fn is_overloaded(&self) -> bool {
        self.overloaded
    }
}

/// The route decomposition of a chromosome together with its cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Routes in giant-tour order.
    pub routes: Vec<Route>,
    /// Sum of route distances.
    pub distance: f64,
    /// Total capacity penalty added on top of the distance.
    pub penalty: f64,
}

impl RoutePlan {
    /// Distance plus penalty: the quantity whose inverse is the fitness.
    pub fn cost(&self) -> f64 {
        self.distance + self.penalty
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Returns `true` if no route is overloaded.
    pub fn is_feasible(&self) -> bool {
        self.routes.iter().all(|r| !r.is_overloaded())
    }
}
