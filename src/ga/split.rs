//! Greedy left-to-right split of a giant tour into capacity-respecting routes.
//!
//! # Algorithm
//!
//! Scan the tour once, accumulating demand. A position joins the open route
//! while the accumulated load stays within capacity; otherwise the open route
//! is closed and a new one starts at that position with the position's demand
//! as its load. The last open route is closed after the scan.
//!
//! Every position lands in exactly one route and every route is closed
//! exactly once. A customer whose demand alone exceeds capacity ends up on a
//! route of its own; each such overloaded route adds a fixed penalty to the
//! cost instead of making the tour undecodable.
//!
//! # Complexity
//!
//! O(n) where n = number of customers.

use crate::distance::DistanceMatrix;
use crate::models::{ProblemInstance, Route, RoutePlan};

/// Calls `visit(route, load)` for each route of the greedy split, in order.
fn for_each_route<F>(tour: &[usize], instance: &ProblemInstance, mut visit: F)
where
    F: FnMut(&[usize], f64),
{
    let capacity = instance.capacity();
    let mut start = 0;
    let mut load = 0.0;

    for (pos, &cid) in tour.iter().enumerate() {
        let demand = instance.demand(cid);
        if pos > start && load + demand > capacity {
            visit(&tour[start..pos], load);
            start = pos;
            load = 0.0;
        }
        load += demand;
    }

    if start < tour.len() {
        visit(&tour[start..], load);
    }
}

/// Splits a giant tour into routes and returns the full decomposition.
///
/// # Arguments
///
/// * `tour`: Customer ids in giant-tour order
/// * `instance`: Problem data (capacity and demands)
/// * `distances`: Distance matrix built from `instance`
/// * `penalty_weight`: Cost added once per overloaded route
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::{Customer, Point, ProblemInstance};
/// use cvrp_ga::distance::DistanceMatrix;
/// use cvrp_ga::ga::split;
///
/// let instance = ProblemInstance::new(
///     Point::new(0.0, 0.0),
///     20.0,
///     vec![
///         Customer::new(1, 1.0, 0.0, 10.0),
///         Customer::new(2, 2.0, 0.0, 10.0),
///         Customer::new(3, 3.0, 0.0, 10.0),
///     ],
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
///
/// let plan = split(&[1, 2, 3], &instance, &dm, 5000.0);
/// assert_eq!(plan.num_routes(), 2); // [1, 2] then [3]
/// assert!((plan.distance - 10.0).abs() < 1e-10);
/// ```
pub fn split(
    tour: &[usize],
    instance: &ProblemInstance,
    distances: &DistanceMatrix,
    penalty_weight: f64,
) -> RoutePlan {
    let capacity = instance.capacity();
    let mut routes = Vec::new();
    let mut distance = 0.0;
    let mut penalty = 0.0;

    for_each_route(tour, instance, |customers, load| {
        let length = distances.route_length(customers);
        let route = Route::new(customers.to_vec(), length, load, capacity);
        if route.is_overloaded() {
            penalty += penalty_weight;
        }
        distance += length;
        routes.push(route);
    });

    RoutePlan {
        routes,
        distance,
        penalty,
    }
}

/// Penalized cost of the greedy split without materializing the routes.
///
/// Always equals `split(..).cost()`.
pub fn split_cost(
    tour: &[usize],
    instance: &ProblemInstance,
    distances: &DistanceMatrix,
    penalty_weight: f64,
) -> f64 {
    let capacity = instance.capacity();
    let mut cost = 0.0;
    for_each_route(tour, instance, |customers, load| {
        cost += distances.route_length(customers);
        if load > capacity {
            cost += penalty_weight;
        }
    });
    cost
}
