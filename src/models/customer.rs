//! Customer locations and demands.

use serde::{Deserialize, Serialize};

/// A point in the plane with Euclidean metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A customer to be served from the depot.
///
/// Customer ids run from 1 to N; id 0 is reserved for the depot in the
/// [`DistanceMatrix`](crate::distance::DistanceMatrix).
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::Customer;
///
/// let c = Customer::new(1, 41.0, 49.0, 10.0);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    location: Point,
    demand: f64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: f64) -> Self {
        Self {
            id,
            location: Point::new(x, y),
            demand,
        }
    }

    /// Customer id (1-based).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location of the customer.
    pub fn location(&self) -> Point {
        self.location
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.location.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.location.y
    }

    /// Quantity to deliver.
    pub fn demand(&self) -> f64 {
        self.demand
    }
}
