//! Immutable CVRP instance: depot, vehicle capacity and customers.

use serde::{Deserialize, Serialize};

use super::{Customer, Point};
use crate::error::{CvrpError, Result};

/// A capacitated vehicle routing instance with a single depot and an
/// unlimited homogeneous fleet.
///
/// Construction validates the data once so that the search never has to:
/// at least one customer, a positive finite capacity, finite coordinates,
/// non-negative finite demands, ids numbered 1..=N in order, and at least
/// one customer away from the depot (otherwise every tour has zero length).
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::{Customer, Point, ProblemInstance};
///
/// let instance = ProblemInstance::new(
///     Point::new(0.0, 0.0),
///     10.0,
///     vec![
///         Customer::new(1, 1.0, 0.0, 4.0),
///         Customer::new(2, 2.0, 0.0, 4.0),
///     ],
/// )
/// .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.customer(2).demand(), 4.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct ProblemInstance {
    depot: Point,
    capacity: f64,
    customers: Vec<Customer>,
    best_known: Option<f64>,
}

/// Unchecked wire form; deserialization goes through [`ProblemInstance::new`].
#[derive(Deserialize)]
struct RawInstance {
    depot: Point,
    capacity: f64,
    customers: Vec<Customer>,
    #[serde(default)]
    best_known: Option<f64>,
}

impl TryFrom<RawInstance> for ProblemInstance {
    type Error = CvrpError;

    fn try_from(raw: RawInstance) -> Result<Self> {
        let instance = Self::new(raw.depot, raw.capacity, raw.customers)?;
        Ok(match raw.best_known {
            Some(value) => instance.with_best_known(value),
            None => instance,
        })
    }
}

impl ProblemInstance {
    /// Creates and validates an instance.
    pub fn new(depot: Point, capacity: f64, customers: Vec<Customer>) -> Result<Self> {
        if customers.is_empty() {
            return Err(CvrpError::InvalidInstance(
                "instance has no customers".into(),
            ));
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(CvrpError::InvalidInstance(format!(
                "vehicle capacity must be positive, got {capacity}"
            )));
        }
        if !depot.is_finite() {
            return Err(CvrpError::InvalidInstance(
                "depot coordinates must be finite".into(),
            ));
        }
        for (i, c) in customers.iter().enumerate() {
            if c.id() != i + 1 {
                return Err(CvrpError::InvalidInstance(format!(
                    "customer at position {} has id {}, expected {}",
                    i,
                    c.id(),
                    i + 1
                )));
            }
            if !c.location().is_finite() {
                return Err(CvrpError::InvalidInstance(format!(
                    "customer {} has non-finite coordinates",
                    c.id()
                )));
            }
            if !c.demand().is_finite() || c.demand() < 0.0 {
                return Err(CvrpError::InvalidInstance(format!(
                    "customer {} has invalid demand {}",
                    c.id(),
                    c.demand()
                )));
            }
        }
        if customers.iter().all(|c| c.location() == depot) {
            return Err(CvrpError::InvalidInstance(
                "all customers coincide with the depot".into(),
            ));
        }

        Ok(Self {
            depot,
            capacity,
            customers,
            best_known: None,
        })
    }

    /// Attaches the reference objective value shipped with benchmark files.
    pub fn with_best_known(mut self, value: f64) -> Self {
        self.best_known = (value.is_finite() && value > 0.0).then_some(value);
        self
    }

    /// Depot location.
    pub fn depot(&self) -> Point {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of customers N.
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// All customers, ordered by id.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Customer with the given 1-based id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is 0 or greater than N.
    pub fn customer(&self, id: usize) -> &Customer {
        &self.customers[id - 1]
    }

    /// Demand of the customer with the given id.
    pub fn demand(&self, id: usize) -> f64 {
        self.customer(id).demand()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(Customer::demand).sum()
    }

    /// Reference objective value from the instance file, if it carried one.
    pub fn best_known(&self) -> Option<f64> {
        self.best_known
    }
}
