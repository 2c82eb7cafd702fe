//! Dense distance matrix over the depot and customers.

use crate::models::ProblemInstance;

/// A dense (N+1)×(N+1) Euclidean distance matrix stored in row-major order.
///
/// Index 0 is the depot and index `i` is customer `i`, so customer ids from
/// a chromosome can be used directly.
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::{Customer, Point, ProblemInstance};
/// use cvrp_ga::distance::DistanceMatrix;
///
/// let instance = ProblemInstance::new(
///     Point::new(0.0, 0.0),
///     10.0,
///     vec![Customer::new(1, 3.0, 4.0, 1.0), Customer::new(2, 6.0, 8.0, 1.0)],
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes all pairwise Euclidean distances of an instance.
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        let points: Vec<_> = std::iter::once(instance.depot())
            .chain(instance.customers().iter().map(|c| c.location()))
            .collect();
        let size = points.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = points[i].distance_to(&points[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Distance between two locations (0 = depot).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Length of the trip depot → `customers[0]` → … → `customers[last]` → depot.
    ///
    /// An empty slice has length zero.
    pub fn route_length(&self, customers: &[usize]) -> f64 {
        let Some((&first, _)) = customers.split_first() else {
            return 0.0;
        };
        let inner: f64 = customers.windows(2).map(|w| self.get(w[0], w[1])).sum();
        let last = customers[customers.len() - 1];
        self.get(0, first) + inner + self.get(last, 0)
    }

    /// Number of locations, depot included.
    pub fn size(&self) -> usize {
        self.size
    }
}
