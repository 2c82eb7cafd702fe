//! Distance computation between the depot and customers.

mod matrix;

pub use matrix::DistanceMatrix;
