pub mod check;

pub use check::{compute_numerical_gradients, reconcile_zero_entries, relative_error, EPSILON};
