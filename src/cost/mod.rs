pub mod cross_entropy;
pub mod quadratic;
pub mod strategy;

pub use cross_entropy::CrossEntropyCost;
pub use quadratic::QuadraticCost;
pub use strategy::CostStrategy;
