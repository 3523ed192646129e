pub mod options;
pub mod sample;
pub mod trainer;

pub use options::{TrainingOptions, TrainingOverrides};
pub use sample::Sample;
pub use trainer::TrainingOutput;
