use serde::{Deserialize, Serialize};

/// One training example: an input vector and its target output.
///
/// `output` may be left empty for data that is only forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    #[serde(default)]
    pub output: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Sample {
        Sample { input, output }
    }

    pub fn unlabeled(input: Vec<f64>) -> Sample {
        Sample { input, output: Vec::new() }
    }
}
