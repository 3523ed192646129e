use std::f64::consts::E;

/// Logistic sigmoid.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid with respect to its pre-activation input.
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

/// An activation function paired with its derivative.
///
/// Neurons only ever see this pair, so layer and neuron mechanics can be
/// exercised with simple stand-ins (e.g. `x => 2x`) instead of the sigmoid.
#[derive(Debug, Clone, Copy)]
pub struct Activation {
    function: fn(f64) -> f64,
    derivative: fn(f64) -> f64,
}

impl Activation {
    pub const fn new(function: fn(f64) -> f64, derivative: fn(f64) -> f64) -> Activation {
        Activation { function, derivative }
    }

    pub const fn sigmoid() -> Activation {
        Activation::new(sigmoid, sigmoid_prime)
    }

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    /// Element-wise derivative, evaluated at the pre-activation value.
    pub fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::sigmoid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centered() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid_prime(0.0), 0.25);
        assert_relative_eq!(sigmoid(2.0) + sigmoid(-2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for &x in &[-3.0, -0.5, 0.3, 4.0] {
            let numerical = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert_relative_eq!(sigmoid_prime(x), numerical, epsilon = 1e-9);
        }
    }

    #[test]
    fn custom_pair_dispatches() {
        let doubling = Activation::new(|x| 2.0 * x, |_| 2.0);
        assert_eq!(doubling.function(0.5), 1.0);
        assert_eq!(doubling.derivative(10.0), 2.0);
        assert_eq!(Activation::default().function(0.0), 0.5);
    }
}
