use rand::seq::SliceRandom;
use rand::Rng;

// Element-wise helpers over plain `f64` slices. Mismatched lengths are a
// programming error and panic.

pub fn zeros(size: usize) -> Vec<f64> {
    vec![0.0; size]
}

pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() != b.len() {
        panic!("Vectors are of incorrect sizes")
    }
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() != b.len() {
        panic!("Vectors are of incorrect sizes")
    }
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

/// Euclidean norm, `sqrt(Σ x²)`.
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Shuffles `items` in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
