use ndarray::Array1;

use super::vectorizer::Norm;

pub(crate) fn normalize_vector(vec: &Array1<f32>, norm: Norm) -> Array1<f32> {
    let magnitude: f32 = match norm {
        Norm::L2 => vec.iter().map(|&x| x * x).sum::<f32>().sqrt(),
        Norm::L1 => vec.iter().map(|x| x.abs()).sum::<f32>(),
    };
    if magnitude > 1e-10 {
        vec / magnitude
    } else {
        // An all-zero row stays all-zero, the way sparse tf-idf rows do.
        Array1::zeros(vec.len())
    }
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}
