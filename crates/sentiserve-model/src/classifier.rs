//! Binary logistic regression over sparse TF-IDF rows.
//!
//! Training is full-batch gradient descent from a zero start, so a
//! fixed training set always yields the same weights.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::SparseRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainParams {
    pub learning_rate: f64,
    /// Upper bound on optimizer iterations.
    pub max_iter: usize,
    /// Stop when the loss improves by less than this between iterations.
    pub tol: f64,
    /// L2 regularization strength.
    pub l2: f64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter: 1000,
            tol: 1e-7,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(row: &SparseRow, weights: &[f64]) -> f64 {
    row.iter().map(|&(index, value)| value * weights[index]).sum()
}

impl LogisticRegression {
    /// Fit on sparse rows against binary labels.
    ///
    /// Runs to convergence (loss-change tolerance) or `max_iter`,
    /// whichever first.
    pub fn fit(rows: &[SparseRow], labels: &[u8], num_features: usize, params: &TrainParams) -> Self {
        assert_eq!(rows.len(), labels.len(), "rows and labels must align");
        let n = rows.len() as f64;
        let mut weights = vec![0.0; num_features];
        let mut bias = 0.0;
        let mut prev_loss = f64::INFINITY;

        for iter in 0..params.max_iter {
            let mut grad_w = vec![0.0; num_features];
            let mut grad_b = 0.0;
            let mut loss = 0.0;

            for (row, &label) in rows.iter().zip(labels) {
                let y = f64::from(label);
                let p = sigmoid(dot(row, &weights) + bias);
                let err = p - y;
                for &(index, value) in row {
                    grad_w[index] += err * value;
                }
                grad_b += err;
                // Clamped log-loss keeps the sum finite near 0/1.
                let p = p.clamp(1e-12, 1.0 - 1e-12);
                loss -= y * p.ln() + (1.0 - y) * (1.0 - p).ln();
            }

            loss /= n;
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= params.learning_rate * (g / n + params.l2 * *w);
            }
            bias -= params.learning_rate * grad_b / n;

            if (prev_loss - loss).abs() < params.tol {
                debug!(iter, loss, "gradient descent converged");
                break;
            }
            prev_loss = loss;
        }

        Self { weights, bias }
    }

    /// Probability per class index: `[P(negative), P(positive)]`.
    pub fn predict_proba(&self, row: &SparseRow) -> [f64; 2] {
        let p_positive = sigmoid(dot(row, &self.weights) + self.bias);
        [1.0 - p_positive, p_positive]
    }

    /// Hard class prediction; an exact tie goes to class 0.
    pub fn predict(&self, row: &SparseRow) -> u8 {
        let probs = self.predict_proba(row);
        u8::from(probs[1] > probs[0])
    }

    pub fn num_features(&self) -> usize {
        self.weights.len()
    }
}
