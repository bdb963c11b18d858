//! Held-out evaluation: accuracy plus a per-class
//! precision/recall/F1 report.

use serde::{Deserialize, Serialize};
use sentiserve_core::Label;

/// Fraction of exact label matches.
pub fn accuracy(predicted: &[u8], truth: &[u8]) -> f64 {
    assert_eq!(predicted.len(), truth.len());
    if truth.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(truth)
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / truth.len() as f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics over a held-out partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
}

impl ClassificationReport {
    pub fn compute(predicted: &[u8], truth: &[u8]) -> Self {
        let classes = Label::ALL
            .iter()
            .map(|&label| {
                let class = label.index() as u8;
                let tp = count(predicted, truth, |p, t| p == class && t == class);
                let fp = count(predicted, truth, |p, t| p == class && t != class);
                let fn_ = count(predicted, truth, |p, t| p != class && t == class);

                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support: tp + fn_,
                }
            })
            .collect();

        Self {
            classes,
            accuracy: accuracy(predicted, truth),
        }
    }

    /// Multi-line text table for human inspection, written alongside
    /// the artifact and printed by the train command.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
            "", "precision", "recall", "f1-score", "support"
        ));
        for class in &self.classes {
            out.push_str(&format!(
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
                class.label.as_str(),
                class.precision,
                class.recall,
                class.f1,
                class.support
            ));
        }
        let total: usize = self.classes.iter().map(|c| c.support).sum();
        out.push_str(&format!(
            "\n{:>12} {:>32.2} {:>10}\n",
            "accuracy", self.accuracy, total
        ));
        out
    }
}

fn count(predicted: &[u8], truth: &[u8], pred: impl Fn(u8, u8) -> bool) -> usize {
    predicted
        .iter()
        .zip(truth)
        .filter(|(&p, &t)| pred(p, t))
        .count()
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}
