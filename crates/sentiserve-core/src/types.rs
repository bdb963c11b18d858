//! Domain types shared across the trainer, predictor, and HTTP boundary

use serde::{Deserialize, Serialize};

/// Binary sentiment label.
///
/// The discriminants match the class indices used at training time:
/// 0 is negative, 1 is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative = 0,
    Positive = 1,
}

impl Label {
    /// All labels in class-index order.
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    /// Map a class index to its label.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    /// The class index this label was trained against.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Positive => "positive",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single sentiment prediction.
///
/// `score` is the probability the model assigned to the predicted
/// label, so for a two-class model it is always in `[0.5, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    pub score: f64,
}
