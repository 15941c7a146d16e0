//! The finished annotation record: one spreadsheet row per completed pair.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::pairs::{Decision, Pair};

/// Column order of the output sheet. `to_row` and the header bootstrap in
/// the sheets crate must stay in sync with this.
pub const SHEET_HEADER: [&str; 11] = [
    "timestamp",
    "annotator_id",
    "pair_index",
    "image_a",
    "image_b",
    "ground_truth",
    "celeb_id",
    "human_decision",
    "initial_explanation",
    "is_correct",
    "followup_explanation",
];

/// One annotator's submitted judgment for one pair.
///
/// Created once per completed pair and never mutated. `is_correct` is
/// derived from the decision and the pair's ground truth;
/// `followup_explanation` is non-empty exactly when the decision was wrong.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationRecord {
    pub timestamp: String,
    pub annotator_id: String,
    pub pair_index: i64,
    pub image_a: String,
    pub image_b: String,
    pub ground_truth: Decision,
    pub celeb_id: String,
    pub human_decision: Decision,
    pub initial_explanation: String,
    pub is_correct: bool,
    pub followup_explanation: String,
}

impl AnnotationRecord {
    /// Assemble a record for `pair`, stamped with the current UTC time.
    ///
    /// Pass `followup_explanation: None` when the decision was correct; the
    /// stored cell is then empty.
    pub fn new(
        annotator_id: &str,
        pair: &Pair,
        human_decision: Decision,
        initial_explanation: String,
        followup_explanation: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            annotator_id: annotator_id.to_string(),
            pair_index: pair.index,
            image_a: pair.image_a.clone(),
            image_b: pair.image_b.clone(),
            ground_truth: pair.ground_truth,
            celeb_id: pair.celeb_id.clone(),
            human_decision,
            initial_explanation,
            is_correct: human_decision == pair.ground_truth,
            followup_explanation: followup_explanation.unwrap_or_default(),
        }
    }

    /// The record as a sheet row, in [`SHEET_HEADER`] column order.
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.timestamp.clone()),
            Value::from(self.annotator_id.clone()),
            Value::from(self.pair_index),
            Value::from(self.image_a.clone()),
            Value::from(self.image_b.clone()),
            Value::from(self.ground_truth.as_str()),
            Value::from(self.celeb_id.clone()),
            Value::from(self.human_decision.as_str()),
            Value::from(self.initial_explanation.clone()),
            Value::from(self.is_correct),
            Value::from(self.followup_explanation.clone()),
        ]
    }
}

/// The header row the sheets crate writes into an empty spreadsheet.
pub fn header_row() -> Vec<Value> {
    SHEET_HEADER.iter().map(|c| Value::from(*c)).collect()
}
