//! Per-session traversal state and the two-stage answer state machine.
//!
//! One [`AnnotationSession`] exists per browser session and is never shared
//! between annotators. The per-pair flow is:
//!
//! ```text
//! awaiting_initial --[decision == ground_truth]--> complete, advance
//! awaiting_initial --[decision != ground_truth]--> awaiting_followup
//! awaiting_followup --[reflection submitted]-----> complete, advance
//! ```
//!
//! Completion is driven by the caller: [`AnnotationSession::complete_current`]
//! must only run after the record was durably appended, so a failed write
//! never advances the cursor.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::pairs::{Decision, Pair};

/// Which form the annotator sees for the current pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingInitial,
    AwaitingFollowup,
}

/// The initial answer retained while the follow-up reflection is pending.
#[derive(Debug, Clone)]
pub struct PendingAnswer {
    pub decision: Decision,
    pub explanation: String,
}

/// One annotator's mutable position in the pair sequence.
#[derive(Debug)]
pub struct AnnotationSession {
    annotator_id: String,
    /// Position in the loaded pair sequence, always sitting on the first
    /// not-yet-completed pair (or past the end when done).
    cursor: usize,
    stage: Stage,
    pending: Option<PendingAnswer>,
    completed: HashSet<i64>,
}

impl AnnotationSession {
    /// Start a session, seeding `completed` with pair indices already
    /// submitted (e.g. read back from the sheet on resume). Indices that do
    /// not exist in the table are dropped.
    pub fn new(annotator_id: String, completed: HashSet<i64>, pairs: &[Pair]) -> Self {
        let valid: HashSet<i64> = pairs.iter().map(|p| p.index).collect();
        let completed = completed.into_iter().filter(|i| valid.contains(i)).collect();

        let mut session = Self {
            annotator_id,
            cursor: 0,
            stage: Stage::AwaitingInitial,
            pending: None,
            completed,
        };
        session.skip_completed(pairs);
        session
    }

    pub fn annotator_id(&self) -> &str {
        &self.annotator_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The retained initial answer, present only in `awaiting_followup`.
    pub fn pending(&self) -> Option<&PendingAnswer> {
        self.pending.as_ref()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// The pair currently being annotated, or `None` when the traversal is
    /// complete.
    pub fn current<'a>(&self, pairs: &'a [Pair]) -> Option<&'a Pair> {
        pairs.get(self.cursor)
    }

    pub fn is_done(&self, pairs: &[Pair]) -> bool {
        self.cursor >= pairs.len()
    }

    /// Transition `awaiting_initial -> awaiting_followup`, retaining the
    /// wrong initial answer for the eventual record.
    pub fn note_incorrect(
        &mut self,
        decision: Decision,
        explanation: String,
    ) -> Result<(), CoreError> {
        if self.stage != Stage::AwaitingInitial {
            return Err(CoreError::Validation(
                "A follow-up reflection is already pending for this pair".to_string(),
            ));
        }
        self.pending = Some(PendingAnswer {
            decision,
            explanation,
        });
        self.stage = Stage::AwaitingFollowup;
        Ok(())
    }

    /// Mark the current pair completed and move to the next remaining one.
    ///
    /// Call only after the record for the current pair was appended
    /// successfully. Resets the stage to `awaiting_initial`.
    pub fn complete_current(&mut self, pairs: &[Pair]) {
        if let Some(pair) = pairs.get(self.cursor) {
            self.completed.insert(pair.index);
        }
        self.pending = None;
        self.stage = Stage::AwaitingInitial;
        self.cursor += 1;
        self.skip_completed(pairs);
    }

    /// Forget all progress and traverse the table again from the start.
    pub fn restart(&mut self) {
        self.completed.clear();
        self.pending = None;
        self.stage = Stage::AwaitingInitial;
        self.cursor = 0;
    }

    fn skip_completed(&mut self, pairs: &[Pair]) {
        while pairs
            .get(self.cursor)
            .is_some_and(|p| self.completed.contains(&p.index))
        {
            self.cursor += 1;
        }
    }
}
