//! Handlers for the two-stage submission flow.
//!
//! Both handlers follow the same commit order: validate, build the record,
//! append to the sheet, and only then mutate the session. A validation or
//! append failure therefore leaves the session exactly where it was, and
//! the annotator resubmits.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use facepair_core::validation::validate_explanation;
use facepair_core::{AnnotationRecord, CoreError, Decision, Stage};

use crate::error::{session_not_found, AppError, AppResult};
use crate::handlers::session::Reveal;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitReflectionRequest {
    #[serde(default)]
    pub explanation: String,
}

/// Outcome of an initial submission.
#[derive(Debug, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Whether the whole traversal is now complete.
    pub done: bool,
    /// Present only when the answer was wrong: the correct label to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
}

/// Outcome of a follow-up submission.
#[derive(Debug, Serialize)]
pub struct ReflectionOutcome {
    pub done: bool,
}

/// POST /api/v1/sessions/{id}/answers
///
/// The initial same/different judgment plus its explanation. A correct
/// answer completes the pair immediately (one sheet row, advance); a wrong
/// one transitions to the follow-up stage without writing anything yet.
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SubmitAnswerRequest>,
) -> AppResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;

    if session.stage() != Stage::AwaitingInitial {
        return Err(AppError::Core(CoreError::Validation(
            "A follow-up reflection is pending for this pair".to_string(),
        )));
    }

    let Some(pair) = session.current(&state.pairs) else {
        return Err(AppError::Core(CoreError::Validation(
            "All pairs are already annotated".to_string(),
        )));
    };

    if input.decision.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please select whether these are the same person or different people".to_string(),
        )));
    }
    let decision = Decision::parse(&input.decision)?;
    let explanation = validate_explanation("explanation", &input.explanation)?;

    if decision == pair.ground_truth {
        let record =
            AnnotationRecord::new(session.annotator_id(), pair, decision, explanation, None);
        state.writer.append(&record).await?;
        session.complete_current(&state.pairs);

        tracing::info!(
            session_id = %id,
            pair_index = record.pair_index,
            decision = decision.as_str(),
            "Annotation saved (correct on first answer)"
        );

        Ok(Json(DataResponse {
            data: AnswerOutcome {
                correct: true,
                done: session.is_done(&state.pairs),
                reveal: None,
            },
        }))
    } else {
        let reveal = Reveal {
            ground_truth: pair.ground_truth,
            decision,
        };
        session.note_incorrect(decision, explanation)?;

        tracing::info!(
            session_id = %id,
            decision = decision.as_str(),
            "Wrong answer, awaiting follow-up reflection"
        );

        Ok(Json(DataResponse {
            data: AnswerOutcome {
                correct: false,
                done: false,
                reveal: Some(reveal),
            },
        }))
    }
}

/// POST /api/v1/sessions/{id}/reflection
///
/// The follow-up reflection after a wrong answer. Completes the pair: one
/// sheet row carrying the retained initial answer plus the reflection.
pub async fn submit_reflection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SubmitReflectionRequest>,
) -> AppResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;

    if session.stage() != Stage::AwaitingFollowup {
        return Err(AppError::Core(CoreError::Validation(
            "No follow-up is pending for this pair".to_string(),
        )));
    }

    let explanation = validate_explanation("reflection", &input.explanation)?;

    // Both are guaranteed by the awaiting_followup stage.
    let pending = session
        .pending()
        .cloned()
        .ok_or_else(|| AppError::InternalError("follow-up stage with no pending answer".into()))?;
    let pair = session
        .current(&state.pairs)
        .ok_or_else(|| AppError::InternalError("follow-up stage with no current pair".into()))?;

    let record = AnnotationRecord::new(
        session.annotator_id(),
        pair,
        pending.decision,
        pending.explanation,
        Some(explanation),
    );
    state.writer.append(&record).await?;
    session.complete_current(&state.pairs);

    tracing::info!(
        session_id = %id,
        pair_index = record.pair_index,
        "Annotation saved (after follow-up reflection)"
    );

    Ok(Json(DataResponse {
        data: ReflectionOutcome {
            done: session.is_done(&state.pairs),
        },
    }))
}
