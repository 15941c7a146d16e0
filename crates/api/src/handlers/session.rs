//! Handlers for session lifecycle: start/resume, snapshot, restart.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use facepair_core::session::PendingAnswer;
use facepair_core::validation::validate_annotator_id;
use facepair_core::{AnnotationSession, Decision, ImageResolver, Pair, Stage};

use crate::error::{session_not_found, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   View types
   -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub annotator_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub annotator_id: String,
    pub total: usize,
    pub completed: usize,
}

/// The current pair as the browser should display it.
#[derive(Debug, Serialize)]
pub struct PairView {
    pub pair_index: i64,
    pub image_a: String,
    pub image_b: String,
    pub image_a_url: String,
    pub image_b_url: String,
}

/// Shown after a wrong initial answer: the correct label next to the
/// annotator's own.
#[derive(Debug, Serialize)]
pub struct Reveal {
    pub ground_truth: Decision,
    pub decision: Decision,
}

/// Everything the page needs to render one interaction.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub annotator_id: String,
    pub total: usize,
    pub completed: usize,
    pub done: bool,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<PairView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
}

/// Assemble the render snapshot for one session.
pub fn snapshot(
    session: &AnnotationSession,
    pairs: &[Pair],
    resolver: &ImageResolver,
) -> SessionSnapshot {
    let pair = session.current(pairs).map(|p| PairView {
        pair_index: p.index,
        image_a: p.image_a.clone(),
        image_b: p.image_b.clone(),
        image_a_url: resolver.display_url(&p.image_a),
        image_b_url: resolver.display_url(&p.image_b),
    });

    let reveal = match (session.stage(), session.current(pairs), session.pending()) {
        (Stage::AwaitingFollowup, Some(pair), Some(PendingAnswer { decision, .. })) => {
            Some(Reveal {
                ground_truth: pair.ground_truth,
                decision: *decision,
            })
        }
        _ => None,
    };

    SessionSnapshot {
        annotator_id: session.annotator_id().to_string(),
        total: pairs.len(),
        completed: session.completed_count(),
        done: session.is_done(pairs),
        stage: session.stage(),
        pair,
        reveal,
    }
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// POST /api/v1/sessions
///
/// Start (or resume) a session for an annotator. Progress already recorded
/// in the sheet is picked up so the annotator continues with the first
/// remaining pair; a resume read failure degrades to a fresh traversal.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<impl IntoResponse> {
    let annotator_id = validate_annotator_id(&input.annotator_id)?;

    let completed = match state.writer.completed_pairs(&annotator_id).await {
        Ok(indices) => indices.into_iter().collect(),
        Err(err) => {
            tracing::warn!(error = %err, annotator_id = %annotator_id, "Could not read completed pairs, starting fresh");
            Default::default()
        }
    };

    let session = AnnotationSession::new(annotator_id.clone(), completed, &state.pairs);
    let completed_count = session.completed_count();
    let session_id = state.sessions.create(session).await;
    let active_sessions = state.sessions.count().await;

    tracing::info!(
        session_id = %session_id,
        annotator_id = %annotator_id,
        completed = completed_count,
        total = state.pairs.len(),
        active_sessions = active_sessions,
        "Session started"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SessionCreated {
                session_id,
                annotator_id,
                total: state.pairs.len(),
                completed: completed_count,
            },
        }),
    ))
}

/// GET /api/v1/sessions/{id}
///
/// The render snapshot: current pair with display URLs, stage, progress,
/// and the reveal payload while a follow-up is pending.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(&id))?;

    Ok(Json(DataResponse {
        data: snapshot(session, &state.pairs, &state.resolver),
    }))
}

/// POST /api/v1/sessions/{id}/restart
///
/// Forget all progress for this session and traverse the table again.
pub async fn restart_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;

    session.restart();
    tracing::info!(session_id = %id, annotator_id = %session.annotator_id(), "Session restarted");

    Ok(Json(DataResponse {
        data: snapshot(session, &state.pairs, &state.resolver),
    }))
}
