//! Dashboard API route handlers.
//!
//! All endpoints return JSON. The session is shared via
//! `Arc<DashboardState>`; each handler locks it for a single operation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::engine::accountant::Aggregates;
use crate::engine::{MatchView, Session, SessionError};
use crate::notify::{Notification, NotificationRecord};
use crate::types::{ConfirmedBet, MatchId, Outcome, PendingSlip};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub session: Mutex<Session>,
    pub min_stake: Decimal,
    pub currency: String,
}

impl DashboardState {
    pub fn new(session: Session, min_stake: Decimal, currency: impl Into<String>) -> Self {
        Self {
            session: Mutex::new(session),
            min_stake,
            currency: currency.into(),
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SelectRequest {
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakeRequest {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlipResponse {
    pub match_id: MatchId,
    pub selection: Option<Outcome>,
    pub stake: Decimal,
    pub preview_payout: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerResponse {
    pub balance: Decimal,
    pub currency: String,
    pub default_stake: Decimal,
    pub min_stake: Decimal,
    pub pending: Vec<PendingSlip>,
    pub bets: Vec<ConfirmedBet>,
    pub aggregates: Aggregates,
}

#[derive(Debug, Clone, Serialize)]
pub struct BetResponse {
    pub bet: ConfirmedBet,
    pub balance: Decimal,
    pub notification: Notification,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// Body missing, not JSON, or not the expected shape.
    BadRequest(String),
    /// Commit refused by the ledger; carries the emitted notification.
    Rejected(Notification),
}

impl ApiError {
    /// Map a session failure on `match_id`. Ledger refusals reuse the
    /// notification the session just emitted.
    fn from_session(err: SessionError, session: &Session, match_id: MatchId) -> Self {
        match err {
            SessionError::UnknownMatch(_) => ApiError::NotFound(err.to_string()),
            SessionError::Ledger(e) => ApiError::Rejected(
                session
                    .last_notification()
                    .map(|record| record.notification.clone())
                    .filter(|n| !n.is_success() && n.match_id() == match_id)
                    .unwrap_or_else(|| Notification::rejected(match_id, &e)),
            ),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Rejected(notification) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(notification)).into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

fn slip(session: &Session, match_id: MatchId) -> SlipResponse {
    let ledger = session.ledger();
    SlipResponse {
        match_id,
        selection: ledger.selection(match_id),
        stake: ledger.stake(match_id),
        preview_payout: session
            .catalog()
            .get(match_id)
            .and_then(|m| ledger.preview_payout(m)),
    }
}

/// GET /api/matches
pub async fn get_matches(State(state): State<AppState>) -> Json<Vec<MatchView>> {
    let session = state.session.lock().await;
    Json(session.matches())
}

/// GET /api/ledger
pub async fn get_ledger(State(state): State<AppState>) -> Json<LedgerResponse> {
    let session = state.session.lock().await;
    let snapshot = session.snapshot();
    Json(LedgerResponse {
        balance: snapshot.balance,
        currency: state.currency.clone(),
        default_stake: session.ledger().default_stake(),
        min_stake: state.min_stake,
        pending: snapshot.pending,
        bets: snapshot.bets,
        aggregates: snapshot.aggregates,
    })
}

/// POST /api/matches/:id/select
pub async fn select_outcome(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<SlipResponse>, ApiError> {
    let Json(req) = payload?;
    let mut session = state.session.lock().await;
    session
        .select_outcome(match_id, req.outcome)
        .map_err(|e| ApiError::from_session(e, &session, match_id))?;
    Ok(Json(slip(&session, match_id)))
}

/// PUT /api/matches/:id/stake
pub async fn set_stake(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    payload: Result<Json<StakeRequest>, JsonRejection>,
) -> Result<Json<SlipResponse>, ApiError> {
    let Json(req) = payload?;
    let mut session = state.session.lock().await;
    session
        .set_stake(match_id, req.amount)
        .map_err(|e| ApiError::from_session(e, &session, match_id))?;
    Ok(Json(slip(&session, match_id)))
}

/// POST /api/matches/:id/bets
pub async fn place_bet(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
) -> Result<(StatusCode, Json<BetResponse>), ApiError> {
    let mut session = state.session.lock().await;
    match session.place_bet(match_id) {
        Ok(bet) => {
            let notification = Notification::accepted(&bet);
            Ok((
                StatusCode::CREATED,
                Json(BetResponse {
                    bet,
                    balance: session.ledger().balance(),
                    notification,
                }),
            ))
        }
        Err(e) => Err(ApiError::from_session(e, &session, match_id)),
    }
}

/// GET /api/notifications
pub async fn get_notifications(State(state): State<AppState>) -> Json<Vec<NotificationRecord>> {
    let session = state.session.lock().await;
    Json(session.recent_notifications())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
