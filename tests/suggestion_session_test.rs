//! Sessions against an automated opponent: staleness, failures and HTTP.

use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use strictly_gomoku::{
    Coord, GameMode, GameSession, HttpSuggester, MatchSetup, MoveError, MoveOutcome,
    MoveSuggester, Player, Resolution, ScoreTally, SessionError, SuggestionRequest,
    SuggestionResponse, SuggestionUnavailable,
};

/// Replays canned answers in order.
#[derive(Default)]
struct ScriptedSuggester {
    answers: Mutex<VecDeque<Result<SuggestionResponse, SuggestionUnavailable>>>,
    calls: AtomicUsize,
}

impl ScriptedSuggester {
    fn with(answers: Vec<Result<SuggestionResponse, SuggestionUnavailable>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoveSuggester for ScriptedSuggester {
    async fn suggest(
        &self,
        _request: SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestionUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SuggestionUnavailable::new("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Never answers; signals when its call starts and when it is dropped.
struct HangingSuggester {
    started: Arc<Notify>,
    dropped: Arc<Notify>,
}

struct DropSignal(Arc<Notify>);

impl Drop for DropSignal {
    fn drop(&mut self) {
        self.0.notify_one();
    }
}

#[async_trait]
impl MoveSuggester for HangingSuggester {
    async fn suggest(
        &self,
        _request: SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestionUnavailable> {
        let _signal = DropSignal(self.dropped.clone());
        self.started.notify_one();
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

fn ok(row: i64, col: i64) -> Result<SuggestionResponse, SuggestionUnavailable> {
    Ok(SuggestionResponse { row, col })
}

fn versus(suggester: Arc<dyn MoveSuggester>) -> GameSession {
    let setup = MatchSetup::new(GameMode::VersusService, "Ann", "Gomoku AI");
    GameSession::start(setup, Player::A)
        .unwrap()
        .with_opponent(Player::B, suggester)
}

#[tokio::test]
async fn test_suggestion_applied_for_automated_player() {
    let script = ScriptedSuggester::with(vec![ok(4, 4)]);
    let mut session = versus(script.clone());

    session.play(Coord::new(0, 0)).unwrap();
    assert!(session.is_automated_turn());
    assert!(session.request_suggestion().unwrap().is_some());

    let resolution = session.await_suggestion().await.unwrap();
    assert_eq!(resolution, Some(Resolution::Applied(MoveOutcome::Continue)));
    assert_eq!(session.game().grid().occupant(Coord::new(4, 4)), Some(Player::B));
    assert_eq!(session.game().current_player(), Player::A);
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_human_cannot_move_on_automated_turn() {
    let mut session = versus(ScriptedSuggester::with(vec![]));
    session.play(Coord::new(0, 0)).unwrap();

    let result = session.play(Coord::new(1, 1));
    assert!(matches!(
        result,
        Err(SessionError::Move(MoveError::NotYourTurn(Player::A)))
    ));
    assert_eq!(session.game().history().len(), 1);
}

#[tokio::test]
async fn test_response_after_undo_is_discarded() {
    let script = ScriptedSuggester::with(vec![ok(3, 3)]);
    let mut session = versus(script);

    session.play(Coord::new(0, 0)).unwrap();
    let ticket = session.request_suggestion().unwrap().unwrap();
    assert_eq!(ticket.player(), Player::B);

    // Human takes the move back while the service is thinking.
    session.undo().unwrap();
    assert_eq!(session.game().current_player(), Player::A);

    let resolution = session.await_suggestion().await.unwrap();
    assert_eq!(resolution, Some(Resolution::Discarded));
    assert_eq!(session.game().grid().stone_count(), 0);
    assert!(session.pending_ticket().is_none());
}

#[tokio::test]
async fn test_stale_ticket_discarded_when_turn_returns() {
    let mut session = versus(ScriptedSuggester::with(vec![]));
    session.play(Coord::new(0, 0)).unwrap();
    let stale = session.request_suggestion().unwrap().unwrap();

    // Back to A, then A plays again: B to move once more, on a new position.
    session.undo().unwrap();
    session.play(Coord::new(5, 5)).unwrap();
    assert_eq!(session.game().current_player(), stale.player());

    let resolution = session.resolve_suggestion(stale, ok(2, 2)).unwrap();
    assert_eq!(resolution, Resolution::Discarded);
    assert_eq!(session.game().grid().occupant(Coord::new(2, 2)), None);
}

#[tokio::test]
async fn test_manual_resolution_stops_pending_request() {
    let started = Arc::new(Notify::new());
    let dropped = Arc::new(Notify::new());
    let mut session = versus(Arc::new(HangingSuggester {
        started: started.clone(),
        dropped: dropped.clone(),
    }));

    session.play(Coord::new(0, 0)).unwrap();
    let ticket = session.request_suggestion().unwrap().unwrap();
    started.notified().await;

    let resolution = session.resolve_suggestion(ticket, ok(3, 3)).unwrap();
    assert_eq!(resolution, Resolution::Applied(MoveOutcome::Continue));
    assert!(session.pending_ticket().is_none());

    tokio::time::timeout(Duration::from_secs(1), dropped.notified())
        .await
        .expect("in-flight request should be aborted");
}

#[tokio::test]
async fn test_pending_request_reused_then_replaced_when_stale() {
    let script = ScriptedSuggester::with(vec![ok(6, 6), ok(6, 7)]);
    let mut session = versus(script.clone());

    session.play(Coord::new(0, 0)).unwrap();
    let first = session.request_suggestion().unwrap().unwrap();
    let again = session.request_suggestion().unwrap().unwrap();
    assert_eq!(first, again);

    session.undo().unwrap();
    session.play(Coord::new(1, 0)).unwrap();
    let fresh = session.request_suggestion().unwrap().unwrap();
    assert_ne!(fresh, first);
    assert_eq!(session.pending_ticket(), Some(fresh));

    let resolution = session.await_suggestion().await.unwrap();
    assert!(matches!(resolution, Some(Resolution::Applied(_))));
}

#[tokio::test]
async fn test_unavailable_leaves_match_unchanged_and_retry_works() {
    let script = ScriptedSuggester::with(vec![
        Err(SuggestionUnavailable::new("service down".to_string())),
        ok(7, 7),
    ]);
    let mut session = versus(script.clone());
    session.play(Coord::new(0, 0)).unwrap();
    let before = session.game().clone();

    session.request_suggestion().unwrap();
    let result = session.await_suggestion().await;
    assert!(matches!(result, Err(SessionError::Suggestion(_))));
    assert_eq!(session.game(), &before);
    assert!(session.is_automated_turn());

    session.request_suggestion().unwrap();
    let resolution = session.await_suggestion().await.unwrap();
    assert!(matches!(resolution, Some(Resolution::Applied(_))));
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn test_malformed_and_illegal_suggestions_rejected() {
    let script = ScriptedSuggester::with(vec![ok(-1, 2), ok(8, 0), ok(0, 0)]);
    let mut session = versus(script);
    session.play(Coord::new(0, 0)).unwrap();
    let before = session.game().clone();

    session.request_suggestion().unwrap();
    assert!(matches!(
        session.await_suggestion().await,
        Err(SessionError::Suggestion(_))
    ));

    session.request_suggestion().unwrap();
    assert!(matches!(
        session.await_suggestion().await,
        Err(SessionError::Move(MoveError::OutOfBounds(_)))
    ));

    session.request_suggestion().unwrap();
    assert!(matches!(
        session.await_suggestion().await,
        Err(SessionError::Move(MoveError::CellOccupied(_)))
    ));
    assert_eq!(session.game(), &before);
}

#[tokio::test]
async fn test_automated_win_is_recorded_once() {
    let script = ScriptedSuggester::with((0..5).map(|col| ok(7, col)).collect());
    let mut session = versus(script);
    let tally = ScoreTally::new();

    for col in [0, 2, 4, 6, 1] {
        session.play(Coord::new(0, col)).unwrap();
        session.request_suggestion().unwrap();
        session.await_suggestion().await.unwrap();
    }

    assert_eq!(session.game().winner_name(), Some("Gomoku AI"));
    assert_eq!(session.record_result(&tally), Some(1));
    assert_eq!(session.record_result(&tally), None);
    assert_eq!(tally.get("Gomoku AI"), 1);
    assert!(session.request_suggestion().unwrap().is_none());
}

// ─────────────────────────────────────────────────────────────
//  HTTP transport against an in-process service
// ─────────────────────────────────────────────────────────────

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn first_empty(Json(request): Json<SuggestionRequest>) -> Json<SuggestionResponse> {
    let (row, col) = request
        .grid
        .iter()
        .enumerate()
        .flat_map(|(r, cells)| cells.iter().enumerate().map(move |(c, v)| (r, c, *v)))
        .find(|(_, _, v)| *v == 0)
        .map(|(r, c, _)| (r as i64, c as i64))
        .unwrap();
    Json(SuggestionResponse { row, col })
}

#[tokio::test]
async fn test_http_suggester_round_trip() {
    let app = Router::new()
        .route("/predict", post(first_empty))
        .route("/health", get(|| async { "ok" }));
    let base = serve(app).await;
    let client = HttpSuggester::new(&base, Duration::from_secs(2)).unwrap();

    client.health().await.unwrap();
    let mut session = versus(Arc::new(client));
    session.play(Coord::new(0, 0)).unwrap();
    session.request_suggestion().unwrap();
    let resolution = session.await_suggestion().await.unwrap();

    assert!(matches!(resolution, Some(Resolution::Applied(MoveOutcome::Continue))));
    assert_eq!(session.game().grid().occupant(Coord::new(0, 1)), Some(Player::B));
}

#[tokio::test]
async fn test_http_wire_format() {
    let seen = Arc::new(Mutex::new(None::<serde_json::Value>));
    let captured = seen.clone();
    let app = Router::new().route(
        "/predict",
        post(move |Json(body): Json<serde_json::Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(serde_json::json!({ "row": 2, "col": 5 }))
            }
        }),
    );
    let base = serve(app).await;
    let client = HttpSuggester::new(format!("{}/", base), Duration::from_secs(2)).unwrap();

    let request = SuggestionRequest {
        grid: vec![vec![1, 0], vec![0, -1]],
        current_player: 1,
    };
    let response = client.suggest(request).await.unwrap();
    assert_eq!(response, SuggestionResponse { row: 2, col: 5 });

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["currentPlayer"], 1);
    assert_eq!(body["grid"][1][1], -1);
}

#[tokio::test]
async fn test_http_error_status_is_unavailable() {
    let app = Router::new()
        .route(
            "/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        )
        .route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = serve(app).await;
    let client = HttpSuggester::new(&base, Duration::from_secs(2)).unwrap();

    assert!(client.health().await.is_err());

    let mut session = versus(Arc::new(client));
    session.play(Coord::new(3, 3)).unwrap();
    let before = session.game().clone();
    session.request_suggestion().unwrap();

    assert!(matches!(
        session.await_suggestion().await,
        Err(SessionError::Suggestion(_))
    ));
    assert_eq!(session.game(), &before);
}

#[tokio::test]
async fn test_http_garbage_body_is_unavailable() {
    let app = Router::new().route("/predict", post(|| async { "not json" }));
    let base = serve(app).await;
    let client = HttpSuggester::new(&base, Duration::from_secs(2)).unwrap();

    let request = SuggestionRequest {
        grid: vec![vec![0; 8]; 8],
        current_player: -1,
    };
    assert!(client.suggest(request).await.is_err());
}
