//! Console commands running over the real HTTP client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use beat_admin::commands::{beat, maintenance, NETWORK_ERROR_MESSAGE, NETWORK_ERROR_TITLE};
use beat_admin::state::{FixedAnswer, NotificationSettings};
use beat_admin::{AdminConsole, CommandOutcome};
use beat_api::{AdminClient, ApiConfig};
use beat_core::{Beat, FieldEdit, Money};
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Console = AdminConsole<AdminClient, FixedAnswer>;

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn console_for(base_url: &str) -> Console {
    let client = AdminClient::new(&ApiConfig::with_base_url(base_url)).unwrap();
    let settings = NotificationSettings::default();
    let mut console = AdminConsole::new(client, FixedAnswer(true), &settings);
    console
        .editor_mut()
        .load(vec![
            Beat::new(1, "Sunset", Money::from_cents(1999)),
            Beat::new(2, "Rain", Money::from_cents(2500)),
        ])
        .unwrap();
    console
}

fn messages(console: &Console) -> Vec<String> {
    console
        .notifications()
        .active()
        .iter()
        .map(|t| t.message.clone())
        .collect()
}

#[tokio::test]
async fn test_edit_then_save_posts_recalculated_form() {
    let captured: Arc<Mutex<HashMap<String, String>>> = Arc::default();

    async fn handler(
        State(captured): State<Arc<Mutex<HashMap<String, String>>>>,
        mut multipart: Multipart,
    ) -> StatusCode {
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await.unwrap();
            captured.lock().unwrap().insert(name, value);
        }
        StatusCode::OK
    }

    let base = spawn(Router::new().route("/", post(handler)).with_state(captured.clone())).await;
    let mut console = console_for(&base);

    assert_eq!(
        beat::edit_field(&mut console, 1, FieldEdit::Discounted(true)),
        CommandOutcome::Completed
    );
    assert_eq!(
        beat::edit_field(&mut console, 1, FieldEdit::DiscountPercent(25)),
        CommandOutcome::Completed
    );
    assert_eq!(beat::save_beat(&mut console, 1).await, CommandOutcome::Completed);

    let form = captured.lock().unwrap().clone();
    assert_eq!(form["original_price_1"], "19.99");
    assert_eq!(form["discounted_price_1"], "14.99");
    assert_eq!(form["is_discounted_1"], "1");
    assert_eq!(form["discount_percent_1"], "25");
    assert_eq!(messages(&console), vec!["'Sunset' saved"]);
}

#[tokio::test]
async fn test_save_all_reports_server_details() {
    let router = Router::new().route(
        "/api/save-all-beats",
        post(|| async {
            Json(json!({
                "success": false,
                "error": "Some beats could not be saved",
                "details": ["Beat 2: not found"]
            }))
        }),
    );
    let mut console = console_for(&spawn(router).await);

    assert_eq!(beat::save_all(&mut console).await, CommandOutcome::Failed);
    assert_eq!(
        messages(&console),
        vec!["Some beats could not be saved", "Beat 2: not found"]
    );
}

#[tokio::test]
async fn test_save_all_unreachable_server() {
    // Bind then drop, so nothing listens on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut console = console_for(&format!("http://{addr}"));
    assert_eq!(beat::save_all(&mut console).await, CommandOutcome::Failed);

    let toast = &console.notifications().active()[0];
    assert_eq!(toast.title.as_deref(), Some(NETWORK_ERROR_TITLE));
    assert_eq!(toast.message, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_confirmed_reset_refreshes_stats() {
    let router = Router::new()
        .route(
            "/admin/reset-database",
            post(|| async { Json(json!({ "success": true, "message": "Database rebuilt" })) }),
        )
        .route(
            "/admin/database-stats",
            get(|| async { Json(json!({ "total_beats": 0, "active_bundles": 0 })) }),
        );
    let mut console = console_for(&spawn(router).await);

    assert_eq!(maintenance::reset_database(&mut console).await, CommandOutcome::Completed);
    assert_eq!(messages(&console), vec!["Database rebuilt"]);
    assert_eq!(console.stats().map(|s| s.total_beats), Some(0));
}

#[tokio::test]
async fn test_declined_reset_sends_nothing() {
    let hits: Arc<Mutex<u32>> = Arc::default();

    async fn handler(State(hits): State<Arc<Mutex<u32>>>) -> Json<Value> {
        *hits.lock().unwrap() += 1;
        Json(json!({ "success": true }))
    }

    let router = Router::new()
        .route("/admin/reset-database", post(handler))
        .with_state(hits.clone());
    let client = AdminClient::new(&ApiConfig::with_base_url(spawn(router).await)).unwrap();
    let settings = NotificationSettings::default();
    let mut console = AdminConsole::new(client, FixedAnswer(false), &settings);

    assert_eq!(maintenance::reset_database(&mut console).await, CommandOutcome::Cancelled);
    assert_eq!(*hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_update_with_single_detail_string_refreshes_stats() {
    let router = Router::new()
        .route(
            "/admin/update-database",
            post(|| async {
                Json(json!({
                    "success": true,
                    "message": "Updated",
                    "details": "12 beats imported"
                }))
            }),
        )
        .route(
            "/admin/database-stats",
            get(|| async { Json(json!({ "total_beats": 12 })) }),
        );
    let mut console = console_for(&spawn(router).await);

    assert_eq!(maintenance::update_database(&mut console).await, CommandOutcome::Completed);
    assert_eq!(messages(&console), vec!["Updated", "12 beats imported"]);
    assert_eq!(console.stats().map(|s| s.total_beats), Some(12));
}
