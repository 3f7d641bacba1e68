//! Shared test infrastructure: an in-process stand-in for the hosted
//! backend, speaking just enough of its REST dialect for the data layer.
//!
//! Each test spawns its own stub server with empty state and gets a
//! `Backend` pointed at it, so tests are fully isolated:
//!
//! - `GET /rest/v1/{table}` — `eq.` filters, `order`, `limit`
//! - `POST /rest/v1/{table}` — insert with a unique-email constraint on
//!   `waitlist` and `community_registrations`
//! - `PATCH /rest/v1/{table}` — merge-update of the filtered rows
//! - `POST /rest/v1/rpc/handle_account_deletion_request` — pending-request
//!   deduplication keyed on email

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use ments_site::backend::{Backend, BackendConfig};

/// Rows per table, an id counter, and optional scripted failures.
#[derive(Default)]
pub struct StubState {
    pub tables: HashMap<String, Vec<Value>>,
    pub next_id: u64,
    /// Write requests served (insert + update + rpc).
    pub writes: u64,
    /// One-shot failure for the next request of any kind.
    pub fail_next: Option<(u16, Value)>,
    /// One-shot failure for the next write request only.
    pub fail_next_write: Option<(u16, Value)>,
}

pub type SharedState = Arc<Mutex<StubState>>;

/// Spawn a stub backend on an ephemeral port and a `Backend` wired to it.
pub async fn spawn_stub() -> (SharedState, Backend) {
    let state: SharedState = Arc::new(Mutex::new(StubState::default()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    let data = web::Data::new(state.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/rest/v1/rpc/{name}", web::post().to(rpc_call))
            .route("/rest/v1/{table}", web::get().to(select_rows))
            .route("/rest/v1/{table}", web::post().to(insert_row))
            .route("/rest/v1/{table}", web::patch().to(update_rows))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on stub socket")
    .run();
    actix_web::rt::spawn(server);

    let backend = Backend::new(Some(BackendConfig {
        url: format!("http://{addr}"),
        anon_key: "stub-anon-key".to_string(),
    }));
    (state, backend)
}

/// Put rows into a table as-is.
pub fn seed(state: &SharedState, table: &str, rows: Vec<Value>) {
    state
        .lock()
        .unwrap()
        .tables
        .entry(table.to_string())
        .or_default()
        .extend(rows);
}

/// Snapshot of a table's rows.
pub fn rows(state: &SharedState, table: &str) -> Vec<Value> {
    state
        .lock()
        .unwrap()
        .tables
        .get(table)
        .cloned()
        .unwrap_or_default()
}

/// How many write requests the stub has served.
pub fn write_count(state: &SharedState) -> u64 {
    state.lock().unwrap().writes
}

/// Fail the next request (read or write) with a backend-style error body.
pub fn fail_next(state: &SharedState, status: u16, code: &str, message: &str) {
    state.lock().unwrap().fail_next = Some((
        status,
        json!({ "code": code, "message": message, "details": null, "hint": null }),
    ));
}

/// Fail the next write request only; reads pass through untouched.
pub fn fail_next_write(state: &SharedState, status: u16, code: &str, message: &str) {
    state.lock().unwrap().fail_next_write = Some((
        status,
        json!({ "code": code, "message": message, "details": null, "hint": null }),
    ));
}

fn failure_response(scripted: Option<(u16, Value)>) -> Option<HttpResponse> {
    scripted.map(|(status, body)| {
        let status = StatusCode::from_u16(status).expect("scripted status code");
        HttpResponse::build(status).json(body)
    })
}

fn take_fail_any(state: &web::Data<SharedState>) -> Option<HttpResponse> {
    failure_response(state.lock().unwrap().fail_next.take())
}

fn take_fail_write(state: &web::Data<SharedState>) -> Option<HttpResponse> {
    let mut guard = state.lock().unwrap();
    let scripted = guard.fail_next.take().or_else(|| guard.fail_next_write.take());
    drop(guard);
    failure_response(scripted)
}

type QueryMap = web::Query<HashMap<String, String>>;

fn eq_filters(query: &HashMap<String, String>) -> Vec<(String, String)> {
    query
        .iter()
        .filter_map(|(key, value)| {
            value
                .strip_prefix("eq.")
                .map(|want| (key.clone(), want.to_string()))
        })
        .collect()
}

fn field_as_string(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn matches_filters(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(column, want)| field_as_string(row, column) == *want)
}

async fn select_rows(
    path: web::Path<String>,
    query: QueryMap,
    state: web::Data<SharedState>,
) -> HttpResponse {
    if let Some(resp) = take_fail_any(&state) {
        return resp;
    }
    let table = path.into_inner();
    let filters = eq_filters(&query);

    let guard = state.lock().unwrap();
    let mut matched: Vec<Value> = guard
        .tables
        .get(&table)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|row| matches_filters(row, &filters))
        .collect();
    drop(guard);

    if let Some(order) = query.get("order") {
        let (column, direction) = order.split_once('.').unwrap_or((order.as_str(), "asc"));
        let descending = direction == "desc";
        let column = column.to_string();
        matched.sort_by(|a, b| {
            let ka = field_as_string(a, &column);
            let kb = field_as_string(b, &column);
            if descending { kb.cmp(&ka) } else { ka.cmp(&kb) }
        });
    }
    if let Some(limit) = query.get("limit").and_then(|v| v.parse::<usize>().ok()) {
        matched.truncate(limit);
    }

    HttpResponse::Ok().json(matched)
}

async fn insert_row(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<SharedState>,
) -> HttpResponse {
    if let Some(resp) = take_fail_write(&state) {
        return resp;
    }
    let table = path.into_inner();

    // accept a single object or a one-element array
    let mut row = body.into_inner();
    if let Value::Array(mut items) = row {
        row = items.pop().unwrap_or(Value::Null);
    }
    let Value::Object(mut obj) = row else {
        return HttpResponse::BadRequest()
            .json(json!({ "code": "PGRST102", "message": "expected a row object" }));
    };

    let mut guard = state.lock().unwrap();
    guard.writes += 1;

    let unique_email = table == "waitlist" || table == "community_registrations";
    if unique_email {
        if let Some(email) = obj.get("email").and_then(Value::as_str) {
            let taken = guard
                .tables
                .get(&table)
                .map(|rows| {
                    rows.iter()
                        .any(|r| r.get("email").and_then(Value::as_str) == Some(email))
                })
                .unwrap_or(false);
            if taken {
                return HttpResponse::Conflict().json(json!({
                    "code": "23505",
                    "message": format!(
                        "duplicate key value violates unique constraint \"{table}_email_key\""
                    ),
                    "details": null,
                    "hint": null,
                }));
            }
        }
        obj.entry("status".to_string()).or_insert(json!("pending"));
    }

    guard.next_id += 1;
    let id = guard.next_id;
    obj.entry("id".to_string())
        .or_insert(json!(format!("row-{id}")));
    obj.entry("created_at".to_string())
        .or_insert(json!(format!("2026-08-08T00:00:00.{id:03}Z")));

    let stored = Value::Object(obj);
    guard.tables.entry(table).or_default().push(stored.clone());

    HttpResponse::Created().json(vec![stored])
}

async fn update_rows(
    path: web::Path<String>,
    query: QueryMap,
    body: web::Json<Value>,
    state: web::Data<SharedState>,
) -> HttpResponse {
    if let Some(resp) = take_fail_write(&state) {
        return resp;
    }
    let table = path.into_inner();
    let filters = eq_filters(&query);
    let patch = body.into_inner().as_object().cloned().unwrap_or_default();

    let mut guard = state.lock().unwrap();
    guard.writes += 1;

    let mut updated = Vec::new();
    if let Some(rows) = guard.tables.get_mut(&table) {
        for row in rows.iter_mut() {
            if matches_filters(row, &filters) {
                if let Some(obj) = row.as_object_mut() {
                    for (key, value) in &patch {
                        obj.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
    }

    HttpResponse::Ok().json(updated)
}

async fn rpc_call(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<SharedState>,
) -> HttpResponse {
    if let Some(resp) = take_fail_write(&state) {
        return resp;
    }
    let name = path.into_inner();
    if name != "handle_account_deletion_request" {
        return HttpResponse::NotFound().json(json!({
            "code": "42883",
            "message": format!("function public.{name} does not exist"),
        }));
    }

    let email = body
        .get("p_email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut guard = state.lock().unwrap();
    guard.writes += 1;
    let requests = guard
        .tables
        .entry("account_deletion_requests".to_string())
        .or_default();

    let pending = requests.iter().any(|r| {
        r.get("email").and_then(Value::as_str) == Some(email.as_str())
            && r.get("status").and_then(Value::as_str) == Some("pending")
    });
    if pending {
        return HttpResponse::Ok().json(json!({
            "is_duplicate": true,
            "message": "A deletion request for this account is already being processed.",
        }));
    }

    requests.push(json!({
        "username": body.get("p_username"),
        "email": email,
        "reason": body.get("p_reason"),
        "feedback": body.get("p_feedback"),
        "status": "pending",
    }));
    HttpResponse::Ok().json(json!({
        "is_duplicate": false,
        "message": "Your account deletion request has been received and is being processed.",
    }))
}
