//! Mock API server speaking the `{data, code, msg}` envelope protocol.
//!
//! Every JSON route wraps its payload the same way the production backend
//! does: `data` carries the value, `code` is 0 on success (1000 for an
//! expired session), `msg` holds detail. Two routes deliberately break the
//! contract (`/garbled`, `/boom`) so clients can exercise their failure
//! classification.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub age: u32,
}

#[derive(Deserialize)]
pub struct Page {
    #[serde(rename = "pageIndex", default)]
    pub page_index: usize,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    20
}

/// Users in insertion order, so paged listings are deterministic.
pub type Db = Arc<RwLock<Vec<User>>>;

/// Wrap a payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "data": data, "code": 0, "msg": "" }))
}

/// Wrap an application-level failure in the envelope.
pub fn fail(code: i64, msg: &str) -> Json<Value> {
    Json(json!({ "data": null, "code": code, "msg": msg }))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/profile", get(profile))
        .route("/users", get(list_users).post(create_user))
        .route("/rejected", get(rejected))
        .route("/garbled", get(garbled))
        .route("/boom", get(boom))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn profile(headers: HeaderMap) -> Json<Value> {
    let authenticated = headers
        .get("Access-Token")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());
    if !authenticated {
        return fail(1000, "please log in again");
    }
    ok(User { id: Uuid::nil(), name: "Alice".to_string(), age: 7 })
}

async fn list_users(State(db): State<Db>, Query(page): Query<Page>) -> Json<Value> {
    let users = db.read().await;
    ok(page_slice(&users, page.page_index, page.page_size))
}

async fn create_user(State(db): State<Db>, Form(input): Form<CreateUser>) -> Json<Value> {
    let user = User { id: Uuid::new_v4(), name: input.name, age: input.age };
    db.write().await.push(user.clone());
    ok(user)
}

async fn rejected() -> Json<Value> {
    fail(4001, "operation not allowed")
}

async fn garbled() -> &'static str {
    "this is not json"
}

async fn boom() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Slice one page out of the user list, preserving insertion order.
fn page_slice(users: &[User], page_index: usize, page_size: usize) -> Vec<User> {
    users
        .iter()
        .skip(page_index.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}
