#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use futures::TryStreamExt as _;
use ludo_app::{
    rest_api::{genero, plataforma},
    state::{AppConfig, AppState},
};
use sqlx::Executor as _;
use tower::ServiceExt as _;

pub const APP_NAME: &str = "ludoApp";

const TEST_DATA: &str = r#"
INSERT INTO game (id, nome) VALUES (1, 'Chrono Trigger');
INSERT INTO game (id, nome) VALUES (2, 'Portal');
"#;

pub async fn init_pool() -> ludo_dal::Pool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ludo_dal::migrate(&pool).await.unwrap();
    pool.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();
    pool
}

pub fn build_app(pool: ludo_dal::Pool) -> Router {
    let config = AppConfig {
        app_name: APP_NAME.to_string(),
    };
    let state = AppState::new(config, pool).unwrap();
    Router::new()
        .nest(genero::PATH, genero::router())
        .nest(plataforma::PATH, plataforma::router())
        .with_state(state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

pub async fn count(app: &Router, path: &str) -> u64 {
    let response = get(app, &format!("{path}/count")).await;
    body_json(response).await.as_u64().unwrap()
}

pub async fn link_game(pool: &ludo_dal::Pool, link_table: &str, column: &str, game_id: i64, id: i64) {
    let sql = format!("INSERT INTO {link_table} (game_id, {column}) VALUES (?, ?)");
    sqlx::query(&sql)
        .bind(game_id)
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}
