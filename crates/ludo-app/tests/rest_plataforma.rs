mod common;

use axum::http::{Method, StatusCode};
use common::{body_bytes, body_json, build_app, count, get, header, init_pool, link_game, send};
use serde_json::json;
use tracing_test::traced_test;

const PATH: &str = "/api/plataformas";

#[tokio::test]
#[traced_test]
async fn test_plataforma_lifecycle() {
    let pool = init_pool().await;
    let app = build_app(pool.clone());

    let response = send(&app, Method::POST, PATH, Some(json!({"nome": "Mega Drive"}))).await;
    assert_eq!(StatusCode::CREATED, response.status());
    assert_eq!(
        Some("A new plataforma is created with identifier 1"),
        header(&response, "x-ludoapp-alert")
    );
    assert_eq!(Some("/api/plataformas/1"), header(&response, "location"));
    let created = body_json(response).await;
    assert_eq!(json!({"id": 1, "nome": "Mega Drive"}), created);
    link_game(&pool, "game_plataforma", "plataforma_id", 1, 1).await;

    let response = send(&app, Method::POST, PATH, Some(json!({"id": 1, "nome": "SNES"}))).await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(Some("plataforma"), header(&response, "x-ludoapp-params"));
    assert_eq!(1, count(&app, PATH).await);

    let response = send(
        &app,
        Method::PUT,
        PATH,
        Some(json!({"id": 1, "nome": "Genesis", "games": []})),
    )
    .await;
    assert_eq!(StatusCode::OK, response.status());
    let updated = body_json(response).await;
    assert_eq!("Genesis", updated["nome"]);
    assert_eq!(json!([{"id": 1, "nome": "Chrono Trigger"}]), updated["games"]);

    let response = get(&app, &format!("{PATH}?eagerload=true")).await;
    let records = body_json(response).await;
    assert_eq!(
        json!([{"id": 1, "nome": "Genesis", "games": [{"id": 1, "nome": "Chrono Trigger"}]}]),
        records
    );

    let response = send(&app, Method::PUT, PATH, Some(json!({"nome": "Genesis"}))).await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = send(&app, Method::DELETE, &format!("{PATH}/1"), None).await;
    assert_eq!(StatusCode::NO_CONTENT, response.status());
    assert_eq!(
        Some("A plataforma is deleted with identifier 1"),
        header(&response, "x-ludoapp-alert")
    );
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(0, count(&app, PATH).await);

    let response = get(&app, &format!("{PATH}/1")).await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
#[traced_test]
async fn test_resources_are_independent() {
    let app = build_app(init_pool().await);

    let response = send(&app, Method::POST, "/api/generos", Some(json!({"nome": "RPG"}))).await;
    assert_eq!(StatusCode::CREATED, response.status());

    assert_eq!(1, count(&app, "/api/generos").await);
    assert_eq!(0, count(&app, PATH).await);

    let response = get(&app, PATH).await;
    assert_eq!(json!([]), body_json(response).await);
}
