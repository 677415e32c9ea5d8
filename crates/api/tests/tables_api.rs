//! HTTP-level integration tests for tables, seating and finishing.

mod common;

use axum::http::StatusCode;
use common::{
    assert_rejected, body_json, build_test_app, create_reservation, create_table, delete, get,
    post_json, put_json, reservation_payload, seat,
};
use serde_json::json;
use sqlx::PgPool;

async fn reservation_for(pool: &PgPool, people: i64) -> i64 {
    let mut payload = reservation_payload();
    payload["people"] = json!(people);
    create_reservation(pool, payload).await["reservation_id"]
        .as_i64()
        .unwrap()
}

async fn reservation_status(pool: &PgPool, id: i64) -> String {
    let response = get(build_test_app(pool.clone()), &format!("/api/v1/reservations/{id}")).await;
    body_json(response).await["data"]["status"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_tables_by_name(pool: PgPool) {
    create_table(&pool, "Bar #2", 1).await;
    let first = create_table(&pool, "#1", 6).await;
    assert!(first["reservation_id"].is_null());

    let response = get(build_test_app(pool), "/api/v1/tables").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["table_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["#1", "Bar #2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_table_validation(pool: PgPool) {
    let cases = [
        (json!({ "capacity": 2 }), "table_name is missing."),
        (json!({ "table_name": "A", "capacity": 2 }), "table_name must be at least 2 characters long."),
        (json!({ "table_name": "Patio" }), "Table capacity is missing."),
        (json!({ "table_name": "Patio", "capacity": 0 }), "Table capacity must be at least 1."),
        (json!({ "table_name": "Patio", "capacity": "four" }), "Table capacity must be a number."),
        (
            json!({ "table_name": "Patio", "capacity": 4, "shape": "round" }),
            "Invalid field(s): shape",
        ),
    ];

    for (data, message) in cases {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/tables",
            json!({ "data": data }),
        )
        .await;
        assert_rejected(response, message).await;
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_table_with_reservation_seats_it(pool: PgPool) {
    let reservation_id = reservation_for(&pool, 2).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/tables",
        json!({ "data": { "table_name": "Window", "capacity": 2, "reservation_id": reservation_id } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["reservation_id"], reservation_id);
    assert_eq!(reservation_status(&pool, reservation_id).await, "seated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_table_too_small_for_reservation_rolls_back(pool: PgPool) {
    let reservation_id = reservation_for(&pool, 5).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/tables",
        json!({ "data": { "table_name": "Nook", "capacity": 2, "reservation_id": reservation_id } }),
    )
    .await;
    assert_rejected(response, "Table capacity (2) is less than the party size (5).").await;

    let response = get(build_test_app(pool.clone()), "/api/v1/tables").await;
    assert_eq!(body_json(response).await["data"], json!([]));
    assert_eq!(reservation_status(&pool, reservation_id).await, "booked");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_table_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/tables/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Table 999 not found.");
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_marks_both_sides(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let reservation_id = reservation_for(&pool, 4).await;

    let response = seat(&pool, table_id, reservation_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["table_id"], table_id);
    assert_eq!(json["data"]["reservation_id"], reservation_id);
    assert_eq!(reservation_status(&pool, reservation_id).await, "seated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_rejects_party_larger_than_capacity(pool: PgPool) {
    let table_id = create_table(&pool, "Bar #1", 1).await["table_id"].as_i64().unwrap();
    let reservation_id = reservation_for(&pool, 3).await;

    let response = seat(&pool, table_id, reservation_id).await;
    assert_rejected(response, "Table capacity (1) is less than the party size (3).").await;
    assert_eq!(reservation_status(&pool, reservation_id).await, "booked");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_rejects_occupied_table(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let first = reservation_for(&pool, 2).await;
    let second = reservation_for(&pool, 2).await;
    assert_eq!(seat(&pool, table_id, first).await.status(), StatusCode::OK);

    let response = seat(&pool, table_id, second).await;
    assert_rejected(response, &format!("Table already occupied by reservation_id: {first}.")).await;
    assert_eq!(reservation_status(&pool, second).await, "booked");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_rejects_already_seated_reservation(pool: PgPool) {
    let one = create_table(&pool, "One", 4).await["table_id"].as_i64().unwrap();
    let two = create_table(&pool, "Two", 4).await["table_id"].as_i64().unwrap();
    let reservation_id = reservation_for(&pool, 2).await;
    assert_eq!(seat(&pool, one, reservation_id).await.status(), StatusCode::OK);

    let response = seat(&pool, two, reservation_id).await;
    assert_rejected(
        response,
        &format!("Reservation ID {reservation_id} has already been seated."),
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_request_shape_errors(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let uri = format!("/api/v1/tables/{table_id}/seat");

    let response = put_json(build_test_app(pool.clone()), &uri, json!({})).await;
    assert_rejected(response, "Data is missing.").await;

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "data": {} })).await;
    assert_rejected(response, "Missing reservation_id.").await;

    let response = seat(&pool, table_id, 555_555).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Reservation 555555 not found.");

    let reservation_id = reservation_for(&pool, 2).await;
    let response = seat(&pool, 777, reservation_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Finish
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_finish_frees_table_and_finishes_reservation(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let reservation_id = reservation_for(&pool, 2).await;
    assert_eq!(seat(&pool, table_id, reservation_id).await.status(), StatusCode::OK);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/tables/{table_id}/seat"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["reservation_id"].is_null());
    assert_eq!(reservation_status(&pool, reservation_id).await, "finished");

    // Finished reservations drop out of the daily list.
    let response = get(build_test_app(pool), "/api/v1/reservations?date=2025-06-02").await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_finish_free_table_is_rejected(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();

    let response = delete(build_test_app(pool), &format!("/api/v1/tables/{table_id}/seat")).await;
    assert_rejected(response, "Table is not occupied.").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_finish_missing_table_returns_404(pool: PgPool) {
    let response = delete(build_test_app(pool), "/api/v1/tables/4040/seat").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_table_can_be_reused_after_finish(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let first = reservation_for(&pool, 2).await;
    let second = reservation_for(&pool, 3).await;

    assert_eq!(seat(&pool, table_id, first).await.status(), StatusCode::OK);
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/tables/{table_id}/seat"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = seat(&pool, table_id, second).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["reservation_id"], second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_accepts_reservation_id_as_string(pool: PgPool) {
    let table_id = create_table(&pool, "Booth", 4).await["table_id"].as_i64().unwrap();
    let reservation_id = reservation_for(&pool, 2).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/tables/{table_id}/seat"),
        json!({ "data": { "reservation_id": reservation_id.to_string() } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["reservation_id"], reservation_id);
    assert_eq!(reservation_status(&pool, reservation_id).await, "seated");

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/tables/{table_id}/seat"),
        json!({ "data": { "reservation_id": "five" } }),
    )
    .await;
    assert_rejected(response, "reservation_id must be a number.").await;
}
