use std::time::Duration;

use super::*;
use crate::controller::{test_support::{ctx, page_json, spawn}, Controller};
use axum::{
    extract::Query,
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;

fn customer(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "cpf": "12345678901",
        "phone": "11999990000",
        "email": format!("{id}@example.com"),
        "address": "Rua A",
    })
}

async fn listing(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let search = query.get("searchTerm").cloned().unwrap_or_default();
    let rows: Vec<Value> = [("c-1", "Ana"), ("c-2", "Bruno")]
        .into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&search.to_lowercase()))
        .map(|(id, name)| customer(id, name))
        .collect();
    Json(page_json(rows, 1))
}

fn shop() -> Router {
    Router::new()
        .route(
            "/api/v1/customers",
            get(listing).post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "validationErrors": { "email": "must be a well-formed email" } })),
                )
            }),
        )
        .route("/api/v1/customers/:id", delete(|| async { StatusCode::NO_CONTENT }))
}

fn valid_draft() -> CustomerForm {
    CustomerForm {
        id: None,
        name: "Carla".into(),
        cpf: "98765432100".into(),
        phone: "11988887777".into(),
        email: "nao-e-email".into(),
        address: "Rua B".into(),
    }
}

#[test]
fn validation_reports_first_broken_rule() {
    let mut form = valid_draft();
    form.name = " ".into();
    form.cpf = "1".into();
    assert_eq!(validate(&form), Err(NAME_REQUIRED));

    form.name = "Carla".into();
    assert_eq!(validate(&form), Err(CPF_LENGTH));

    form.cpf = "98765432100".into();
    form.phone = "1".repeat(21);
    assert_eq!(validate(&form), Err(PHONE_LENGTH));
}

#[tokio::test]
async fn bad_cpf_keeps_the_draft_and_skips_the_server() {
    let (api, calls) = spawn(shop()).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(5));

    screen.open_create();
    screen.editor.draft = CustomerForm {
        cpf: "123".into(),
        ..valid_draft()
    };
    assert!(!screen.submit().await);

    assert_eq!(screen.error(), Some(CPF_LENGTH));
    assert_eq!(screen.editor.modal, Modal::Create);
    assert_eq!(screen.editor.draft.name, "Carla");
    assert_eq!(screen.editor.draft.cpf, "123");
    assert_eq!(calls.count("POST"), 0);
}

#[tokio::test]
async fn server_field_error_lands_in_the_same_slot() {
    let (api, _calls) = spawn(shop()).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(5));

    screen.open_create();
    screen.editor.draft = valid_draft();
    assert!(!screen.submit().await);

    assert_eq!(screen.error(), Some("O email deve ser válido"));
    assert!(screen.editor.modal.is_open());
    assert_eq!(screen.editor.draft.email, "nao-e-email");
}

#[tokio::test]
async fn only_the_last_keystroke_queries() {
    let (api, calls) = spawn(shop()).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(10));

    let first = screen.type_search("a");
    let second = screen.type_search("bru");
    assert!(!screen.load_if_current(first).await);
    assert_eq!(calls.count("GET"), 0);

    assert!(screen.debouncer().settle(second).await);
    assert!(screen.load_if_current(second).await);
    assert_eq!(
        calls.log(),
        vec!["GET /api/v1/customers?searchTerm=bru&page=0&size=5".to_string()]
    );
    assert_eq!(screen.state.content.len(), 1);
    assert_eq!(screen.state.content[0].name, "Bruno");
}

#[tokio::test]
async fn keystroke_during_pending_wait_supersedes_it() {
    let (api, calls) = spawn(shop()).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(40));

    let first = screen.type_search("a");
    let waiter = screen.debouncer();
    let pending = tokio::spawn(async move { waiter.settle(first).await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = screen.type_search("bru");
    let latest = screen.debouncer();
    let follow_up = tokio::spawn(async move { latest.settle(second).await });

    assert!(!pending.await.expect("first wait"));
    assert!(!screen.load_if_current(first).await);
    assert!(follow_up.await.expect("second wait"));
    assert!(screen.load_if_current(second).await);

    assert_eq!(calls.count("GET"), 1);
    assert_eq!(screen.state.content[0].name, "Bruno");
}

#[tokio::test]
async fn delete_closes_modal_and_reloads() {
    let (api, calls) = spawn(shop()).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(5));

    screen.open_delete(CustomerId("c-1".into()));
    assert!(screen.confirm_delete().await);

    assert!(!screen.editor.modal.is_open());
    assert_eq!(
        calls.log(),
        vec![
            "DELETE /api/v1/customers/c-1".to_string(),
            "GET /api/v1/customers?searchTerm=&page=0&size=5".to_string(),
        ]
    );
}

#[tokio::test]
async fn expired_session_redirects_without_inline_error() {
    let app = Router::new().route(
        "/api/v1/customers",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let (api, _calls) = spawn(app).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(5));

    screen.load().await;
    assert_eq!(screen.redirect(), Some(Route::Login));
    assert_eq!(screen.error(), None);
}

#[tokio::test]
async fn edit_submits_a_put_with_the_customer_id() {
    let app = Router::new()
        .route(
            "/api/v1/customers",
            get(listing).put(|Json(body): Json<Value>| async move {
                if body["id"] == "c-2" && body["name"] == "Bruno Lima" {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
    let (api, calls) = spawn(app).await;
    let mut screen = CustomerController::new(api, ctx(), Duration::from_millis(5));

    let existing: Customer = serde_json::from_value(customer("c-2", "Bruno")).expect("customer");
    screen.open_edit(&existing);
    assert_eq!(screen.editor.modal, Modal::Edit(CustomerId("c-2".into())));
    screen.editor.draft.name = "Bruno Lima".into();
    assert!(screen.submit().await);

    assert!(!screen.editor.modal.is_open());
    assert_eq!(
        calls.log(),
        vec![
            "PUT /api/v1/customers".to_string(),
            "GET /api/v1/customers?searchTerm=&page=0&size=5".to_string(),
        ]
    );
}
