use std::sync::{Arc, Mutex};

use crate::{
    messages::GENERIC_ERROR,
    test_support::{ctx, page_json, spawn},
    ActionError,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{CustomerId, MachineCategory, MachineId, PieceId, TaskId, TaskStatus, UserId},
    protocol::{CustomerForm, MachineForm, PieceForm, TaskForm, UserForm},
};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn capture(State(seen): State<Captured>, Json(body): Json<Value>) -> StatusCode {
    seen.lock().expect("capture lock").push(body);
    StatusCode::CREATED
}

fn customer_row(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Ana Souza",
        "cpf": "12345678901",
        "phone": "11999990000",
        "email": "ana@example.com",
        "address": "Rua A, 10",
    })
}

fn rejecting(path: &'static str, status: StatusCode, body: Value) -> Router {
    Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

#[tokio::test]
async fn customer_listing_sends_search_and_pagination() {
    let app = Router::new().route(
        "/api/v1/customers",
        get(|| async { Json(page_json(vec![customer_row("c-1")], 3)) }),
    );
    let (client, calls) = spawn(app).await;

    let page = client
        .load_customers(&ctx(), 1, 5, " ana ")
        .await
        .expect("customers");
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(
        calls.uris("GET"),
        vec!["/api/v1/customers?searchTerm=ana&page=1&size=5".to_string()]
    );
}

#[tokio::test]
async fn listing_never_exceeds_requested_size() {
    let rows = (0..7).map(|i| customer_row(&format!("c-{i}"))).collect();
    let app = Router::new().route(
        "/api/v1/customers",
        get(move || {
            let body = page_json(rows, 2);
            async move { Json(body) }
        }),
    );
    let (client, _calls) = spawn(app).await;

    let page = client.load_customers(&ctx(), 0, 5, "").await.expect("customers");
    assert_eq!(page.content.len(), 5);
}

#[tokio::test]
async fn listing_fails_open_except_for_unauthorized() {
    let app = Router::new()
        .route("/api/v1/pieces", get(|| async { StatusCode::BAD_GATEWAY }))
        .route("/api/v1/tasks", get(|| async { StatusCode::UNAUTHORIZED }));
    let (client, _calls) = spawn(app).await;

    let pieces = client.load_pieces(&ctx(), 0, 10).await.expect("fails open");
    assert!(pieces.is_empty());

    let tasks = client.load_tasks(&ctx(), 0, 10).await;
    assert_eq!(tasks, Err(ActionError::Unauthorized));
}

#[tokio::test]
async fn customer_cpf_violation_is_translated() {
    let app = rejecting(
        "/api/v1/customers",
        StatusCode::BAD_REQUEST,
        json!({ "message": "Validation failed", "validationErrors": { "cpf": "size must be 11" } }),
    );
    let (client, _calls) = spawn(app).await;

    let form = CustomerForm {
        name: "Ana".into(),
        cpf: "123".into(),
        ..Default::default()
    };
    let err = client.create_customer(&ctx(), &form).await.expect_err("rejected");
    assert_eq!(err.message(), Some("O cpf deve ter exatamente 11 dígitos"));
}

#[tokio::test]
async fn user_conflicts_surface_catalog_messages() {
    let cases = [
        (
            "A user with this username already exists.",
            "Já existe um usuário com esse username",
        ),
        (
            "A user with this email already exists.",
            "Já existe um usuário com esse email",
        ),
        ("Disk quota exceeded", GENERIC_ERROR),
    ];

    for (server, expected) in cases {
        let app = rejecting(
            "/api/v1/users",
            StatusCode::CONFLICT,
            json!({ "message": server }),
        );
        let (client, _calls) = spawn(app).await;
        let form = UserForm {
            username: "joaozinho".into(),
            email: "joao@example.com".into(),
        };
        let err = client.create_user(&ctx(), &form).await.expect_err("conflict");
        assert_eq!(err, ActionError::Rejected(expected.to_string()));
    }
}

#[tokio::test]
async fn create_customer_trims_fields_and_expects_created() {
    let seen = Captured::default();
    let app = Router::new()
        .route("/api/v1/customers", post(capture))
        .with_state(seen.clone());
    let (client, _calls) = spawn(app).await;

    let form = CustomerForm {
        id: Some(CustomerId("ignored".into())),
        name: "  Ana  ".into(),
        cpf: " 12345678901 ".into(),
        phone: "11999990000".into(),
        email: "ana@example.com".into(),
        address: "Rua A".into(),
    };
    client.create_customer(&ctx(), &form).await.expect("created");

    let body = seen.lock().expect("lock")[0].clone();
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["cpf"], "12345678901");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn new_tasks_are_always_pending() {
    let seen = Captured::default();
    let app = Router::new()
        .route("/api/v1/tasks", post(capture))
        .with_state(seen.clone());
    let (client, _calls) = spawn(app).await;

    let form = TaskForm {
        id: None,
        name: "Troca de escova".into(),
        price: 80.0,
        description: "Troca completa".into(),
        status: TaskStatus::Completed,
        machine_id: MachineId("m-1".into()),
        pieces_id: vec![PieceId(1), PieceId(2)],
    };
    client.create_task(&ctx(), &form).await.expect("created");

    let body = seen.lock().expect("lock")[0].clone();
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["machineId"], "m-1");
    assert_eq!(body["piecesId"], json!([1, 2]));
}

#[tokio::test]
async fn deleting_twice_does_not_fail_the_caller() {
    let gone = Arc::new(Mutex::new(false));
    let app = Router::new()
        .route(
            "/api/v1/customers/:id",
            delete(|State(gone): State<Arc<Mutex<bool>>>| async move {
                let mut gone = gone.lock().expect("lock");
                if *gone {
                    StatusCode::NOT_FOUND
                } else {
                    *gone = true;
                    StatusCode::NO_CONTENT
                }
            }),
        )
        .with_state(gone);
    let (client, calls) = spawn(app).await;
    let id = CustomerId("c-1".into());

    client.delete_customer(&ctx(), &id).await.expect("first delete");
    client.delete_customer(&ctx(), &id).await.expect("second delete");
    assert_eq!(calls.uris("DELETE").len(), 2);
}

#[tokio::test]
async fn delete_with_expired_session_asks_for_login() {
    let app = Router::new().route(
        "/api/v1/users/:id",
        delete(|| async { StatusCode::UNAUTHORIZED }),
    );
    let (client, _calls) = spawn(app).await;

    let result = client.delete_user(&ctx(), &UserId("u-1".into())).await;
    assert_eq!(result, Err(ActionError::Unauthorized));
}

#[tokio::test]
async fn reset_and_password_change_use_patch() {
    let app = Router::new()
        .route("/api/v1/users/:id", patch(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/api/v1/users",
            patch(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Old password is incorrect." })),
                )
            }),
        );
    let (client, calls) = spawn(app).await;

    client
        .reset_user(&ctx(), &UserId("u-9".into()))
        .await
        .expect("reset");
    let err = client
        .change_password(&ctx(), "wrong", "novasenha", "novasenha")
        .await
        .expect_err("bad old password");
    assert_eq!(err.message(), Some("Senha antiga está incorreta"));
    assert_eq!(
        calls.uris("PATCH"),
        vec!["/api/v1/users/u-9".to_string(), "/api/v1/users".to_string()]
    );
}

#[tokio::test]
async fn password_confirmation_mismatch_never_reaches_server() {
    let (client, calls) = spawn(Router::new()).await;

    let err = client
        .change_password(&ctx(), "antiga", "novasenha", "outrasenha")
        .await
        .expect_err("mismatch");
    assert_eq!(err.message(), Some("A senha está diferente"));
    assert!(calls.snapshot().is_empty());
}

#[tokio::test]
async fn select_options_are_labelled_like_the_forms() {
    let app = Router::new()
        .route(
            "/api/v1/machines",
            get(|| async {
                Json(page_json(
                    vec![
                        json!({ "id": "m-1", "model": "GSB 13", "brand": "Bosch",
                                "category": "POWER_TOOL", "description": "furadeira",
                                "customer": { "id": "c-1", "name": "Ana" } }),
                        json!({ "id": "m-2", "model": "SC 10", "brand": "Taiff",
                                "category": "BEAUTY_SALON", "description": "secador" }),
                    ],
                    1,
                ))
            }),
        )
        .route(
            "/api/v1/pieces",
            get(|| async {
                Json(page_json(
                    vec![json!({ "id": 3, "name": "Escova", "price": 12.5,
                                 "brand": "Bosch", "description": "carvão" })],
                    1,
                ))
            }),
        );
    let (client, calls) = spawn(app).await;

    let machines = client.machine_options(&ctx()).await.expect("machines");
    let labels: Vec<&str> = machines.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["GSB 13 - Bosch (Ana)", "SC 10 - Taiff (Sem Dono)"]);

    let pieces = client.piece_options(&ctx()).await.expect("pieces");
    assert_eq!(pieces[0].label, "Escova (R$ 12.5)");
    assert_eq!(pieces[0].price, Some(12.5));

    assert!(calls
        .uris("GET")
        .contains(&"/api/v1/machines?page=0&size=100".to_string()));
}

#[tokio::test]
async fn login_returns_context_or_translated_error() {
    let app = Router::new().route(
        "/api/v1/auth/login",
        post(|Json(body): Json<Value>| async move {
            if body["password"] == "segredo" {
                (StatusCode::OK, Json(json!({ "token": "jwt-token" })))
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid credentials" })),
                )
            }
        }),
    );
    let (client, calls) = spawn(app).await;

    let session = client.login(" admin ", "segredo").await.expect("login");
    assert_eq!(session.token(), Some("jwt-token"));

    let err = client.login("admin", "errada").await.expect_err("bad login");
    assert_eq!(err.message(), Some("Usuário ou senha invalido"));

    assert!(calls.snapshot().iter().all(|c| c.authorization.is_none()));
}

/// PUT handler answering `status` and keeping every body it receives.
fn accepting_put(path: &'static str, status: StatusCode) -> (Router, Captured) {
    let seen = Captured::default();
    let app = Router::new()
        .route(
            path,
            put(move |State(seen): State<Captured>, Json(body): Json<Value>| async move {
                seen.lock().expect("capture lock").push(body);
                status
            }),
        )
        .with_state(seen.clone());
    (app, seen)
}

fn machine_form() -> MachineForm {
    MachineForm {
        id: None,
        model: "GSB 13".into(),
        brand: "Bosch".into(),
        category: MachineCategory::PowerTool,
        description: "Furadeira de impacto".into(),
        customer_id: CustomerId("c-1".into()),
    }
}

fn task_form() -> TaskForm {
    TaskForm {
        id: None,
        name: "Limpeza".into(),
        price: 40.0,
        description: String::new(),
        status: TaskStatus::InProgress,
        machine_id: MachineId("m-1".into()),
        pieces_id: vec![PieceId(1)],
    }
}

#[tokio::test]
async fn customer_update_carries_id_in_body() {
    let (app, seen) = accepting_put("/api/v1/customers", StatusCode::OK);
    let (client, calls) = spawn(app).await;

    let form = CustomerForm {
        id: None,
        name: " Ana Souza ".into(),
        cpf: "12345678901".into(),
        phone: "11999990000".into(),
        email: "ana@example.com".into(),
        address: "Rua A".into(),
    };
    client
        .update_customer(&ctx(), &CustomerId("c-9".into()), &form)
        .await
        .expect("updated");

    assert_eq!(calls.uris("PUT"), vec!["/api/v1/customers".to_string()]);
    let body = seen.lock().expect("lock")[0].clone();
    assert_eq!(body["id"], "c-9");
    assert_eq!(body["name"], "Ana Souza");
}

#[tokio::test]
async fn user_update_accepts_no_content() {
    let (app, seen) = accepting_put("/api/v1/users", StatusCode::NO_CONTENT);
    let (client, calls) = spawn(app).await;

    let form = UserForm {
        username: " joaosilva ".into(),
        email: "joao@example.com".into(),
    };
    client
        .update_user(&ctx(), &UserId("u-3".into()), &form)
        .await
        .expect("updated");

    assert_eq!(calls.uris("PUT"), vec!["/api/v1/users".to_string()]);
    let body = seen.lock().expect("lock")[0].clone();
    assert_eq!(body["id"], "u-3");
    assert_eq!(body["username"], "joaosilva");
}

#[tokio::test]
async fn customer_update_rejects_created_status() {
    let (app, _seen) = accepting_put("/api/v1/customers", StatusCode::CREATED);
    let (client, _calls) = spawn(app).await;

    let form = CustomerForm {
        id: None,
        name: "Ana".into(),
        cpf: "12345678901".into(),
        phone: "1".into(),
        email: String::new(),
        address: String::new(),
    };
    let err = client
        .update_customer(&ctx(), &CustomerId("c-1".into()), &form)
        .await
        .expect_err("unexpected status");
    assert_eq!(err, ActionError::Rejected(GENERIC_ERROR.to_string()));
}

#[tokio::test]
async fn catalog_updates_put_to_the_entity_path() {
    let seen = Captured::default();
    let record = |status: StatusCode| {
        move |State(seen): State<Captured>, Json(body): Json<Value>| async move {
            seen.lock().expect("capture lock").push(body);
            status
        }
    };
    let app = Router::new()
        .route("/api/v1/machines/:id", put(record(StatusCode::OK)))
        .route("/api/v1/pieces/:id", put(record(StatusCode::NO_CONTENT)))
        .route("/api/v1/tasks/:id", put(record(StatusCode::OK)))
        .with_state(seen.clone());
    let (client, calls) = spawn(app).await;

    client
        .update_machine(&ctx(), &MachineId("m-4".into()), &machine_form())
        .await
        .expect("machine");
    let piece = PieceForm {
        name: "Escova".into(),
        price: 12.5,
        ..PieceForm::default()
    };
    client
        .update_piece(&ctx(), PieceId(4), &piece)
        .await
        .expect("piece");
    client
        .update_task(&ctx(), &TaskId::from("t-4"), &task_form())
        .await
        .expect("task");

    assert_eq!(
        calls.uris("PUT"),
        vec![
            "/api/v1/machines/m-4".to_string(),
            "/api/v1/pieces/4".to_string(),
            "/api/v1/tasks/t-4".to_string(),
        ]
    );
    let bodies = seen.lock().expect("lock").clone();
    assert_eq!(bodies[0]["id"], "m-4");
    assert_eq!(bodies[0]["customerID"], "c-1");
    assert_eq!(bodies[1]["id"], 4);
    assert_eq!(bodies[2]["id"], "t-4");
    assert_eq!(bodies[2]["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn catalog_updates_relay_server_message_or_fall_back() {
    let app = Router::new()
        .route(
            "/api/v1/machines/:id",
            put(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Cliente inexistente" })),
                )
            }),
        )
        .route(
            "/api/v1/tasks/:id",
            put(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        );
    let (client, _calls) = spawn(app).await;

    let machine = client
        .update_machine(&ctx(), &MachineId("m-1".into()), &machine_form())
        .await
        .expect_err("machine rejected");
    assert_eq!(machine, ActionError::Rejected("Cliente inexistente".into()));

    let task = client
        .update_task(&ctx(), &TaskId::from("t-1"), &task_form())
        .await
        .expect_err("task rejected");
    assert_eq!(task, ActionError::Rejected("Erro ao atualizar serviço.".into()));
}
