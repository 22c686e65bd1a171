//! Mock shop API for the controller tests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::Request,
    middleware::{self, Next},
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use client_core::{ApiClient, RequestContext};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<(String, String)>>>);

impl Calls {
    /// `METHOD uri` for every request seen so far.
    pub fn log(&self) -> Vec<String> {
        self.0
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(method, uri)| format!("{method} {uri}"))
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.0
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }
}

pub async fn spawn(app: Router) -> (ApiClient, Calls) {
    let calls = Calls::default();
    let recorder = calls.clone();
    let app = app.layer(middleware::from_fn(move |req: Request, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder
                .0
                .lock()
                .expect("calls lock")
                .push((req.method().to_string(), req.uri().to_string()));
            next.run(req).await
        }
    }));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = ApiClient::new(&format!("http://{addr}")).expect("client");
    (client, calls)
}

/// Unsigned token with the given subject and roles.
pub fn token_for(sub: &str, roles: &[&str]) -> RequestContext {
    let payload = json!({ "sub": sub, "roles": roles }).to_string();
    RequestContext::with_token(format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    ))
}

pub fn ctx() -> RequestContext {
    token_for("admin", &["ROLE_ADMIN"])
}

pub fn page_json(content: Vec<Value>, total_pages: u32) -> Value {
    json!({
        "content": content,
        "totalPages": total_pages,
        "totalElements": content.len(),
    })
}

pub fn task_json(id: &str, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "description": "",
        "status": "PENDING",
        "machine": {
            "id": "m-1",
            "model": "Furadeira X",
            "brand": "Bosch",
            "customer": { "id": "c-1", "name": "Ana" },
        },
        "pieces": [{ "id": 1, "name": "Escova", "price": 12.5 }],
    })
}

pub fn order_json(order_id: i64, tasks: Vec<Value>) -> Value {
    json!({
        "orderId": order_id,
        "description": format!("pedido {order_id}"),
        "status": "OPEN",
        "createdAt": "2024-05-01T12:00:00Z",
        "tasks": tasks,
    })
}
