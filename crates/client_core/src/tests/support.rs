//! In-process mock of the shop API used by the client_core tests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{ApiClient, RequestContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<Call>>>);

impl Calls {
    pub fn snapshot(&self) -> Vec<Call> {
        self.0.lock().expect("calls lock").clone()
    }

    pub fn uris(&self, method: &str) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .filter(|c| c.method == method)
            .map(|c| c.uri)
            .collect()
    }

    fn push(&self, call: Call) {
        self.0.lock().expect("calls lock").push(call);
    }
}

/// Serves `app` on an ephemeral port, recording every request.
pub async fn spawn(app: Router) -> (ApiClient, Calls) {
    let calls = Calls::default();
    let recorder = calls.clone();
    let app = app.layer(middleware::from_fn(move |req: Request, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder.push(Call {
                method: req.method().to_string(),
                uri: req.uri().to_string(),
                authorization: req
                    .headers()
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
            });
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

pub fn ctx() -> RequestContext {
    RequestContext::with_token("test-token")
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
        "description": format!("{name} description"),
        "status": "PENDING",
        "machine": {
            "id": format!("m-{id}"),
            "model": "Furadeira X",
            "brand": "Bosch",
            "customer": { "id": "c-1", "name": "Ana" },
        },
        "pieces": [
            { "id": 1, "name": "Escova", "price": 12.5 },
        ],
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

pub fn task_refs(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| json!({ "id": id })).collect()
}
