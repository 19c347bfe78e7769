// hub-console/tests/common/mod.rs
// In-process fake backend shared by the view tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use hub_client::{ApiClient, OneshotHttpClient, SessionHandle};
use hub_console::Alerts;
use hub_console::views::ViewContext;
use serde_json::{Value, json};

/// Records every backend call in order
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub fn discount(id: i64, name: &str, products: &[i64], dealers: &[i64]) -> Value {
    json!({
        "id": id,
        "name": name,
        "discountType": "PERCENTAGE",
        "discountValue": 10,
        "startDate": "2026-05-01T00:00:00",
        "endDate": "2026-06-01T00:00:00",
        "isActive": true,
        "status": "ACTIVE",
        "applicableProducts": products
            .iter()
            .map(|id| json!({ "id": id, "name": format!("Product {id}") }))
            .collect::<Vec<_>>(),
        "applicableDealers": dealers
            .iter()
            .map(|id| json!({ "id": id, "name": format!("Dealer {id}") }))
            .collect::<Vec<_>>()
    })
}

/// General discount: the backend omits both relations
pub fn general_discount(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "discountType": "FIXED_AMOUNT",
        "discountValue": 5,
        "startDate": "2026-07-01T00:00:00",
        "endDate": "2026-08-01T00:00:00",
        "isActive": true,
        "status": "SCHEDULED"
    })
}

fn page_of(content: Vec<Value>, q: &HashMap<String, String>) -> Value {
    json!({
        "success": true,
        "data": {
            "content": content,
            "totalElements": 42,
            "number": q.get("page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(0),
            "size": q.get("size").and_then(|s| s.parse::<u32>().ok()).unwrap_or(20)
        }
    })
}

fn discount_routes() -> Router<Recorder> {
    Router::new()
        .route(
            "/discounts",
            get(
                |State(rec): State<Recorder>, Query(q): Query<HashMap<String, String>>| async move {
                    rec.push(format!("list page={} size={}", q["page"], q["size"]));
                    Json(page_of(vec![discount(1, "Spring", &[5], &[9])], &q))
                },
            )
            .post(|State(rec): State<Recorder>, Json(body): Json<Value>| async move {
                rec.push(format!("create {}", body["name"].as_str().unwrap_or_default()));
                let mut created = discount(50, body["name"].as_str().unwrap_or_default(), &[], &[]);
                created["discountValue"] = body["discountValue"].clone();
                (StatusCode::CREATED, Json(created))
            }),
        )
        .route(
            "/discounts/search",
            get(
                |State(rec): State<Recorder>, Query(q): Query<HashMap<String, String>>| async move {
                    rec.push(format!("search q={} page={}", q["q"], q["page"]));
                    if q["q"] == "slow" {
                        tokio::time::sleep(Duration::from_secs(10)).await;
                    }
                    Json(page_of(vec![discount(2, "Spring bulk", &[5], &[])], &q))
                },
            ),
        )
        .route(
            "/discounts/upcoming",
            get(|State(rec): State<Recorder>| async move {
                rec.push("upcoming");
                Json(json!({
                    "success": true,
                    "data": [
                        discount(1, "Spring (rescheduled)", &[5], &[9]),
                        discount(3, "Summer", &[5], &[9]),
                        discount(4, "Other dealer", &[5], &[10]),
                        discount(6, "Other product", &[6], &[9]),
                        general_discount(7, "Everything")
                    ]
                }))
            }),
        )
        .route(
            "/discounts/expired",
            get(|State(rec): State<Recorder>| async move {
                rec.push("expired");
                Json(json!([discount(8, "Winter", &[5], &[9])]))
            }),
        )
        .route(
            "/discounts/dealer/{id}",
            get(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("by-dealer {id}"));
                Json(json!([
                    discount(1, "Spring", &[5], &[id]),
                    discount(2, "Bulk", &[6], &[id])
                ]))
            }),
        )
        .route(
            "/discounts/product/{id}",
            get(
                |State(rec): State<Recorder>,
                 Path(id): Path<i64>,
                 Query(q): Query<HashMap<String, String>>| async move {
                    rec.push(format!("by-product {} dealer={:?}", id, q.get("dealerId")));
                    Json(json!([discount(1, "Spring", &[id], &[9])]))
                },
            ),
        )
        .route(
            "/discounts/calculate",
            post(|State(rec): State<Recorder>, Json(body): Json<Value>| async move {
                rec.push(format!("calculate qty={}", body["quantity"]));
                Json(json!({
                    "success": true,
                    "data": {
                        "originalAmount": 300,
                        "discountAmount": 30,
                        "finalAmount": 270,
                        "appliedDiscounts": [
                            { "discountId": 1, "discountName": "Spring", "discountAmount": 30 }
                        ]
                    }
                }))
            }),
        )
        .route(
            "/discounts/{id}",
            get(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("get {id}"));
                Json(discount(id, "Fetched", &[5], &[9]))
            })
            .put(
                |State(rec): State<Recorder>, Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    rec.push(format!("update {id}"));
                    let mut updated =
                        discount(id, body["name"].as_str().unwrap_or_default(), &[], &[]);
                    updated["discountValue"] = body["discountValue"].clone();
                    Json(updated)
                },
            )
            .delete(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("delete {id}"));
                if id == 404 {
                    return (StatusCode::NOT_FOUND, Json(json!({ "title": "Not Found" })));
                }
                (StatusCode::OK, Json(json!({ "success": true, "message": "Deleted" })))
            }),
        )
        .route(
            "/discounts/{id}/restore",
            post(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("restore {id}"));
                Json(json!({ "success": true, "message": "Restored" }))
            }),
        )
}

fn catalog_routes() -> Router<Recorder> {
    Router::new()
        .route(
            "/dealers",
            get(|State(rec): State<Recorder>| async move {
                rec.push("dealers");
                Json(json!([{ "id": 9, "name": "North" }]))
            }),
        )
        .route(
            "/dealers/{id}",
            get(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("dealer {id}"));
                Json(json!({
                    "success": true,
                    "data": {
                        "id": id,
                        "name": "Anadolu Dağıtım",
                        "email": "info@anadolu.test",
                        "users": [
                            { "id": 10, "username": "ayse" },
                            { "id": 11, "username": "mehmet" }
                        ]
                    }
                }))
            }),
        )
        .route(
            "/dealers/{dealer}/users/{user}",
            delete(
                |State(rec): State<Recorder>, Path((dealer, user)): Path<(i64, i64)>| async move {
                    rec.push(format!("delete user {dealer}/{user}"));
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .route(
            "/products",
            get(|State(rec): State<Recorder>| async move {
                rec.push("products");
                Json(json!([{ "id": 5, "name": "Bolt" }, { "id": 6, "name": "Nut" }]))
            }),
        )
        .route(
            "/products/{id}",
            get(|State(rec): State<Recorder>, Path(id): Path<i64>| async move {
                rec.push(format!("product {id}"));
                if id == 1 {
                    // Slow enough to be cancelled
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
                Json(json!({
                    "id": id,
                    "name": format!("Product {id}"),
                    "price": 12.5,
                    "variants": [{ "id": 100 + id, "name": "Default", "sku": "SKU" }]
                }))
            }),
        )
        .route(
            "/categories",
            get(|State(rec): State<Recorder>| async move {
                rec.push("categories");
                Json(json!([{ "id": 2, "name": "Fasteners" }]))
            }),
        )
        .route(
            "/roles",
            get(|State(rec): State<Recorder>| async move {
                rec.push("roles");
                let roles: Vec<Value> = (1..=25)
                    .map(|id| json!({ "id": id, "name": format!("role-{id}"), "permissions": ["discounts:read"] }))
                    .collect();
                Json(json!({ "success": true, "data": roles }))
            }),
        )
}

/// Full fake backend
pub fn backend(recorder: Recorder) -> Router {
    discount_routes()
        .merge(catalog_routes())
        .with_state(recorder)
}

/// Fake backend whose `/dealers` endpoint fails
pub fn backend_without_dealers(recorder: Recorder) -> Router {
    let dealers_down = Router::new().route(
        "/dealers",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Dealer service unavailable" })),
            )
        }),
    );
    Router::new()
        .route(
            "/products",
            get(|State(rec): State<Recorder>| async move {
                rec.push("products");
                Json(json!([{ "id": 5, "name": "Bolt" }]))
            }),
        )
        .route(
            "/categories",
            get(|State(rec): State<Recorder>| async move {
                rec.push("categories");
                Json(json!([{ "id": 2, "name": "Fasteners" }]))
            }),
        )
        .with_state(recorder)
        .merge(dealers_down)
}

pub fn context(router: Router) -> ViewContext<OneshotHttpClient> {
    let http = OneshotHttpClient::new(router, SessionHandle::default());
    ViewContext::new(ApiClient::new(http), Alerts::new())
}

/// Context over the full fake backend
pub fn setup() -> (ViewContext<OneshotHttpClient>, Recorder) {
    let recorder = Recorder::default();
    (context(backend(recorder.clone())), recorder)
}
