//! In-process stand-in for the quote generator REST API.
//!
//! Serves `/api/{companies,quotes,purchase-orders}` from memory the way the
//! deployed routes behave: server-assigned ids, line items persisted as a JSON
//! string, the owning company embedded as `companies` on single reads and
//! `{"success": true}` on delete. [`Faults`] bends individual behaviours so
//! failure paths can be exercised.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use quotegen_core::config::TargetConfig;
use quotegen_core::{ApiClient, RunOptions};
use serde_json::{json, Map, Value};

const COLLECTIONS: [&str; 3] = ["companies", "quotes", "purchase-orders"];

#[derive(Clone, Debug, Default)]
pub struct Faults {
    /// Leave the `companies` relation off quote and purchase order reads.
    pub drop_company_relation: bool,
    /// Collection whose `POST` answers 500.
    pub fail_create: Option<&'static str>,
    /// Reverse stored line items before persisting them.
    pub reorder_items: bool,
    /// Keep serving records after they were deleted.
    pub keep_deleted: bool,
    /// Status stored on new purchase orders in place of the requested one.
    pub initial_status: Option<&'static str>,
    /// Echo `PUT` results without persisting them.
    pub discard_updates: bool,
}

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<&'static str, Vec<Value>>,
    deleted: Vec<(String, Value)>,
    next_id: u64,
    faults: Faults,
    deletes: Vec<String>,
}

type Shared = Arc<Mutex<Store>>;

pub struct FakeApi {
    pub base_url: String,
    store: Shared,
}

impl FakeApi {
    pub async fn spawn(faults: Faults) -> Self {
        let store: Shared = Arc::new(Mutex::new(Store { faults, ..Store::default() }));
        let router = Router::new()
            .route("/api/{collection}", get(list).post(create))
            .route("/api/{collection}/{id}", get(read).put(update).delete(remove))
            .with_state(store.clone());

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind fake api listener");
        let address = listener.local_addr().expect("fake api address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { base_url: format!("http://{address}"), store }
    }

    pub fn client(&self) -> ApiClient {
        client_for(&self.base_url)
    }

    /// Records of `collection` still held by the fake.
    pub fn stored(&self, collection: &str) -> usize {
        let store = self.store.lock().expect("store lock");
        store.records.get(collection).map_or(0, Vec::len)
    }

    pub fn total_stored(&self) -> usize {
        COLLECTIONS.iter().map(|collection| self.stored(collection)).sum()
    }

    /// Paths of every `DELETE` received, in arrival order.
    pub fn deletes(&self) -> Vec<String> {
        self.store.lock().expect("store lock").deletes.clone()
    }
}

pub fn client_for(base_url: &str) -> ApiClient {
    client_with_timeout(base_url, 5)
}

pub fn client_with_timeout(base_url: &str, timeout_secs: u64) -> ApiClient {
    ApiClient::new(&TargetConfig { base_url: base_url.to_string(), timeout_secs })
        .expect("client should build")
}

/// Accepts connections and never writes a byte back. Returns the base URL.
pub async fn spawn_silent_listener() -> String {
    let listener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind silent listener");
    let address = listener.local_addr().expect("silent listener address");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{address}")
}

pub fn options(verify_deletes: bool) -> RunOptions {
    RunOptions {
        verify_deletes,
        today: chrono::NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"),
    }
}

fn collection_key(collection: &str) -> Option<&'static str> {
    COLLECTIONS.iter().copied().find(|known| *known == collection)
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn not_found(collection: &str) -> Response {
    reply(StatusCode::NOT_FOUND, json!({ "error": format!("{collection} record not found") }))
}

async fn list(State(store): State<Shared>, Path(collection): Path<String>) -> Response {
    let Some(key) = collection_key(&collection) else {
        return not_found(&collection);
    };
    let store = store.lock().expect("store lock");
    let records = store.records.get(key).cloned().unwrap_or_default();
    reply(StatusCode::OK, Value::Array(records))
}

async fn create(
    State(store): State<Shared>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Some(key) = collection_key(&collection) else {
        return not_found(&collection);
    };
    let mut store = store.lock().expect("store lock");
    if store.faults.fail_create == Some(key) {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": format!("Failed to create {collection}") }),
        );
    }

    store.next_id += 1;
    let mut record = match body {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    record.insert("id".to_string(), json!(format!("{}_{}", 1_718_000_000_000u64 + store.next_id, key)));
    persist_items(&mut record, store.faults.reorder_items);
    if let (Some(status), "purchase-orders") = (store.faults.initial_status, key) {
        record.insert("status".to_string(), json!(status));
    }

    let record = Value::Object(record);
    store.records.entry(key).or_default().push(record.clone());
    reply(StatusCode::OK, record)
}

async fn read(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let Some(key) = collection_key(&collection) else {
        return not_found(&collection);
    };
    let store = store.lock().expect("store lock");
    let found = find(&store, key, &id).cloned().or_else(|| {
        store
            .faults
            .keep_deleted
            .then(|| {
                store
                    .deleted
                    .iter()
                    .find(|(path, _)| *path == format!("{key}/{id}"))
                    .map(|(_, record)| record.clone())
            })
            .flatten()
    });

    let Some(mut record) = found else {
        return not_found(&collection);
    };
    if key != "companies" && !store.faults.drop_company_relation {
        let company = record
            .get("companyId")
            .and_then(Value::as_str)
            .and_then(|company_id| find(&store, "companies", company_id))
            .map(|company| json!({ "id": company["id"].clone(), "name": company["name"].clone() }));
        if let (Some(company), Some(fields)) = (company, record.as_object_mut()) {
            fields.insert("companies".to_string(), company);
        }
    }
    reply(StatusCode::OK, record)
}

async fn update(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let Some(key) = collection_key(&collection) else {
        return not_found(&collection);
    };
    let mut store = store.lock().expect("store lock");
    let reorder = store.faults.reorder_items;
    let discard = store.faults.discard_updates;
    let Some(record) = store
        .records
        .get_mut(key)
        .and_then(|records| records.iter_mut().find(|record| record["id"] == id.as_str()))
    else {
        return not_found(&collection);
    };

    let mut merged = record.clone();
    if let (Some(fields), Value::Object(patch)) = (merged.as_object_mut(), body) {
        for (field, value) in patch {
            if field != "id" {
                fields.insert(field, value);
            }
        }
        persist_items(fields, reorder);
    }
    if !discard {
        *record = merged.clone();
    }
    reply(StatusCode::OK, merged)
}

async fn remove(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let Some(key) = collection_key(&collection) else {
        return not_found(&collection);
    };
    let mut store = store.lock().expect("store lock");
    store.deletes.push(format!("/api/{key}/{id}"));

    let Some(records) = store.records.get_mut(key) else {
        return not_found(&collection);
    };
    let Some(position) = records.iter().position(|record| record["id"] == id.as_str()) else {
        return not_found(&collection);
    };
    let removed = records.remove(position);
    store.deleted.push((format!("{key}/{id}"), removed));
    reply(StatusCode::OK, json!({ "success": true }))
}

fn find<'a>(store: &'a Store, key: &str, id: &str) -> Option<&'a Value> {
    store.records.get(key)?.iter().find(|record| record["id"] == id)
}

/// Line items are kept as a JSON-encoded string column.
fn persist_items(record: &mut Map<String, Value>, reorder: bool) {
    if let Some(Value::Array(items)) = record.get("items") {
        let mut items = items.clone();
        if reorder {
            items.reverse();
        }
        let encoded = serde_json::to_string(&items).unwrap_or_default();
        record.insert("items".to_string(), Value::String(encoded));
    }
}
