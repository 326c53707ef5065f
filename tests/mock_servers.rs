//! In-process HTTP doubles for the price provider and the swap aggregator.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use swap_quote_scanner_rs::{PriceError, PriceLookup, PriceService, PriceServiceConfig};
use tokio::task::JoinHandle;

pub const PRICE_PATH: &str = "/api/v3/simple/price";

async fn spawn_server(app: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test port");
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(10)).await;

    (base_url, handle)
}

/// Address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}:{}{}", addr.ip(), addr.port(), PRICE_PATH)
}

// ---------------------------------------------------------------------------
// Price provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum PriceReply {
    Price(f64),
    Status(u16),
    Body(&'static str),
    Delayed(Duration, f64),
}

#[derive(Debug, Clone)]
pub struct PriceCall {
    pub ids: String,
    pub vs_currencies: String,
    pub at: Instant,
}

#[derive(Default)]
struct PriceState {
    replies: Mutex<HashMap<String, PriceReply>>,
    calls: Mutex<Vec<PriceCall>>,
}

pub struct MockPriceProvider {
    pub url: String,
    state: Arc<PriceState>,
    handle: JoinHandle<()>,
}

impl MockPriceProvider {
    pub async fn start() -> Self {
        let state = Arc::new(PriceState::default());
        let app = Router::new()
            .route(PRICE_PATH, get(price_handler))
            .with_state(state.clone());
        let (base_url, handle) = spawn_server(app).await;

        Self {
            url: format!("{}{}", base_url, PRICE_PATH),
            state,
            handle,
        }
    }

    pub fn reply(&self, provider_id: &str, reply: PriceReply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(provider_id.to_string(), reply);
    }

    pub fn with_price(self, provider_id: &str, price: f64) -> Self {
        self.reply(provider_id, PriceReply::Price(price));
        self
    }

    pub fn calls(&self) -> Vec<PriceCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    pub fn config(&self) -> PriceServiceConfig {
        PriceServiceConfig::default().with_base_url(self.url.clone())
    }

    pub fn service(&self) -> PriceService {
        PriceService::with_config(self.config()).expect("build price service")
    }
}

impl Drop for MockPriceProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn price_handler(
    State(state): State<Arc<PriceState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let ids = params.get("ids").cloned().unwrap_or_default();
    state.calls.lock().unwrap().push(PriceCall {
        ids: ids.clone(),
        vs_currencies: params.get("vs_currencies").cloned().unwrap_or_default(),
        at: Instant::now(),
    });

    let reply = state.replies.lock().unwrap().get(&ids).cloned();
    match reply {
        Some(PriceReply::Price(price)) => price_body(ids, price).into_response(),
        Some(PriceReply::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Some(PriceReply::Body(body)) => (StatusCode::OK, body).into_response(),
        Some(PriceReply::Delayed(delay, price)) => {
            tokio::time::sleep(delay).await;
            price_body(ids, price).into_response()
        }
        None => Json(json!({})).into_response(),
    }
}

fn price_body(provider_id: String, price: f64) -> Json<Value> {
    let mut body = serde_json::Map::new();
    body.insert(provider_id, json!({ "usd": price }));
    Json(Value::Object(body))
}

// ---------------------------------------------------------------------------
// Swap aggregator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AggregatorCall {
    pub endpoint: &'static str,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
}

struct AggregatorState {
    responses: Mutex<HashMap<&'static str, (StatusCode, Value)>>,
    calls: Mutex<Vec<AggregatorCall>>,
}

pub struct MockAggregator {
    pub base_url: String,
    state: Arc<AggregatorState>,
    handle: JoinHandle<()>,
}

impl MockAggregator {
    pub async fn start() -> Self {
        let state = Arc::new(AggregatorState {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/estimate", get(estimate_handler))
            .route("/swap", get(swap_handler))
            .route("/transaction", get(transaction_handler))
            .with_state(state.clone());
        let (base_url, handle) = spawn_server(app).await;

        Self {
            base_url,
            state,
            handle,
        }
    }

    pub fn respond(&self, endpoint: &'static str, status: StatusCode, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(endpoint, (status, body));
    }

    pub fn calls(&self) -> Vec<AggregatorCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl Drop for MockAggregator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type AggState = State<Arc<AggregatorState>>;
type Params = Query<HashMap<String, String>>;

async fn estimate_handler(state: AggState, headers: HeaderMap, params: Params) -> Response {
    aggregator_reply("estimate", state, headers, params)
}

async fn swap_handler(state: AggState, headers: HeaderMap, params: Params) -> Response {
    aggregator_reply("swap", state, headers, params)
}

async fn transaction_handler(
    state: AggState,
    headers: HeaderMap,
    params: Params,
) -> Response {
    aggregator_reply("transaction", state, headers, params)
}

fn aggregator_reply(
    endpoint: &'static str,
    State(state): AggState,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    state.calls.lock().unwrap().push(AggregatorCall {
        endpoint,
        params,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let response = state.responses.lock().unwrap().get(endpoint).cloned();
    match response {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not configured" }))).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Price lookups that never touch the network
// ---------------------------------------------------------------------------

/// Always answers with the same price and counts the calls it receives.
pub struct FixedPrice {
    pub price: f64,
    pub calls: AtomicUsize,
    pub last_coin: Mutex<Option<String>>,
}

impl FixedPrice {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            calls: AtomicUsize::new(0),
            last_coin: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceLookup for FixedPrice {
    async fn get_price(&self, coin: &str) -> Result<f64, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_coin.lock().unwrap() = Some(coin.to_string());
        Ok(self.price)
    }
}

/// Fails every lookup.
pub struct FailingPrice;

#[async_trait]
impl PriceLookup for FailingPrice {
    async fn get_price(&self, coin: &str) -> Result<f64, PriceError> {
        Err(PriceError::PriceNotFound(coin.to_string()))
    }
}
