//! HTTP handlers for the dashboard page and its callback API.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chart::figure::Figure;
use crate::dashboard::{Dashboard, InputId, Inputs, LayoutSpec, OutputId};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// The dashboard page - `/`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Controls description - `/api/layout`
pub async fn layout(State(dashboard): State<Arc<Dashboard>>) -> Json<LayoutSpec> {
    Json(dashboard.layout())
}

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    /// Input that changed; `None` re-renders everything.
    #[serde(default)]
    pub changed: Option<InputId>,
    pub inputs: Inputs,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub outputs: BTreeMap<OutputId, Figure>,
}

/// Re-evaluate outputs after an input change - `/api/callback`
pub async fn callback(
    State(dashboard): State<Arc<Dashboard>>,
    Json(request): Json<CallbackRequest>,
) -> Json<CallbackResponse> {
    let outputs = match request.changed {
        Some(changed) => dashboard.dispatch(changed, &request.inputs),
        None => dashboard.render_all(&request.inputs),
    };
    Json(CallbackResponse { outputs })
}

/// Liveness - `/health`
pub async fn health(State(dashboard): State<Arc<Dashboard>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "records": dashboard.dataset().len(),
        "sites": dashboard.dataset().sites.len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
