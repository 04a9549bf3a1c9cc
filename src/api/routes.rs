//! HTTP routes.
//!
//! - `GET /properties/{postcode}/{street_paon_saon}` - address with its latest sale
//! - `GET /health` - liveness check

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::api::error::ErrorBody;
use crate::core::service::PropertyService;
use crate::domain::model::PropertyResponse;
use crate::domain::ports::{AddressStore, SaleHistory};
use crate::utils::error::PropertyError;

pub fn router<A, S>(service: Arc<PropertyService<A, S>>) -> Router
where
    A: AddressStore + 'static,
    S: SaleHistory + 'static,
{
    Router::new()
        .route(
            "/properties/:postcode/:street_paon_saon",
            get(get_property::<A, S>),
        )
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn get_property<A, S>(
    State(service): State<Arc<PropertyService<A, S>>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<PropertyResponse>, PropertyError>
where
    A: AddressStore + 'static,
    S: SaleHistory + 'static,
{
    // 路徑無法解碼時也回 JSON 404
    let Path((postcode, street_paon_saon)) = path.map_err(|rejection| {
        PropertyError::InputFormat {
            message: rejection.body_text(),
        }
    })?;

    let span = tracing::info_span!("get_property", %postcode, segment = %street_paon_saon);

    async move {
        let response = service.lookup(&postcode, &street_paon_saon).await?;
        tracing::info!("Resolved property {} {}", response.paon, response.street);
        Ok::<_, PropertyError>(Json(response))
    }
    .instrument(span)
    .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found(uri: Uri) -> ErrorBody {
    ErrorBody::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
