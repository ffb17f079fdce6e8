use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use listgen::{ListingRequest, ListingResponse};
use std::sync::Arc;

/// Generate one listing.
///
/// Asks the configured generator for the listing fields, rewrites every
/// brand mention to its canonical form and fills `mainText` when the
/// generator left it out.
///
/// # Example
/// ```json
/// // Request
/// { "tpl": "classic", "category": "Shoes", "brand": "nike", "condition": "Used" }
///
/// // Response
/// {
///   "tpl": "classic",
///   "aiInput": { "category": "Shoes", "brand": "Nike", "condition": "Used" },
///   "facts": {},
///   "brand": "Nike",
///   "Title": "Nike Running Shoes ...",
///   "...": "...",
///   "mainText": "..."
/// }
/// ```
pub async fn generate(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ListingRequest>, JsonRejection>,
) -> ServerResult<Json<ListingResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(state.config.max_body_size_mb)
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    })?;

    tracing::debug!(brand = request.raw_brand(), "generating listing");

    let response =
        listgen::generate_listing(state.generator.as_ref(), &request, &state.config.rewrite)
            .await?;

    tracing::info!(fields = response.as_map().len(), "listing generated");

    Ok(Json(response))
}
