//! Handler for referral link redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Country header injected by the edge (Cloudflare convention).
const COUNTRY_HEADER: &str = "cf-ipcountry";

/// Redirects a short code to its target URL and captures the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the target URL
/// 2. On cache miss, resolve the active link from the database
/// 3. Asynchronously update cache
/// 4. Send a click event to the background worker
/// 5. Return 307 Temporary Redirect
///
/// # Click Capture
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped (fire-and-forget); the
/// redirect itself never waits on the database write.
///
/// # Errors
///
/// Returns 404 if the code is unknown or the link is archived.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let (target_url, link_id) = match state.cache.get_target(&code).await {
        Ok(Some(cached_url)) => {
            debug!("Cache HIT for {}", code);

            // The click still needs the link id; the row lookup stays on the
            // fast path only for capture, not for the redirect decision.
            let link = state.link_service.get_active_by_code(&code).await?;
            (cached_url, link.id)
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);

            let link = state.link_service.get_active_by_code(&code).await?;

            // Asynchronously update cache (fire-and-forget)
            let cache_clone = state.cache.clone();
            let code_clone = code.clone();
            let url_clone = link.target_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache_clone.set_target(&code_clone, &url_clone, None).await {
                    error!("Failed to cache target URL: {}", e);
                }
            });

            (link.target_url.clone(), link.id)
        }
        Err(e) => {
            error!("Cache error: {}", e);

            let link = state.link_service.get_active_by_code(&code).await?;
            (link.target_url.clone(), link.id)
        }
    };

    let click_event = ClickEvent::new(
        link_id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers.get(COUNTRY_HEADER).and_then(|v| v.to_str().ok()),
    );

    let _ = state.click_sender.try_send(click_event);

    Ok(Redirect::temporary(&target_url))
}
