//! LINE webhook relay.
//!
//! Receives LINE webhook deliveries on `POST /callback`, verifies the
//! signature, routes each text event through the
//! [`MessageRouter`](orchestrator::MessageRouter), and sends at most one
//! reply per event.
//!
//! The binary (`line-relay`) wires this up from environment variables; see
//! [`AppConfig::from_env`].

pub mod config;
pub mod error;
pub mod sender;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_provider::{HttpProvider, OpenAiImageGenerator};
use line_messaging::{verify_signature, Event, LineClient, WebhookPayload, SIGNATURE_HEADER};
use orchestrator::{AccessGate, MessageRouter, ReplyOrchestrator, ReplySender};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use sender::LineReplySender;

/// Shared state for the webhook handlers.
#[derive(Clone)]
pub struct AppState {
    /// Secret used to verify `X-Line-Signature`.
    pub channel_secret: String,
    /// Routes inbound text to a reply.
    pub router: Arc<MessageRouter>,
    /// Delivers replies.
    pub sender: Arc<dyn ReplySender>,
}

impl AppState {
    /// Create state from its parts.
    pub fn new(
        channel_secret: impl Into<String>,
        router: MessageRouter,
        sender: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            router: Arc::new(router),
            sender,
        }
    }

    /// Build providers, router and LINE sender from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut builder = ReplyOrchestrator::builder()
            .fallback_text(config.fallback_text.clone())
            .tag_replies(config.tag_replies);
        for provider_config in &config.providers {
            builder = builder.provider(Arc::new(HttpProvider::new(provider_config.clone())?));
        }
        let orchestrator = builder.build()?;

        let mut router = MessageRouter::new(orchestrator, AccessGate::new(config.access.clone()));
        if let Some(image_config) = &config.image {
            router = router.with_image_generator(Arc::new(OpenAiImageGenerator::new(
                image_config.clone(),
            )?));
        }

        let client = LineClient::new(config.line.clone())?;

        Ok(Self::new(
            config.line.channel_secret.clone(),
            router,
            Arc::new(LineReplySender::new(client)),
        ))
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/callback", post(callback))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::InvalidSignature)?;
    verify_signature(&state.channel_secret, &body, signature)?;

    let payload = WebhookPayload::from_slice(&body)
        .map_err(|e| AppError::MalformedBody(e.to_string()))?;
    info!("Webhook delivery with {} event(s)", payload.events.len());

    for event in &payload.events {
        handle_event(&state, event).await;
    }

    Ok("OK")
}

/// Process one event. Failures are logged and never abort the delivery.
async fn handle_event(state: &AppState, event: &Event) {
    if event.is_standby() {
        debug!("Skipping event in standby mode");
        return;
    }
    let Some(text) = event.text() else {
        debug!("Ignoring {} event", event.event_type);
        return;
    };
    let Some(reply_token) = event.reply_token.as_deref() else {
        debug!("Skipping text event without reply token");
        return;
    };
    let Some(sender_id) = event.sender_id() else {
        debug!("Skipping text event without source");
        return;
    };

    let Some(reply) = state.router.handle(sender_id, text).await else {
        return;
    };

    match state.sender.send_reply(reply_token, &reply).await {
        Ok(()) => debug!("Replied to {}", sender_id),
        Err(e) => warn!("Failed to reply to {}: {}", sender_id, e),
    }
}
