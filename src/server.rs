//! HTTP 入口：/health、/chat、/chat/test 与菜单只读路由
//!
//! /chat 受对话准入限制；菜单路由不受限制，供 invoke_route 回环调用。

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::agent::ChatService;
use crate::core::ChatError;
use crate::menu::{routes as menu_routes, MenuStore};

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

type ChatResult = Result<Json<ChatResponse>, (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message.into() })))
}

impl From<ChatError> for (StatusCode, Json<Value>) {
    fn from(e: ChatError) -> Self {
        detail(StatusCode::INTERNAL_SERVER_ERROR, e.detail)
    }
}

/// 组装完整服务：菜单路由 + 对话路由
pub fn router(chat: ChatService, store: Arc<MenuStore>) -> Router {
    let chat_routes = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/chat", post(api_chat))
        .route("/chat/", post(api_chat))
        .route("/chat/test", post(api_chat_test))
        .with_state(AppState { chat });

    menu_routes::router(store).merge(chat_routes)
}

async fn api_chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> ChatResult {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(detail(StatusCode::BAD_REQUEST, "message is required"));
    }
    let response = state.chat.chat(message).await?;
    Ok(Json(ChatResponse { response }))
}

async fn api_chat_test(State(state): State<AppState>) -> ChatResult {
    let response = state.chat.self_check().await?;
    Ok(Json(ChatResponse { response }))
}
