//! Token-gated discussion board routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use papertrade_core::discussions::MessageWithAuthor;

#[derive(Deserialize)]
struct PostMessageRequest {
    #[serde(default)]
    content: String,
}

/// GET /api/discussions - most recent messages, newest first.
async fn get_messages(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<MessageWithAuthor>>> {
    let messages = state.discussion_service.list_messages()?;
    Ok(Json(messages))
}

/// POST /api/discussions - append a message.
async fn create_message(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<PostMessageRequest>,
) -> ApiResult<(StatusCode, Json<MessageWithAuthor>)> {
    let message = state
        .discussion_service
        .post_message(&user.id, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/discussions", get(get_messages).post(create_message))
}
