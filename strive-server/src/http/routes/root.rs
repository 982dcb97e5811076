//! Welcome endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to Strive API";

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE,
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_returns_welcome() {
        let Json(body) = root().await;
        assert_eq!(body.message, "Welcome to Strive API");
    }
}
