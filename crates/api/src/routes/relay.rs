//! Route definition for the conversational-agent relay.

use axum::routing::post;
use axum::Router;

use crate::handlers::relay;
use crate::state::AppState;

/// Mount the relay route (root-level `POST /webhook`; the path is dictated
/// by the external chat platform's configuration).
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(relay::relay))
}
