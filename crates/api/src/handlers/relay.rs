//! The conversational-agent webhook relay.
//!
//! The external chat platform POSTs `{ queryResult: { intent, parameters } }`
//! and renders whatever `fulfillmentText`/`fulfillmentMessages` we return.
//! Malformed bodies are rejected by the typed extractor before any dispatch.
//! Intents are matched exhaustively; the response texts are placeholders for
//! the studio's copy.

use axum::extract::State;
use axum::Json;
use harmonia_core::notify::NotificationPurpose;
use harmonia_core::relay::{Intent, RelayRequest, RelayResponse};

use crate::state::AppState;

/// POST /webhook
pub async fn relay(
    State(state): State<AppState>,
    Json(request): Json<RelayRequest>,
) -> Json<RelayResponse> {
    let intent = request.query_result.intent;

    let response = match intent {
        Intent::Welcome => RelayResponse::text(
            "Olá! Sou o assistente da Harmonia. Posso falar sobre pacotes, preços ou começar seu briefing.",
        ),
        Intent::PackagesOverview => RelayResponse::text(
            "Trabalhamos com três pacotes: single (uma música), EP (até quatro) e trilha sob medida.",
        ),
        Intent::PackagesPricing => RelayResponse::text(
            "O pacote single parte de R$ 1.200; EP e trilhas sob medida são orçados por briefing.",
        ),
        Intent::BriefingStart => RelayResponse::text(
            "Vamos lá! Me conte o nome de quem encomenda, um e-mail para contato e o que a música deve contar.",
        ),
        Intent::PreviewStatus => RelayResponse::text(
            "Para acompanhar seu projeto, use o link de prévia que enviamos por e-mail.",
        ),
        Intent::HumanHandoff => RelayResponse::text(
            "Claro, vou acionar alguém da equipe. Responderemos pelo seu e-mail em breve.",
        ),
        Intent::Unknown => {
            tracing::warn!(
                parameters = ?request.query_result.parameters,
                "Relay received an unknown intent"
            );
            RelayResponse::text(
                "Desculpe, não entendi. Posso falar sobre pacotes, preços ou começar seu briefing.",
            )
        }
    };

    state
        .notifier
        .notify(
            NotificationPurpose::Chatbot,
            serde_json::json!({
                "event": "intent_handled",
                "intent": intent.as_str(),
                "parameters": request.query_result.parameters,
            }),
        )
        .await;

    Json(response)
}
