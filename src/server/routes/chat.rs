//! Chat endpoint: retrieval-grounded question answering

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /api/v1/chat
///
/// Embeds the question, retrieves the closest clauses, and generates an
/// answer grounded in them. Returns 503 while the store is empty and 422
/// for invalid questions.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    request.validate(state.config.retrieval.max_question_len)?;

    if state.store.is_empty().await? {
        return Err(Error::StoreEmpty);
    }

    let question = request.question.trim();
    tracing::info!(question_len = question.chars().count(), "Chat request");

    let query_embedding = state.embedder.embed(question).await?;
    let top_k = request.top_k.unwrap_or(state.config.retrieval.top_k);
    let results = state.store.search(&query_embedding, top_k).await?;

    let context = PromptBuilder::build_context(&results);
    let answer = state.llm.generate_answer(question, &context).await?;
    let sources = PromptBuilder::extract_sources(&results);

    tracing::info!(sources = sources.len(), "Answer generated");

    Ok(Json(ChatResponse {
        answer,
        sources,
        model: state.llm.model().to_string(),
    }))
}
