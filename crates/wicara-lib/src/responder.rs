//! Query responder — one backend call per question, never an error.

use std::sync::Arc;

use tracing::{debug, warn};

use wicara_core::types::GeneratedAnswer;

use crate::llm::{GenerateResponse, LanguageModel};

#[derive(Clone)]
pub struct QueryResponder {
    model: Arc<dyn LanguageModel>,
}

impl QueryResponder {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask the backend. A single attempt; no retry.
    pub async fn respond(&self, text: &str) -> GeneratedAnswer {
        let value = match self.model.generate(text).await {
            Ok(value) => value,
            Err(e) => {
                warn!("responder: backend call failed: {e}");
                return GeneratedAnswer::Failed(e);
            }
        };

        let answer = serde_json::from_value::<GenerateResponse>(value)
            .ok()
            .and_then(|resp| resp.first_text().map(str::to_string))
            .filter(|text| !text.trim().is_empty());

        match answer {
            Some(text) => {
                debug!("responder: answer of {} chars", text.len());
                GeneratedAnswer::Candidate(text)
            }
            None => {
                warn!("responder: backend returned no usable candidate");
                GeneratedAnswer::Fallback
            }
        }
    }
}
