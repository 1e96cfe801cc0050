//! Composition chains: rephrase, retrieve, answer.
//!
//! Each chain is a thin composition step with no state beyond its
//! construction parameters. They are designed to run sequentially:
//! the rephraser consumes the raw follow-up plus conversation history,
//! the retrieval chain consumes the standalone question and the vector
//! index, and the answer chain consumes the question and the retrieved
//! context. [`QaPipeline`] wires the sequence together; the index is an
//! explicit argument to every query, never module-level state.

pub mod answer;
pub mod rephrase;
pub mod retrieval;

pub use answer::AnswerChain;
pub use rephrase::RephraseChain;
pub use retrieval::{render_context, RetrievalChain, DOC_CLOSE, DOC_OPEN};

use crate::llm::{ChatClient, SamplingConfig};
use crate::rag::{Embedder, MemoryVectorIndex};
use crate::types::{Message, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything produced by one question-answering turn.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    /// The follow-up rewritten without dependence on conversation history.
    pub standalone_question: String,
    /// Retrieved chunks serialized into a delimited context string.
    pub context: String,
    /// Final answer; `None` when the caller stopped after retrieval.
    pub answer: Option<String>,
}

/// Sequential composition of the rephrase, retrieval, and answer chains.
pub struct QaPipeline {
    rephrase: RephraseChain,
    retrieval: RetrievalChain,
    answer: AnswerChain,
}

impl QaPipeline {
    pub fn new(
        chat: Arc<dyn ChatClient>,
        embedder: Arc<dyn Embedder>,
        sampling: SamplingConfig,
        top_k: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            rephrase: RephraseChain::new(chat.clone(), sampling, timeout),
            retrieval: RetrievalChain::new(embedder, top_k, timeout),
            answer: AnswerChain::new(chat, sampling, timeout),
        }
    }

    /// Rephrase the follow-up and retrieve its context, without generating
    /// an answer.
    pub async fn contextualize(
        &self,
        index: &MemoryVectorIndex,
        history: &[Message],
        follow_up: &str,
    ) -> Result<QueryOutcome> {
        let standalone_question = self.rephrase.run(history, follow_up).await?;
        let context = self.retrieval.run(&standalone_question, index).await?;

        Ok(QueryOutcome {
            standalone_question,
            context,
            answer: None,
        })
    }

    /// Run the full rephrase → retrieve → answer sequence.
    pub async fn ask(
        &self,
        index: &MemoryVectorIndex,
        history: &[Message],
        follow_up: &str,
    ) -> Result<QueryOutcome> {
        let mut outcome = self.contextualize(index, history, follow_up).await?;
        let answer = self
            .answer
            .run(&outcome.standalone_question, &outcome.context)
            .await?;

        info!(
            follow_up,
            standalone = %outcome.standalone_question,
            "answered question"
        );
        outcome.answer = Some(answer);
        Ok(outcome)
    }
}
