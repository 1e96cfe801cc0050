use crate::llm::{ChatClient, SamplingConfig};
use crate::types::{Message, RagError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const ANSWER_SYSTEM_TEMPLATE: &str = "You are an experienced researcher, expert at \
    interpreting and answering questions based on provided sources. Using the provided \
    context, answer the user's question to the best of your ability using only the \
    resources provided. If the context does not contain the answer, say you don't know.\n\n\
    <context>\n{context}\n</context>";

/// Generates an answer from a standalone question and its retrieved context.
///
/// The model is instructed to answer from the supplied context only; an
/// empty context produces an "I don't know" style answer rather than a
/// hallucinated one.
pub struct AnswerChain {
    chat: Arc<dyn ChatClient>,
    sampling: SamplingConfig,
    timeout: Duration,
}

impl AnswerChain {
    pub fn new(chat: Arc<dyn ChatClient>, sampling: SamplingConfig, timeout: Duration) -> Self {
        Self {
            chat,
            sampling,
            timeout,
        }
    }

    /// Assemble the prompt: system turn carrying the retrieved context,
    /// then a human turn asking the question.
    pub fn prompt(standalone_question: &str, context: &str) -> Vec<Message> {
        vec![
            Message::system(ANSWER_SYSTEM_TEMPLATE.replace("{context}", context)),
            Message::human(format!(
                "Now, answer this question using the above context:\n{}",
                standalone_question
            )),
        ]
    }

    pub async fn run(&self, standalone_question: &str, context: &str) -> Result<String> {
        let messages = Self::prompt(standalone_question, context);

        let response = tokio::time::timeout(
            self.timeout,
            self.chat.complete(&messages, &self.sampling),
        )
        .await
        .map_err(|_| RagError::Model(format!("Answer timed out after {:?}", self.timeout)))??;

        let answer = response.trim().to_string();
        debug!(question = standalone_question, "generated answer");
        Ok(answer)
    }
}
