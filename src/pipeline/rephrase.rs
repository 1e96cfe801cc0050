use crate::llm::{ChatClient, SamplingConfig};
use crate::types::{Message, RagError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const REPHRASE_SYSTEM_TEMPLATE: &str = "Given the following conversation and a follow up \
    question, rephrase the follow up question to be a standalone question.";

/// Rewrites a follow-up question into a standalone question.
///
/// One chat call per invocation, low temperature, plain trimmed-string
/// output. Stateless: only the history explicitly passed in is used.
pub struct RephraseChain {
    chat: Arc<dyn ChatClient>,
    sampling: SamplingConfig,
    timeout: Duration,
}

impl RephraseChain {
    pub fn new(chat: Arc<dyn ChatClient>, sampling: SamplingConfig, timeout: Duration) -> Self {
        Self {
            chat,
            sampling,
            timeout,
        }
    }

    /// Assemble the prompt: fixed system instruction, the conversation
    /// history in order, then a human turn embedding the follow-up.
    pub fn prompt(history: &[Message], follow_up: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(REPHRASE_SYSTEM_TEMPLATE));
        messages.extend(history.iter().cloned());
        messages.push(Message::human(format!(
            "Rephrase the following question as a standalone question:\n{}",
            follow_up
        )));
        messages
    }

    pub async fn run(&self, history: &[Message], follow_up: &str) -> Result<String> {
        let messages = Self::prompt(history, follow_up);

        let response = tokio::time::timeout(
            self.timeout,
            self.chat.complete(&messages, &self.sampling),
        )
        .await
        .map_err(|_| RagError::Model(format!("Rephrase timed out after {:?}", self.timeout)))??;

        let standalone = response.trim().to_string();
        debug!(follow_up, standalone = %standalone, "rephrased question");
        Ok(standalone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn prompt_starts_with_system_instruction() {
        let messages = RephraseChain::prompt(&[], "What does he teach?");
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("standalone question"));
    }

    #[test]
    fn prompt_preserves_history_order() {
        let history = vec![
            Message::human("Who is the CS229 instructor?"),
            Message::assistant("Andrew Ng."),
        ];
        let messages = RephraseChain::prompt(&history, "What does he teach?");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "Who is the CS229 instructor?");
        assert_eq!(messages[2].content, "Andrew Ng.");
    }

    #[test]
    fn prompt_ends_with_human_turn_embedding_the_follow_up() {
        let messages = RephraseChain::prompt(&[], "What does he teach?");
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::Human);
        assert!(last.content.contains("What does he teach?"));
    }
}
