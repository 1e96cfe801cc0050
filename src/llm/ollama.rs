use crate::llm::client::{ChatClient, SamplingConfig};
use crate::types::{Message, RagError, Result, Role};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    models::ModelOptions,
    Ollama,
};

/// Chat client for a local Ollama server.
pub struct OllamaChatClient {
    client: Ollama,
    model: String,
}

impl OllamaChatClient {
    pub fn new(base_url: String, model: String) -> Self {
        let url_parts: Vec<&str> = base_url.split("://").collect();
        let (host, port) = if url_parts.len() == 2 {
            let host_port: Vec<&str> = url_parts[1].split(':').collect();
            let host = host_port[0].to_string();
            let port = if host_port.len() == 2 {
                host_port[1].parse().unwrap_or(11434)
            } else {
                11434
            };
            (host, port)
        } else {
            ("localhost".to_string(), 11434)
        };

        let client = Ollama::new(host, port);

        Self { client, model }
    }
}

fn to_ollama_messages(messages: &[Message]) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|message| match message.role {
            Role::System => ChatMessage::system(message.content.clone()),
            Role::Human => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        })
        .collect()
}

#[async_trait]
impl ChatClient for OllamaChatClient {
    async fn complete(&self, messages: &[Message], sampling: &SamplingConfig) -> Result<String> {
        let request = ChatMessageRequest::new(self.model.clone(), to_ollama_messages(messages))
            .options(ModelOptions::default().temperature(sampling.temperature));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| RagError::Model(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_parsing_defaults() {
        // Parsing is lenient: a bare host falls back to localhost:11434
        let client = OllamaChatClient::new("nonsense".to_string(), "llama3.2".to_string());
        assert_eq!(client.model_name(), "llama3.2");
    }

    #[test]
    fn role_mapping_covers_all_roles() {
        let messages = vec![
            Message::system("a"),
            Message::human("b"),
            Message::assistant("c"),
        ];
        let mapped = to_ollama_messages(&messages);
        assert_eq!(mapped.len(), 3);
    }
}
