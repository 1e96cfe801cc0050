use crate::llm::client::{ChatClient, SamplingConfig};
use crate::types::{Message, RagError, Result, Role};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

/// Chat client for the OpenAI API and compatible endpoints.
pub struct OpenAiChatClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

fn to_openai_messages(messages: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>> {
    messages
        .iter()
        .map(|message| match message.role {
            Role::System => Ok(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(message.content.clone()),
            )),
            Role::Human => Ok(ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(message.content.clone()),
            )),
            Role::Assistant => Ok(ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| RagError::Model(format!("Failed to build message: {}", e)))?,
            )),
        })
        .collect()
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, messages: &[Message], sampling: &SamplingConfig) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(sampling.temperature)
            .messages(to_openai_messages(messages)?)
            .build()
            .map_err(|e| RagError::Model(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| RagError::Model(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| RagError::Model("No response from OpenAI".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
