//! Answer generation over retrieved context

use std::sync::Arc;
use tracing::debug;

use sol_core::{ChatMessage, GenerationConfig, LLMProvider, Result};

/// Answer returned when no completion credential is configured
pub const LLM_NOT_CONFIGURED: &str = "LLM is not configured. Please set OPENAI_API_KEY.";

const SYSTEM_PROMPT: &str = "You answer based only on the given context.";

/// Turns a question plus retrieved context into a single completion call
pub struct AnswerGenerator {
    provider: Arc<dyn LLMProvider>,
    config: GenerationConfig,
}

impl AnswerGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate an answer to `question` using only `context`.
    ///
    /// Without a credential this returns [`LLM_NOT_CONFIGURED`] and makes no call.
    pub async fn generate(&self, question: &str, context: &str) -> Result<String> {
        if !self.provider.is_configured() {
            return Ok(LLM_NOT_CONFIGURED.to_string());
        }

        let messages = build_messages(question, context);
        let result = self.provider.complete(&messages, &self.config).await?;

        debug!(
            model = %result.model_id,
            tokens = ?result.tokens_used,
            "Generated answer"
        );
        Ok(result.text)
    }
}

/// System and user messages for one grounded question
pub fn build_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "You are a helpful assistant. Use only the provided context to answer the question.\n\n\
         Context:\n{}\n\n\
         Question: {}\n\n\
         Answer concisely:",
        context, question
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sol_core::{Error, GenerationResult, Role};
    use std::sync::Mutex;

    struct RecordingLlm {
        configured: bool,
        fail: bool,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl RecordingLlm {
        fn new(configured: bool) -> Self {
            Self {
                configured,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for RecordingLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            self.seen.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(Error::Provider("boom".to_string()));
            }
            Ok(GenerationResult {
                text: "forty-two".to_string(),
                model_id: config.model_id.clone(),
                tokens_used: Some(3),
            })
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        fn model_id(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_prompt_layout() {
        let messages = build_messages("Why?", "[Source: a.txt]\nBecause.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "You answer based only on the given context.");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "You are a helpful assistant. Use only the provided context to answer the question.\n\n\
             Context:\n[Source: a.txt]\nBecause.\n\n\
             Question: Why?\n\n\
             Answer concisely:"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_returns_sentinel() {
        let llm = Arc::new(RecordingLlm::new(false));
        let generator = AnswerGenerator::new(llm.clone(), GenerationConfig::default());

        let answer = generator.generate("q", "ctx").await.unwrap();
        assert_eq!(answer, LLM_NOT_CONFIGURED);
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_calls_provider_once() {
        let llm = Arc::new(RecordingLlm::new(true));
        let generator = AnswerGenerator::new(llm.clone(), GenerationConfig::default());

        let answer = generator.generate("q", "ctx").await.unwrap();
        assert_eq!(answer, "forty-two");
        assert_eq!(llm.seen.lock().unwrap().len(), 1);
        assert_eq!(generator.config().max_tokens, 300);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let llm = Arc::new(RecordingLlm {
            fail: true,
            ..RecordingLlm::new(true)
        });
        let generator = AnswerGenerator::new(llm, GenerationConfig::default());

        let err = generator.generate("q", "ctx").await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }
}
