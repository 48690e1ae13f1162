//! Snapshot tests for the OpenAI client

#[cfg(test)]
mod snapshot_tests {
    use crate::client::{ChatRequest, EmbeddingRequest};
    use crate::{ChatMessage, OpenAiConfig};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        let config = OpenAiConfig::new(Some("sk-test-redacted".to_string()));

        assert_yaml_snapshot!(config, @r###"
        api_key: sk-test-redacted
        api_base: "https://api.openai.com/v1"
        embedding_model: text-embedding-3-small
        llm_model: gpt-3.5-turbo
        timeout_secs: 60
        "###);
    }

    #[test]
    fn test_embedding_request_snapshot() {
        let input = vec!["first chunk".to_string(), "second chunk".to_string()];
        let request = EmbeddingRequest {
            model: "text-embedding-3-small",
            input: &input,
        };

        assert_yaml_snapshot!(request, @r###"
        model: text-embedding-3-small
        input:
          - first chunk
          - second chunk
        "###);
    }

    #[test]
    fn test_chat_request_snapshot() {
        let messages = vec![
            ChatMessage::system("You answer based only on the given context."),
            ChatMessage::user("Question: what does a.txt say?"),
        ];
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 300,
        };

        assert_yaml_snapshot!(request, @r###"
        model: gpt-3.5-turbo
        messages:
          - role: system
            content: You answer based only on the given context.
          - role: user
            content: "Question: what does a.txt say?"
        temperature: 0.5
        max_tokens: 300
        "###);
    }
}
