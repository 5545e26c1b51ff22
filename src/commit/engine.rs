//! Commit message engine: the single entry point callers use.
//!
//! Two paths, both total:
//! - deterministic: categorize staged files, no network;
//! - LLM: ask the chat backend, degrade to the fallback heuristic on failure.

use tracing::debug;

use crate::commit::deterministic::build_deterministic_message;
use crate::config::LlmSettings;
use crate::git::executor::GitExecutor;
use crate::git::status::list_staged_changes;
use crate::llm::client::ChatClient;
use crate::llm::generator;

/// Engine over an injected git executor and chat client.
pub struct MessageEngine<G, C> {
    git: G,
    client: C,
}

impl<G: GitExecutor, C: ChatClient> MessageEngine<G, C> {
    pub fn new(git: G, client: C) -> Self {
        Self { git, client }
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Summarize the staged files without contacting the chat backend.
    pub async fn deterministic_message(&self, max_files_per_category: usize) -> String {
        let changes = list_staged_changes(&self.git).await;
        build_deterministic_message(&changes, max_files_per_category)
    }

    /// Ask the chat backend, falling back to the heuristic on any failure.
    pub async fn llm_message(&self, settings: &LlmSettings) -> String {
        generator::generate(
            &self.git,
            &self.client,
            &settings.api_key,
            &settings.model,
            settings.max_tokens,
        )
        .await
    }

    /// Use the LLM path when settings are available, otherwise the
    /// deterministic one.
    pub async fn generate(&self, settings: Option<&LlmSettings>, max_files_per_category: usize) -> String {
        match settings {
            Some(settings) => {
                debug!("LLM configured (model {}), requesting message", settings.model);
                self.llm_message(settings).await
            }
            None => {
                debug!("No LLM configured, using deterministic message");
                self.deterministic_message(max_files_per_category).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::git::executor::GitOutput;
    use crate::git::executor::fake::FakeGit;
    use crate::llm::client::{ChatChoice, ChatResponse, ChoiceMessage, MockChatClient};

    fn settings() -> LlmSettings {
        LlmSettings {
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 100,
        }
    }

    fn git_with(name_status: &str, diff: &str) -> FakeGit {
        FakeGit::new()
            .with("diff --cached --name-status", GitOutput::ok(name_status))
            .with("diff --cached", GitOutput::ok(diff))
    }

    #[tokio::test]
    async fn test_no_settings_takes_deterministic_path() {
        let git = git_with("A\ta.ts\nA\tb.ts\n", "+a\n+b\n");
        let mut client = MockChatClient::new();
        client.expect_complete().never();

        let engine = MessageEngine::new(git, client);
        assert_eq!(engine.generate(None, 5).await, "chore: added a.ts, b.ts");
        assert_eq!(engine.git().calls(), vec!["diff --cached --name-status"]);
    }

    #[tokio::test]
    async fn test_settings_take_llm_path() {
        let mut client = MockChatClient::new();
        client.expect_complete().times(1).returning(|_, _| {
            Ok(ChatResponse {
                choices: vec![ChatChoice {
                    message: Some(ChoiceMessage {
                        content: Some("feat(ui): add a and b".to_string()),
                    }),
                }],
                usage: None,
            })
        });

        let engine = MessageEngine::new(git_with("A\ta.ts\n", "+a\n"), client);
        assert_eq!(engine.generate(Some(&settings()), 5).await, "feat(ui): add a and b");
    }

    #[tokio::test]
    async fn test_llm_failure_matches_fallback() {
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .returning(|_, _| Err(LlmError::EmptyContent));

        let engine = MessageEngine::new(git_with("M\ta.ts\nD\tb.ts\n", "-x\n+y\n"), client);
        assert_eq!(engine.generate(Some(&settings()), 5).await, "chore: update files");
    }

    #[tokio::test]
    async fn test_deterministic_with_failing_git_is_total() {
        let engine = MessageEngine::new(FakeGit::new(), MockChatClient::new());
        assert_eq!(engine.deterministic_message(5).await, "chore: no staged changes");
    }
}
