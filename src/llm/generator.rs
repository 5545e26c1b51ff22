//! LLM-backed commit message generation with guaranteed fallback.

use tracing::{debug, info, warn};

use crate::commit::change::NO_STAGED_CHANGES;
use crate::commit::fallback::build_fallback_message;
use crate::error::LlmError;
use crate::git::executor::GitExecutor;
use crate::git::status::{list_staged_changes, staged_diff};
use crate::llm::client::ChatClient;
use crate::llm::request::{GenerationRequest, build_request};

/// Maximum bytes of diff text sent to the model.
pub const MAX_DIFF_LENGTH: usize = 30_000;

const TRUNCATION_NOTE: &str = "\n\n[diff truncated]";

/// Generate a commit message from the staged diff using the chat backend.
///
/// Never fails. An empty diff short-circuits without a network call. Any
/// error or empty reply falls back to [`build_fallback_message`] computed from
/// a fresh status query.
pub async fn generate<G, C>(
    git: &G,
    client: &C,
    api_key: &str,
    model_id: &str,
    max_tokens: u32,
) -> String
where
    G: GitExecutor + ?Sized,
    C: ChatClient + ?Sized,
{
    let diff = staged_diff(git).await;
    if diff.trim().is_empty() {
        return NO_STAGED_CHANGES.to_string();
    }

    let request = GenerationRequest::new(model_id, max_tokens, truncate_diff(&diff, MAX_DIFF_LENGTH));

    match request_message(client, api_key, &request).await {
        Ok(message) => message,
        Err(e) => {
            warn!("LLM commit message generation failed, using fallback: {e}");
            let changes = list_staged_changes(git).await;
            build_fallback_message(&changes)
        }
    }
}

/// Send the shaped request and extract the first candidate's trimmed text.
async fn request_message<C: ChatClient + ?Sized>(
    client: &C,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<String, LlmError> {
    let chat = build_request(request);
    info!(
        "Requesting commit message from {} ({} diff bytes)",
        request.model_id,
        request.diff_text.len()
    );

    let response = client.complete(api_key, &chat).await?;

    if let Some(usage) = response.usage {
        debug!(
            "Token usage: prompt={} completion={} total={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    match response.first_content().map(str::trim) {
        Some(content) if !content.is_empty() => Ok(content.to_string()),
        _ => Err(LlmError::EmptyContent),
    }
}

/// Cut `diff` to at most `max_len` bytes on a char boundary, with a note.
pub fn truncate_diff(diff: &str, max_len: usize) -> String {
    if diff.len() <= max_len {
        return diff.to_string();
    }

    let mut end = max_len;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}{}", &diff[..end], TRUNCATION_NOTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::executor::GitOutput;
    use crate::git::executor::fake::FakeGit;
    use crate::llm::client::{ChatChoice, ChatResponse, ChoiceMessage, MockChatClient};

    const DIFF: &str = "diff --git a/a.ts b/a.ts\n+export const a = 1;\n";

    fn response(content: Option<&str>) -> ChatResponse {
        ChatResponse {
            choices: vec![ChatChoice {
                message: Some(ChoiceMessage {
                    content: content.map(str::to_string),
                }),
            }],
            usage: None,
        }
    }

    fn staged_git() -> FakeGit {
        FakeGit::new()
            .with("diff --cached", GitOutput::ok(DIFF))
            .with("diff --cached --name-status", GitOutput::ok("A\ta.ts\nA\tb.ts\n"))
    }

    #[tokio::test]
    async fn test_success_returns_trimmed_content() {
        let git = staged_git();
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .withf(|key, req| key == "sk-test" && req.model == "gpt-4o-mini")
            .times(1)
            .returning(|_, _| Ok(response(Some("  feat(a): export constant\n"))));

        let message = generate(&git, &client, "sk-test", "gpt-4o-mini", 128).await;
        assert_eq!(message, "feat(a): export constant");
        // Status is only queried on the fallback path
        assert_eq!(git.calls(), vec!["diff --cached"]);
    }

    #[tokio::test]
    async fn test_blank_diff_skips_network() {
        let git = FakeGit::new().with("diff --cached", GitOutput::ok("  \n"));
        let mut client = MockChatClient::new();
        client.expect_complete().never();

        let message = generate(&git, &client, "sk-test", "gpt-4o-mini", 128).await;
        assert_eq!(message, "chore: no staged changes");
    }

    #[tokio::test]
    async fn test_empty_content_falls_back() {
        let git = staged_git();
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok(response(Some("   "))));

        let message = generate(&git, &client, "sk-test", "gpt-4o-mini", 128).await;
        assert_eq!(message, "feat: add new files");
    }

    #[tokio::test]
    async fn test_missing_choices_falls_back() {
        let git = staged_git();
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok(ChatResponse::default()));

        let message = generate(&git, &client, "sk-test", "gpt-4o-mini", 128).await;
        assert_eq!(message, "feat: add new files");
    }

    #[tokio::test]
    async fn test_transport_error_falls_back() {
        let git = staged_git();
        let mut client = MockChatClient::new();
        client.expect_complete().returning(|_, _| {
            Err(LlmError::RetriesExhausted(Box::new(LlmError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })))
        });

        let message = generate(&git, &client, "sk-test", "gpt-4o-mini", 128).await;
        assert_eq!(message, "feat: add new files");
        assert_eq!(
            git.calls(),
            vec!["diff --cached", "diff --cached --name-status"]
        );
    }

    #[tokio::test]
    async fn test_quirks_applied_to_sent_request() {
        let git = staged_git();
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .withf(|_, req| {
                req.max_tokens.is_none()
                    && req.max_completion_tokens == Some(64)
                    && req.temperature == 1.0
            })
            .returning(|_, _| Ok(response(Some("chore: tidy"))));

        let message = generate(&git, &client, "sk-test", "o1-mini", 64).await;
        assert_eq!(message, "chore: tidy");
    }

    #[test]
    fn test_truncate_diff_short_input_untouched() {
        assert_eq!(truncate_diff("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_diff_respects_char_boundary() {
        // 'é' is two bytes; cutting at 2 would split it
        let truncated = truncate_diff("aéb", 2);
        assert_eq!(truncated, format!("a{TRUNCATION_NOTE}"));
    }
}
