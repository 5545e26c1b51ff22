//! Chat-completion request shaping with per-model quirks.

use serde::Serialize;

/// Token budget used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Sampling temperature for the base request. Kept low for repeatable output.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// System instruction fixing the output contract.
pub const SYSTEM_PROMPT: &str = "You write Git commit messages following the Conventional Commits specification. \
Use the format `type(scope): description` where type is one of feat, fix, docs, style, refactor, test, chore. \
The scope is optional. Write the description in imperative mood, lowercase, without a trailing period. \
Reply with the commit message only: no quotes, no code fences, no explanation.";

/// Inputs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model_id: String,
    /// Always greater than zero.
    pub max_tokens: u32,
    pub diff_text: String,
}

impl GenerationRequest {
    /// A zero token budget is replaced with [`DEFAULT_MAX_TOKENS`].
    pub fn new(model_id: impl Into<String>, max_tokens: u32, diff_text: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            max_tokens: if max_tokens == 0 {
                DEFAULT_MAX_TOKENS
            } else {
                max_tokens
            },
            diff_text: diff_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Payload for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Legacy completion cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    pub temperature: f32,
    pub n: u32,
}

/// Adjustment applied to every model whose id starts with `prefix`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelQuirk {
    pub prefix: &'static str,
    /// Send the cap as `max_completion_tokens` and drop `max_tokens`.
    pub omit_legacy_token_field: bool,
    pub temperature: Option<f32>,
}

impl ModelQuirk {
    fn matches(&self, model_id: &str) -> bool {
        model_id.starts_with(self.prefix)
    }

    fn apply(&self, request: &mut ChatRequest) {
        if self.omit_legacy_token_field
            && let Some(cap) = request.max_tokens.take()
        {
            request.max_completion_tokens = Some(cap);
        }
        if let Some(temperature) = self.temperature {
            request.temperature = temperature;
        }
    }
}

/// Known model quirks, applied in order. All matching rules apply.
pub const MODEL_QUIRKS: &[ModelQuirk] = &[
    // Reasoning models only accept `max_completion_tokens`
    ModelQuirk {
        prefix: "o1",
        omit_legacy_token_field: true,
        temperature: None,
    },
    // o1-mini rejects any temperature other than the default
    ModelQuirk {
        prefix: "o1-mini",
        omit_legacy_token_field: false,
        temperature: Some(1.0),
    },
];

/// Build the chat-completion payload for `request`.
///
/// Model ids are not validated; ids matching no quirk get the base shape.
pub fn build_request(request: &GenerationRequest) -> ChatRequest {
    build_request_with_quirks(request, MODEL_QUIRKS)
}

/// Same as [`build_request`] with an explicit quirk table.
pub fn build_request_with_quirks(request: &GenerationRequest, quirks: &[ModelQuirk]) -> ChatRequest {
    let mut chat = ChatRequest {
        model: request.model_id.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: request.diff_text.clone(),
            },
        ],
        max_tokens: Some(request.max_tokens),
        max_completion_tokens: None,
        temperature: DEFAULT_TEMPERATURE,
        n: 1,
    };

    for quirk in quirks.iter().filter(|q| q.matches(&request.model_id)) {
        quirk.apply(&mut chat);
    }

    chat
}
