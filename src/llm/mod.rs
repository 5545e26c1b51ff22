//! Chat-completion backend: request shaping, transport, and generation.

pub mod client;
pub mod generator;
pub mod request;
pub mod retry;

pub use client::{ChatClient, ChatResponse, DEFAULT_API_BASE, OpenAiClient, Usage};
pub use generator::generate;
pub use request::{ChatRequest, GenerationRequest, ModelQuirk, MODEL_QUIRKS, build_request};
pub use retry::RetryPolicy;
