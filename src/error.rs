//! Error types for commiter modules using thiserror.

use thiserror::Error;

/// Errors from git subprocess operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git and make sure it is on your PATH.")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },

    #[error("Could not determine current branch name")]
    NoBranch,
}

impl GitError {
    /// Exit code the CLI should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitError::NonZeroExit { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

/// Errors from the chat-completion backend.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Chat completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Chat completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Chat completion API returned an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Chat completion API returned no message content")]
    EmptyContent,

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

/// Errors from reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not locate the home directory")]
    NoHomeDir,

    #[error("Failed to read config: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Failed to write config: {0}")]
    WriteFailed(#[source] std::io::Error),
}
