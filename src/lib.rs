//! commiter - stage your changes and get a commit message written for you.
//!
//! # Overview
//!
//! commiter reads the staged changes from git and produces a commit message,
//! either deterministically from the file statuses or by asking an
//! OpenAI-compatible chat model. The LLM path never fails: any error falls
//! back to a simple heuristic message.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{
    ChangeKind, ChangeSet, MessageEngine, StagedChange, build_deterministic_message,
    build_fallback_message,
};
pub use config::{Config, LlmSettings};
pub use error::{ConfigError, GitError, LlmError};
pub use git::{GitExecutor, GitOutput, SystemGit};
pub use llm::{ChatClient, OpenAiClient};
