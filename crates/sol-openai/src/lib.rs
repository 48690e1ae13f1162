//! OpenAI integration for Solyntra
//!
//! This crate provides the OpenAI-compatible implementation of the
//! EmbeddingProvider and LLMProvider traits.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use sol_core::{
    ChatMessage, Embedding, EmbeddingProvider, Error, GenerationConfig, GenerationResult,
    LLMProvider, Result,
};
