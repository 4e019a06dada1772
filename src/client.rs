//! Conversation analysis client.
//!
//! Keep the public surface small: a builder, a client, and `analyze`.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
mod classification;
pub mod core;
mod scope;

pub use builder::ConversationAnalysisClientBuilder;
pub use core::ConversationAnalysisClient;
