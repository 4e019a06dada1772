//! # conversation-analysis
//!
//! 会话分析客户端：向编排（orchestration）意图路由端点发送单次查询并返回类型化的预测结果。
//!
//! Minimal async client for conversation analysis endpoints. A query is sent
//! to a deployed project (typically an orchestration project that routes to a
//! downstream engine such as LUIS), and the prediction comes back typed.
//!
//! ## Overview
//!
//! - **Fail fast**: missing endpoint, key, or identifiers are reported before any connection is opened
//! - **One exchange per call**: no hidden retries; errors say whether a retry may help
//! - **Checked results**: the echoed query, score ranges, and top-intent ordering are verified
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conversation_analysis::{AnalysisRequest, ClientConfig, ConversationAnalysisClient};
//!
//! #[tokio::main]
//! async fn main() -> conversation_analysis::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let client = ConversationAnalysisClient::from_config(&config)?;
//!
//!     let request = AnalysisRequest::new(
//!         "book me a flight ticket to Bali",
//!         &config.project_name,
//!         &config.deployment_name,
//!     )?;
//!     let result = client.analyze(&request).await?;
//!     if let Some(top) = result.top_intent() {
//!         println!("{} ({})", top.name, top.confidence_score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment-backed client configuration |
//! | [`client`] | Client, builder, and the `analyze` call |
//! | [`types`] | Request and prediction types |
//! | [`error_code`] | Standard classification of service failures |
//! | [`report`] | Text rendering of a result |
//! | [`transport`] | HTTP transport |

pub mod client;
pub mod config;
pub mod credential;
pub mod error_code;
pub mod report;
pub mod transport;
pub mod types;

pub use client::{ConversationAnalysisClient, ConversationAnalysisClientBuilder};
pub use config::ClientConfig;
pub use credential::KeyCredential;
pub use report::Report;
pub use types::{AnalysisRequest, AnalysisResult, Prediction, ProjectKind, TargetIntentResult};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
