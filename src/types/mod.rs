//! 类型模块：请求与预测结果的数据类型。
//!
//! # Types Module
//!
//! Request and result shapes for a single conversation analysis call.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AnalysisRequest`] | Validated query plus target project and deployment |
//! | [`AnalysisResult`] | Echoed query and the service prediction |
//! | [`Prediction`] | Project kind, top intent, and ranked intents |
//! | [`TargetIntentResult`] | One intent with its score and the downstream engine's raw result |
//! | [`ProjectKind`] | Kind of project that produced the prediction |

pub mod request;
pub mod result;

pub use request::AnalysisRequest;
pub use result::{AnalysisResult, Prediction, ProjectKind, TargetIntentResult};
